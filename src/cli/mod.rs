//! CLI module for the shopping assistant
//!
//! Provides command-line interface parsing for the `shopping-assistant` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;
pub mod repl;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Queries shown at REPL start and run by `demo`
pub const EXAMPLE_QUERIES: [&str; 4] = [
    "Find a floral skirt under $40 in size S. Is it in stock, and can I apply a discount code 'SAVE10'?",
    "I need white sneakers (size 8) for under $70 that can arrive by Friday.",
    "I found a 'casual denim jacket' at $80 on SiteA. Any better deals?",
    "I want to buy a cocktail dress from SiteB, but only if returns are hassle-free. Do they accept returns?",
];

/// Printed when the REPL ends
pub const FAREWELL: &str = "Thank you for shopping with us!";

/// Shopping Assistant - a rule-based demo shopping agent
///
/// Parses free-text shopping questions and answers them from a mock catalog
/// of products, stores, discount codes and return policies.
#[derive(Parser, Debug)]
#[command(
    name = "shopping-assistant",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Shopping Assistant - a rule-based demo shopping agent",
    long_about = "Shopping Assistant - a rule-based demo shopping agent\n\n\
                  Parses free-text shopping questions into search criteria, runs mock\n\
                  search, discount, shipping, comparison and return-policy tools over an\n\
                  in-memory catalog, and prints a summary.\n\n\
                  Run without arguments to start the interactive assistant.",
    after_help = "EXAMPLES:\n    \
                  shopping-assistant                                # Interactive assistant\n    \
                  shopping-assistant ask \"white sneakers under $70\"  # Answer one query\n    \
                  shopping-assistant demo --all                     # Run the example queries\n    \
                  shopping-assistant tool check_discount '{\"price\": 35.99, \"code\": \"SAVE10\"}'"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "SHOPPING_ASSISTANT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Default shipping destination (overrides config)
    #[arg(short, long, global = true)]
    pub location: Option<String>,

    /// Seed for price comparison offers (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive assistant (same as running without subcommand)
    Chat,

    /// Answer a single query
    Ask {
        /// The shopping question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the example queries
    Demo {
        /// Run all example queries instead of the first one
        #[arg(short, long)]
        all: bool,
    },

    /// List the registered tools
    Tools,

    /// Run one tool with JSON arguments
    Tool {
        /// Name of the tool
        name: String,

        /// Arguments as a JSON object
        args: Option<String>,
    },

    /// Show the product catalog
    Catalog,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
