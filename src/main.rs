//! Shopping Assistant CLI Entry Point
//!
//! - `shopping-assistant` - Interactive assistant (default)
//! - `shopping-assistant ask <query>` - Answer one query
//! - `shopping-assistant demo` - Run the example queries
//! - `shopping-assistant tools` / `tool <name> [args]` - Inspect and run tools
//! - `shopping-assistant catalog` - Show the product table

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::Value;
use shopping_assistant::cli::output::Output;
use shopping_assistant::cli::{repl, Cli, Commands, LogFormat, EXAMPLE_QUERIES};
use shopping_assistant::{AssistantConfig, ShoppingAgent, ToolRegistry};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.log_format);

    let output = if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        Output::no_color()
    } else {
        Output::new()
    };

    // Load configuration
    let mut config =
        AssistantConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Apply CLI overrides
    if let Some(location) = cli.location {
        config.default_location = location;
    }
    if let Some(seed) = cli.seed {
        config.comparison_seed = seed;
    }

    let agent = ShoppingAgent::from_config(config).context("Failed to build shopping agent")?;

    match cli.command {
        None | Some(Commands::Chat) => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            repl::run(&agent, stdin.lock(), &mut stdout, &output, cli.verbose)
                .context("Interactive session failed")
        }
        Some(Commands::Ask { query, json }) => {
            run_ask(&agent, &query.join(" "), json, &output, cli.verbose)
        }
        Some(Commands::Demo { all }) => {
            let queries = if all {
                &EXAMPLE_QUERIES[..]
            } else {
                &EXAMPLE_QUERIES[..1]
            };
            for query in queries {
                println!("{} {}", output.label("User Query:"), query);
                let response = agent.process_query(query);
                println!("\n{}\n{}\n", output.label("Agent Response:"), response.content);
            }
            Ok(())
        }
        Some(Commands::Tools) => {
            let registry = registry(&agent);
            output.header("Tools");
            for definition in registry.get_tool_definitions() {
                output.kv(&definition.name, &definition.description);
            }
            output.hint("Run a tool with: shopping-assistant tool <NAME> '<JSON ARGS>'");
            Ok(())
        }
        Some(Commands::Tool { name, args }) => {
            let args: Value = match args {
                Some(raw) => serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid JSON arguments for '{}'", name))?,
                None => Value::Object(Default::default()),
            };
            let result = registry(&agent)
                .execute(&name, args)
                .with_context(|| format!("Tool '{}' failed", name))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Some(Commands::Catalog) => {
            show_catalog(&agent, &output);
            Ok(())
        }
    }
}

/// Log to stderr; RUST_LOG wins over the verbosity default.
fn init_tracing(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().init(),
    }
}

fn registry(agent: &ShoppingAgent) -> ToolRegistry {
    ToolRegistry::with_default_tools(agent.catalog().clone(), agent.config())
}

fn run_ask(
    agent: &ShoppingAgent,
    query: &str,
    json: bool,
    output: &Output,
    verbose: bool,
) -> Result<()> {
    let response = agent.process_query(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", response.content);
    if verbose && !response.tool_calls.is_empty() {
        println!("\n{}", output.label("Tool calls made:"));
        for call in &response.tool_calls {
            println!("{}", output.tool_call_line(call));
        }
    }
    Ok(())
}

fn show_catalog(agent: &ShoppingAgent, output: &Output) {
    let catalog = agent.catalog();
    let currency = &agent.config().currency_symbol;

    output.header("Products");
    output.table_header(&["Id", "Name", "Price", "Color", "Size", "Store"]);
    for product in &catalog.products {
        let price = format!("{}{:.2}", currency, product.price);
        output.table_row(&[
            product.id.as_str(),
            product.name.as_str(),
            price.as_str(),
            product.color.as_str(),
            product.size.as_str(),
            product.store.as_str(),
        ]);
    }

    output.header("Stores");
    for store in &catalog.stores {
        output.list_item(&format!(
            "{}: shipping {}{:.2}, free from {}{:.2}, {}-day returns",
            store.name,
            currency,
            store.shipping_base,
            currency,
            store.free_shipping_threshold,
            store.return_policy.days_to_return
        ));
    }

    output.header("Discount codes");
    for discount in &catalog.discount_codes {
        output.kv(&discount.code, &format!("{}% off", discount.percentage));
    }
}
