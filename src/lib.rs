//! # Shopping Assistant
//!
//! A rule-based shopping assistant over a small in-memory catalog. Free-text
//! queries are parsed into structured criteria, a fixed sequence of mock tools
//! (search, discount, shipping, price comparison, return policy) runs over the
//! catalog, and the results are rendered as a numbered text summary.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a CLI** - Run the `shopping-assistant` binary for an interactive loop
//! 2. **As a library** - Drive the [`ShoppingAgent`] or individual tools directly
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use shopping_assistant::{AssistantConfig, ShoppingAgent};
//!
//! let agent = ShoppingAgent::from_config(AssistantConfig::default())?;
//! let response = agent.process_query("floral skirt under $40 in size S with code 'SAVE10'");
//! println!("{}", response.content);
//! ```
//!
//! ### Using Tools
//!
//! ```rust,ignore
//! use shopping_assistant::{AssistantConfig, Catalog, ToolRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = ToolRegistry::with_default_tools(
//!     Arc::new(Catalog::builtin()),
//!     &AssistantConfig::default(),
//! );
//! let result = registry.execute("check_discount", json!({"price": 35.99, "code": "SAVE10"}))?;
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Query orchestration and result records
//! - [`catalog`] - Products, stores, return policies and discount codes
//! - [`cli`] - Command-line parsing, REPL and terminal output
//! - [`config`] - TOML configuration
//! - [`parser`] - Free text to search criteria
//! - [`render`] - Text rendering of results
//! - [`tools`] - Tool functions and the tool registry
//! - [`types`] - Error type and shared definitions

pub mod agents;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod parser;
pub mod render;
pub mod tools;
pub mod types;

pub use agents::{AgentResponse, ShoppingAgent};
pub use catalog::Catalog;
pub use config::AssistantConfig;
pub use parser::{Criteria, QueryParser};
pub use tools::{Tool, ToolRegistry};
pub use types::{AppError, Result};
