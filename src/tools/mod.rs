//! Built-in Tools for the Shopping Agent
//!
//! Every capability of the assistant is a small pure function over the
//! immutable [`Catalog`](crate::catalog::Catalog), wrapped in a [`Tool`] so it
//! can also be discovered and invoked by name.
//!
//! # Module Structure
//!
//! - [`search`](crate::tools::search) - Product search over the catalog
//! - [`shipping`](crate::tools::shipping) - Shipping cost and delivery estimate
//! - [`discount`](crate::tools::discount) - Discount / promo code checks
//! - [`compare`](crate::tools::compare) - Synthetic cross-store price comparison
//! - [`returns`](crate::tools::returns) - Return policy lookup
//! - [`registry`](crate::tools::registry) - Tool registration and dispatch
//!
//! # Tool Registry
//!
//! ```ignore
//! let registry = ToolRegistry::with_default_tools(catalog, &config);
//! let result = registry.execute("check_discount", json!({"price": 35.99, "code": "SAVE10"}))?;
//! assert_eq!(result["valid"], true);
//! ```

/// Cross-store price comparison.
pub mod compare;
/// Discount and promo code checks.
pub mod discount;
/// Tool registry for managing available tools.
pub mod registry;
/// Return policy lookup.
pub mod returns;
/// Product search.
pub mod search;
/// Shipping estimates.
pub mod shipping;

pub use registry::{Tool, ToolRegistry};
