//! Shopping agent
//!
//! The agent drives a fixed pipeline for every query:
//!
//! 1. parse the text into [`Criteria`](crate::parser::Criteria)
//! 2. search the catalog when any product filter is present
//! 3. per matched product, optionally add one comparison offer per other store
//! 4. per offer, check the discount code, estimate shipping, look up returns
//! 5. optionally look up the return policy of a store named in the query
//! 6. render the collected [`ShoppingReport`] as text
//!
//! No step can fail. Each tool invocation is kept as a [`ToolCallRecord`] so
//! callers can show what the agent did.

pub mod shopping;

use crate::catalog::ReturnPolicy;
use crate::parser::Criteria;
use crate::tools::discount::DiscountResult;
use crate::tools::shipping::ShippingEstimate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use shopping::ShoppingAgent;

/// Where an offer's price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferSource {
    /// The product's own store listing
    Listing,
    /// A synthetic price from another store
    Comparison,
}

/// One (product, store) result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub product_id: String,
    pub name: String,
    pub store: String,
    pub color: String,
    pub size: String,
    pub in_stock: bool,
    pub source: OfferSource,
    /// Price before any discount
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountResult>,
    pub final_price: f64,
    pub shipping: ShippingEstimate,
    pub return_policy: Option<ReturnPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Result of the dedicated return-policy lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyLookup {
    pub store: String,
    pub policy: Option<ReturnPolicy>,
}

/// Everything the agent found for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingReport {
    /// Whether a product search ran
    pub searched: bool,
    pub offers: Vec<Offer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_policy: Option<PolicyLookup>,
}

impl ShoppingReport {
    /// Number of distinct matched products (listing offers)
    pub fn product_count(&self) -> usize {
        self.offers
            .iter()
            .filter(|o| o.source == OfferSource::Listing)
            .count()
    }
}

/// Record of a tool call execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Registry name of the tool
    pub name: String,
    /// Arguments, in the tool's JSON argument shape
    pub arguments: Value,
    pub result: Value,
    /// Duration in microseconds
    pub duration_us: u64,
}

/// Result from a complete agent execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub query: String,
    pub criteria: Criteria,
    #[serde(flatten)]
    pub report: ShoppingReport,
    /// Final text response
    pub content: String,
    /// All tool calls made during execution
    pub tool_calls: Vec<ToolCallRecord>,
}
