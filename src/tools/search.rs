//! Product search over the catalog
//!
//! Every filter that is present must match; absent filters impose nothing.
//! Results keep catalog order.

use crate::catalog::{Catalog, Product};
use crate::parser::Criteria;
use crate::tools::registry::{parse_args, Tool};
use crate::types::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Search filters. `name` is a case-insensitive substring of the product
/// name; `color` and `size` are case-insensitive equality; prices are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    #[serde(alias = "product")]
    pub name: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl From<&Criteria> for SearchFilter {
    fn from(criteria: &Criteria) -> Self {
        Self {
            name: criteria.product.clone(),
            color: criteria.color.clone(),
            size: criteria.size.clone(),
            min_price: criteria.min_price,
            max_price: criteria.max_price,
        }
    }
}

impl SearchFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name {
            if !product.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(color) = &self.color {
            if !product.color.eq_ignore_ascii_case(color) {
                return false;
            }
        }
        if let Some(size) = &self.size {
            if !product.size.eq_ignore_ascii_case(size) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }
}

/// Products matching `filter`, in catalog order.
pub fn search_products<'a>(catalog: &'a Catalog, filter: &SearchFilter) -> Vec<&'a Product> {
    catalog
        .products
        .iter()
        .filter(|p| filter.matches(p))
        .collect()
}

pub struct SearchProductsTool {
    catalog: Arc<Catalog>,
}

impl SearchProductsTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for SearchProductsTool {
    fn name(&self) -> &str {
        "search_products"
    }

    fn description(&self) -> &str {
        "Search the product catalog by name, color, size and price range"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Substring of the product name (e.g. 'skirt')"
                },
                "color": { "type": "string" },
                "size": { "type": "string" },
                "min_price": { "type": "number" },
                "max_price": { "type": "number" }
            }
        })
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let filter: SearchFilter = parse_args(self.name(), args)?;
        let products = search_products(&self.catalog, &filter);

        Ok(json!({
            "products": products,
            "count": products.len()
        }))
    }
}
