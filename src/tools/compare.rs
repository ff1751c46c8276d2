//! Cross-store price comparison
//!
//! The mock stores do not really list each other's products, so every other
//! store gets a synthetic offer. The offer is derived from a keyed hash of
//! `(store, product name)`:
//!
//! ```text
//! h        = first 8 bytes (LE) of SHA-256(seed_le || store || 0x00 || product_name)
//! offset   = (h % 30) - 15          currency units, so within [-15, 14]
//! in_stock = h % 2 == 1
//! price    = max(0, base_price + offset)
//! ```
//!
//! The same seed, store and product name always give the same offer, on any
//! platform.

use crate::catalog::{Catalog, Product};
use crate::tools::registry::{parse_args, Tool};
use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub store: String,
    pub price: f64,
    pub in_stock: bool,
    pub link: String,
}

/// Seeded hash keyed by `(store, product name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonHasher {
    seed: u64,
}

impl ComparisonHasher {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn hash(&self, store: &str, product_name: &str) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(store.as_bytes());
        hasher.update([0u8]);
        hasher.update(product_name.as_bytes());
        let digest = hasher.finalize();

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word)
    }

    /// Whole-unit price offset in `[-15, 14]`.
    pub fn price_offset(&self, store: &str, product_name: &str) -> i64 {
        // h % 30 < 30, so the cast is lossless
        (self.hash(store, product_name) % 30) as i64 - 15
    }

    pub fn in_stock(&self, store: &str, product_name: &str) -> bool {
        self.hash(store, product_name) % 2 == 1
    }
}

/// `https://{store}.com/products/{product-name}`, both lower-cased.
pub fn product_link(store: &str, product_name: &str) -> String {
    format!(
        "https://{}.com/products/{}",
        store.to_lowercase(),
        product_name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
    )
}

/// One synthetic offer from every store other than the product's own, in
/// catalog order.
pub fn compare_prices(
    catalog: &Catalog,
    hasher: &ComparisonHasher,
    product: &Product,
) -> Vec<PriceComparison> {
    catalog
        .store_names()
        .filter(|store| !store.eq_ignore_ascii_case(&product.store))
        .map(|store| {
            let offset = hasher.price_offset(store, &product.name) as f64;
            PriceComparison {
                store: store.to_string(),
                price: (product.price + offset).max(0.0),
                in_stock: hasher.in_stock(store, &product.name),
                link: product_link(store, &product.name),
            }
        })
        .collect()
}

pub struct ComparePricesTool {
    catalog: Arc<Catalog>,
    hasher: ComparisonHasher,
}

impl ComparePricesTool {
    pub fn new(catalog: Arc<Catalog>, hasher: ComparisonHasher) -> Self {
        Self { catalog, hasher }
    }
}

#[derive(Debug, Deserialize)]
struct CompareArgs {
    product_id: Option<String>,
    #[serde(alias = "product_name")]
    product: Option<String>,
}

impl Tool for ComparePricesTool {
    fn name(&self) -> &str {
        "compare_prices"
    }

    fn description(&self) -> &str {
        "Compare a product's price across the other known stores"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_id": { "type": "string" },
                "product": {
                    "type": "string",
                    "description": "Full product name, used when no id is given"
                }
            }
        })
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: CompareArgs = parse_args(self.name(), args)?;

        let product = match (&args.product_id, &args.product) {
            (Some(id), _) => self.catalog.product(id),
            (None, Some(name)) => self.catalog.product_by_name(name),
            (None, None) => {
                return Err(AppError::InvalidInput(
                    "compare_prices: product_id or product is required".to_string(),
                ))
            }
        };

        // Unknown products have nothing to compare against
        let comparisons = product
            .map(|p| compare_prices(&self.catalog, &self.hasher, p))
            .unwrap_or_default();

        Ok(json!({
            "comparisons": comparisons,
            "count": comparisons.len()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skirt(catalog: &Catalog) -> &Product {
        catalog.product("1").unwrap()
    }

    #[test]
    fn test_skips_own_store_and_keeps_order() {
        let catalog = Catalog::builtin();
        let hasher = ComparisonHasher::new(7);
        let stores: Vec<String> = compare_prices(&catalog, &hasher, skirt(&catalog))
            .into_iter()
            .map(|c| c.store)
            .collect();

        assert_eq!(stores, vec!["SneakerWorld", "SiteA", "SiteB"]);
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let catalog = Catalog::builtin();
        let a = compare_prices(&catalog, &ComparisonHasher::new(42), skirt(&catalog));
        let b = compare_prices(&catalog, &ComparisonHasher::new(42), skirt(&catalog));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_hash() {
        assert_ne!(
            ComparisonHasher::new(1).hash("SiteA", "Floral Summer Skirt"),
            ComparisonHasher::new(2).hash("SiteA", "Floral Summer Skirt")
        );
    }

    #[test]
    fn test_key_is_not_plain_concatenation() {
        let hasher = ComparisonHasher::new(0);
        assert_ne!(hasher.hash("ab", "c"), hasher.hash("a", "bc"));
    }

    #[test]
    fn test_offsets_are_bounded() {
        let catalog = Catalog::builtin();
        for seed in 0..50 {
            let hasher = ComparisonHasher::new(seed);
            for product in &catalog.products {
                for c in compare_prices(&catalog, &hasher, product) {
                    let delta = c.price - product.price;
                    assert!((-15.0..=14.0).contains(&delta.round()));
                    let offset = hasher.price_offset(&c.store, &product.name);
                    assert_eq!(c.in_stock, (offset + 15) % 2 == 1);
                }
            }
        }
    }

    #[test]
    fn test_price_never_negative() {
        let mut catalog = Catalog::builtin();
        catalog.products[0].price = 1.0;
        let product = catalog.products[0].clone();
        for seed in 0..50 {
            for c in compare_prices(&catalog, &ComparisonHasher::new(seed), &product) {
                assert!(c.price >= 0.0);
            }
        }
    }

    #[test]
    fn test_product_link() {
        assert_eq!(
            product_link("SiteA", "Casual Denim Jacket"),
            "https://sitea.com/products/casual-denim-jacket"
        );
    }

    #[test]
    fn test_tool_unknown_product_is_empty() {
        let tool = ComparePricesTool::new(Arc::new(Catalog::builtin()), ComparisonHasher::new(0));
        let result = tool.execute(json!({"product": "Moon Boots"})).unwrap();
        assert_eq!(result["count"], 0);

        let result = tool.execute(json!({"product_id": "3"})).unwrap();
        assert_eq!(result["count"], 3);

        assert!(tool.execute(json!({})).is_err());
    }
}
