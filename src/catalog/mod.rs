//! Mock Data Store
//!
//! Fixed product, store, return-policy and discount-code tables. A [`Catalog`]
//! is built once at startup (either [`Catalog::builtin`] or [`Catalog::load`]
//! from a TOML file) and handed to every tool behind an `Arc`; nothing mutates
//! it afterwards.
//!
//! # TOML layout
//!
//! ```toml
//! [[products]]
//! id = "1"
//! name = "Floral Summer Skirt"
//! price = 35.99
//! color = "Blue"
//! size = "S"
//! store = "FashionHub"
//! in_stock = true
//!
//! [[stores]]
//! name = "FashionHub"
//! shipping_base = 5.99
//! free_shipping_threshold = 50.0
//!
//! [stores.return_policy]
//! store = "FashionHub"
//! days_to_return = 30
//! free_returns = true
//! conditions = ["Items must be unworn", "Original tags attached"]
//!
//! [[discount_codes]]
//! code = "SAVE10"
//! percentage = 10.0
//! ```

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A product listed by exactly one store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub color: String,
    pub size: String,
    /// Name of the store that lists this product
    pub store: String,
    pub in_stock: bool,
}

/// Return terms of a single store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnPolicy {
    pub store: String,
    pub days_to_return: u32,
    pub free_returns: bool,
    /// Conditions in display order
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// A store with its shipping parameters and return policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub name: String,
    /// Flat shipping cost below the free-shipping threshold
    pub shipping_base: f64,
    /// Order price at or above which shipping is free
    pub free_shipping_threshold: f64,
    pub return_policy: ReturnPolicy,
}

/// A valid discount code and the percentage it takes off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountCode {
    pub code: String,
    pub percentage: f64,
}

/// The immutable mock tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCode>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in demonstration tables.
    pub fn builtin() -> Self {
        let products = vec![
            product("1", "Floral Summer Skirt", 35.99, "Blue", "S", "FashionHub"),
            product("2", "White Sneakers", 65.99, "White", "8", "SneakerWorld"),
            product("3", "Casual Denim Jacket", 79.99, "Blue", "M", "SiteA"),
            product("4", "Cocktail Dress", 89.99, "Black", "M", "SiteB"),
        ];

        let stores = vec![
            store(
                "FashionHub",
                5.99,
                50.0,
                30,
                true,
                &["Items must be unworn", "Original tags attached"],
            ),
            store(
                "SneakerWorld",
                7.99,
                75.0,
                45,
                true,
                &["Unworn condition", "Original box required"],
            ),
            store(
                "SiteA",
                4.99,
                60.0,
                14,
                false,
                &["Store credit only", "Within 14 days"],
            ),
            store(
                "SiteB",
                6.99,
                80.0,
                30,
                true,
                &["Free returns within 30 days", "Original condition"],
            ),
        ];

        let discount_codes = [("SAVE10", 10.0), ("SUMMER20", 20.0), ("WELCOME15", 15.0)]
            .into_iter()
            .map(|(code, percentage)| DiscountCode {
                code: code.to_string(),
                percentage,
            })
            .collect();

        Self {
            products,
            stores,
            discount_codes,
        }
    }

    /// Load and validate a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::Config(format!("{} ({})", e, path.display())))
    }

    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the table invariants.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for p in &self.products {
            if !ids.insert(p.id.as_str()) {
                return Err(AppError::Config(format!("Duplicate product id '{}'", p.id)));
            }
            if p.price.is_nan() || p.price < 0.0 {
                return Err(AppError::Config(format!(
                    "Product '{}' has a negative price",
                    p.id
                )));
            }
            if self.store(&p.store).is_none() {
                return Err(AppError::Config(format!(
                    "Product '{}' references unknown store '{}'",
                    p.id, p.store
                )));
            }
        }

        for s in &self.stores {
            if s.shipping_base < 0.0 || s.free_shipping_threshold < 0.0 {
                return Err(AppError::Config(format!(
                    "Store '{}' has negative shipping parameters",
                    s.name
                )));
            }
            if !s.return_policy.store.eq_ignore_ascii_case(&s.name) {
                return Err(AppError::Config(format!(
                    "Return policy of '{}' is labelled '{}'",
                    s.name, s.return_policy.store
                )));
            }
        }

        for d in &self.discount_codes {
            if !(0.0..=100.0).contains(&d.percentage) {
                return Err(AppError::Config(format!(
                    "Discount code '{}' has percentage {} outside 0-100",
                    d.code, d.percentage
                )));
            }
        }

        Ok(())
    }

    /// Case-insensitive store lookup.
    pub fn store(&self, name: &str) -> Option<&Store> {
        self.stores
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive product lookup by full name.
    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive discount-code lookup.
    pub fn discount(&self, code: &str) -> Option<&DiscountCode> {
        self.discount_codes
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
    }

    /// Store names in table order.
    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.iter().map(|s| s.name.as_str())
    }
}

fn product(id: &str, name: &str, price: f64, color: &str, size: &str, store: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        color: color.to_string(),
        size: size.to_string(),
        store: store.to_string(),
        in_stock: true,
    }
}

fn store(
    name: &str,
    shipping_base: f64,
    free_shipping_threshold: f64,
    days_to_return: u32,
    free_returns: bool,
    conditions: &[&str],
) -> Store {
    Store {
        name: name.to_string(),
        shipping_base,
        free_shipping_threshold,
        return_policy: ReturnPolicy {
            store: name.to_string(),
            days_to_return,
            free_returns,
            conditions: conditions.iter().map(|c| c.to_string()).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = Catalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.products.len(), 4);
        assert_eq!(
            catalog.store_names().collect::<Vec<_>>(),
            vec!["FashionHub", "SneakerWorld", "SiteA", "SiteB"]
        );
    }

    #[test]
    fn test_lookups_ignore_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.store("sitea").map(|s| s.name.as_str()), Some("SiteA"));
        assert_eq!(catalog.discount("save10").map(|d| d.percentage), Some(10.0));
        assert!(catalog.discount("BOGUS").is_none());
        assert_eq!(
            catalog.product_by_name("cocktail dress").map(|p| p.id.as_str()),
            Some("4")
        );
    }

    #[test]
    fn test_toml_round_trip_of_builtin() {
        let text = toml::to_string(&Catalog::builtin()).unwrap();
        let parsed = Catalog::from_toml_str(&text).unwrap();
        assert_eq!(parsed, Catalog::builtin());
    }

    #[test]
    fn test_rejects_unknown_store() {
        let mut catalog = Catalog::builtin();
        catalog.products[0].store = "Nowhere".to_string();
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("unknown store 'Nowhere'"));
    }

    #[test]
    fn test_rejects_bad_percentage_and_price() {
        let mut catalog = Catalog::builtin();
        catalog.discount_codes[0].percentage = 120.0;
        assert!(catalog.validate().is_err());

        let mut catalog = Catalog::builtin();
        catalog.products[1].price = -1.0;
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut catalog = Catalog::builtin();
        catalog.products[1].id = "1".to_string();
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate product id"));
    }
}
