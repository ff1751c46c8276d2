//! Discount and promo code checks
//!
//! Codes are looked up case-insensitively in the catalog's closed table. An
//! unknown or missing code is simply invalid: zero percent off, price unchanged.

use crate::catalog::Catalog;
use crate::tools::registry::{parse_args, Tool};
use crate::types::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    /// Canonical code when valid, otherwise the code as given
    pub code: Option<String>,
    pub valid: bool,
    pub discount_percentage: f64,
    /// Unrounded; renderers format to two decimals
    pub final_price: f64,
}

pub fn check_discount(catalog: &Catalog, price: f64, code: Option<&str>) -> DiscountResult {
    match code.and_then(|c| catalog.discount(c)) {
        Some(discount) => DiscountResult {
            code: Some(discount.code.clone()),
            valid: true,
            discount_percentage: discount.percentage,
            final_price: price * (1.0 - discount.percentage / 100.0),
        },
        None => DiscountResult {
            code: code.map(String::from),
            valid: false,
            discount_percentage: 0.0,
            final_price: price,
        },
    }
}

/// The price after applying `code`, or `price` when the code is not valid.
pub fn apply_promo_code(catalog: &Catalog, price: f64, code: Option<&str>) -> f64 {
    check_discount(catalog, price, code).final_price
}

#[derive(Debug, Deserialize)]
struct DiscountArgs {
    price: f64,
    code: Option<String>,
}

pub struct CheckDiscountTool {
    catalog: Arc<Catalog>,
}

impl CheckDiscountTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for CheckDiscountTool {
    fn name(&self) -> &str {
        "check_discount"
    }

    fn description(&self) -> &str {
        "Check a discount code and compute the discounted price"
    }

    fn parameters_schema(&self) -> Value {
        discount_schema()
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: DiscountArgs = parse_args(self.name(), args)?;
        let result = check_discount(&self.catalog, args.price, args.code.as_deref());
        Ok(serde_json::to_value(result)?)
    }
}

pub struct ApplyPromoCodeTool {
    catalog: Arc<Catalog>,
}

impl ApplyPromoCodeTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for ApplyPromoCodeTool {
    fn name(&self) -> &str {
        "apply_promo_code"
    }

    fn description(&self) -> &str {
        "Apply a promo code to a price and return the final price"
    }

    fn parameters_schema(&self) -> Value {
        discount_schema()
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: DiscountArgs = parse_args(self.name(), args)?;
        let final_price = apply_promo_code(&self.catalog, args.price, args.code.as_deref());
        Ok(json!({ "final_price": final_price }))
    }
}

fn discount_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "price": { "type": "number" },
            "code": {
                "type": "string",
                "description": "Discount code, e.g. SAVE10"
            }
        },
        "required": ["price"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_save10() {
        let result = check_discount(&Catalog::builtin(), 35.99, Some("SAVE10"));

        assert!(result.valid);
        assert_eq!(result.code.as_deref(), Some("SAVE10"));
        assert_eq!(result.discount_percentage, 10.0);
        assert!((result.final_price - 32.391).abs() < 1e-9);
        assert_eq!(format!("{:.2}", result.final_price), "32.39");
    }

    #[rstest]
    #[case(Some("BOGUS"))]
    #[case(Some(""))]
    #[case(None)]
    fn test_invalid_codes_leave_price(#[case] code: Option<&str>) {
        let result = check_discount(&Catalog::builtin(), 89.99, code);

        assert!(!result.valid);
        assert_eq!(result.discount_percentage, 0.0);
        assert_eq!(result.final_price, 89.99);
        assert_eq!(result.code.as_deref(), code);
    }

    #[test]
    fn test_lowercase_code_is_canonicalized() {
        let result = check_discount(&Catalog::builtin(), 100.0, Some("welcome15"));
        assert!(result.valid);
        assert_eq!(result.code.as_deref(), Some("WELCOME15"));
        assert_eq!(result.final_price, 85.0);
    }

    #[test]
    fn test_apply_promo_code() {
        let catalog = Catalog::builtin();
        assert_eq!(apply_promo_code(&catalog, 50.0, Some("SUMMER20")), 40.0);
        assert_eq!(apply_promo_code(&catalog, 50.0, Some("FREESHIP")), 50.0);
    }

    #[test]
    fn test_apply_promo_code_tool() {
        let tool = ApplyPromoCodeTool::new(Arc::new(Catalog::builtin()));
        let result = tool.execute(json!({"price": 50.0, "code": "SUMMER20"})).unwrap();
        assert_eq!(result["final_price"], 40.0);
    }
}
