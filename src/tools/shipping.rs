//! Shipping estimates
//!
//! Cost is the store's flat base below its free-shipping threshold and zero at
//! or above it. Delivery takes `free_days` when shipping is free and
//! `paid_days` otherwise. Destinations outside the home region may add a
//! configured surcharge and extra days (both zero by default). Estimates are
//! always available.

use crate::catalog::Catalog;
use crate::config::ShippingRules;
use crate::tools::registry::{parse_args, Tool};
use crate::types::{AppError, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingEstimate {
    pub available: bool,
    pub cost: f64,
    pub free_shipping: bool,
    pub estimated_days: u32,
    pub estimated_delivery_date: NaiveDate,
    pub destination: String,
    /// Requested arrival weekday, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Weekday>,
    /// Whether delivery lands on or before the next such weekday
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meets_deadline: Option<bool>,
}

/// Inputs of one estimate.
#[derive(Debug, Clone)]
pub struct ShippingRequest<'a> {
    pub store: &'a str,
    /// Price the free-shipping threshold is checked against
    pub price: f64,
    pub destination: &'a str,
    pub today: NaiveDate,
    pub deadline: Option<Weekday>,
}

pub fn estimate_shipping(
    catalog: &Catalog,
    rules: &ShippingRules,
    request: &ShippingRequest<'_>,
) -> ShippingEstimate {
    // An unknown store has no base cost and a zero threshold
    let (base, threshold) = catalog
        .store(request.store)
        .map(|s| (s.shipping_base, s.free_shipping_threshold))
        .unwrap_or((0.0, 0.0));

    let free_shipping = request.price >= threshold;
    let mut cost = if free_shipping { 0.0 } else { base };
    let mut days = if free_shipping {
        rules.free_days
    } else {
        rules.paid_days
    };

    if !request.destination.eq_ignore_ascii_case(&rules.home_region) {
        cost += rules.remote_surcharge;
        days += rules.remote_extra_days;
    }

    let delivery = request.today + Days::new(u64::from(days));
    let meets_deadline = request
        .deadline
        .map(|weekday| delivery <= next_weekday(request.today, weekday));

    ShippingEstimate {
        available: true,
        cost,
        free_shipping,
        estimated_days: days,
        estimated_delivery_date: delivery,
        destination: request.destination.to_string(),
        deadline: request.deadline,
        meets_deadline,
    }
}

/// The first `weekday` strictly after `today`.
pub fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let from = today.weekday().num_days_from_monday();
    let to = weekday.num_days_from_monday();
    let ahead = match (to + 7 - from) % 7 {
        0 => 7,
        n => n,
    };
    today + Days::new(u64::from(ahead))
}

pub struct EstimateShippingTool {
    catalog: Arc<Catalog>,
    rules: ShippingRules,
    default_location: String,
}

impl EstimateShippingTool {
    pub fn new(catalog: Arc<Catalog>, rules: ShippingRules, default_location: String) -> Self {
        Self {
            catalog,
            rules,
            default_location,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EstimateArgs {
    store: String,
    price: f64,
    location: Option<String>,
    today: Option<String>,
    deadline: Option<String>,
}

impl Tool for EstimateShippingTool {
    fn name(&self) -> &str {
        "estimate_shipping"
    }

    fn description(&self) -> &str {
        "Estimate shipping cost and delivery date for an item from a store"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "store": { "type": "string" },
                "price": {
                    "type": "number",
                    "description": "Item price checked against the free-shipping threshold"
                },
                "location": {
                    "type": "string",
                    "description": "Destination (defaults to the configured location)"
                },
                "today": {
                    "type": "string",
                    "description": "Order date as YYYY-MM-DD (defaults to the local date)"
                },
                "deadline": {
                    "type": "string",
                    "description": "Weekday the order must arrive by, e.g. 'friday'"
                }
            },
            "required": ["store", "price"]
        })
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: EstimateArgs = parse_args(self.name(), args)?;

        let today = match args.today.as_deref() {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                AppError::InvalidInput(format!("today must be YYYY-MM-DD: {}", e))
            })?,
            None => chrono::Local::now().date_naive(),
        };
        let deadline = match args.deadline.as_deref() {
            Some(day) => Some(day.parse::<Weekday>().map_err(|_| {
                AppError::InvalidInput(format!("Unknown weekday '{}'", day))
            })?),
            None => None,
        };

        let estimate = estimate_shipping(
            &self.catalog,
            &self.rules,
            &ShippingRequest {
                store: &args.store,
                price: args.price,
                destination: args.location.as_deref().unwrap_or(&self.default_location),
                today,
                deadline,
            },
        );

        Ok(serde_json::to_value(estimate)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(store: &str, price: f64) -> ShippingRequest<'_> {
        ShippingRequest {
            store,
            price,
            destination: "New York",
            // a Monday
            today: date(2026, 10, 19),
            deadline: None,
        }
    }

    #[test]
    fn test_paid_shipping_below_threshold() {
        let estimate = estimate_shipping(
            &Catalog::builtin(),
            &ShippingRules::default(),
            &request("FashionHub", 35.99),
        );

        assert!(estimate.available);
        assert!(!estimate.free_shipping);
        assert_eq!(estimate.cost, 5.99);
        assert_eq!(estimate.estimated_days, 5);
        assert_eq!(estimate.estimated_delivery_date, date(2026, 10, 24));
    }

    #[rstest]
    #[case("SiteB", 80.0)]
    #[case("SiteA", 79.99)]
    #[case("sneakerworld", 75.0)]
    fn test_free_shipping_at_threshold(#[case] store: &str, #[case] price: f64) {
        let estimate = estimate_shipping(
            &Catalog::builtin(),
            &ShippingRules::default(),
            &request(store, price),
        );

        assert_eq!(estimate.cost, 0.0);
        assert_eq!(estimate.estimated_days, 3);
        assert_eq!(estimate.estimated_delivery_date, date(2026, 10, 22));
    }

    #[test]
    fn test_destination_is_a_label_by_default() {
        let mut req = request("SiteA", 10.0);
        req.destination = "Anchorage";
        let estimate = estimate_shipping(&Catalog::builtin(), &ShippingRules::default(), &req);

        assert_eq!(estimate.cost, 4.99);
        assert_eq!(estimate.estimated_days, 5);
        assert_eq!(estimate.destination, "Anchorage");
    }

    #[test]
    fn test_remote_surcharge() {
        let rules = ShippingRules {
            remote_surcharge: 10.0,
            remote_extra_days: 2,
            ..Default::default()
        };
        let mut req = request("SiteA", 10.0);
        req.destination = "Anchorage";
        let estimate = estimate_shipping(&Catalog::builtin(), &rules, &req);

        assert!((estimate.cost - 14.99).abs() < 1e-9);
        assert_eq!(estimate.estimated_days, 7);

        // home region is matched case-insensitively
        req.destination = "new york";
        let estimate = estimate_shipping(&Catalog::builtin(), &rules, &req);
        assert_eq!(estimate.cost, 4.99);
    }

    #[test]
    fn test_unknown_store_ships_free() {
        let estimate = estimate_shipping(
            &Catalog::builtin(),
            &ShippingRules::default(),
            &request("Nowhere", 10.0),
        );
        assert!(estimate.available);
        assert_eq!(estimate.cost, 0.0);
    }

    #[rstest]
    #[case(Weekday::Fri, date(2026, 10, 23))]
    #[case(Weekday::Mon, date(2026, 10, 26))]
    #[case(Weekday::Tue, date(2026, 10, 20))]
    fn test_next_weekday(#[case] weekday: Weekday, #[case] expected: NaiveDate) {
        assert_eq!(next_weekday(date(2026, 10, 19), weekday), expected);
    }

    #[test]
    fn test_deadline_verdict() {
        let catalog = Catalog::builtin();
        let rules = ShippingRules::default();

        // free shipping: Monday + 3 = Thursday, before Friday
        let mut req = request("SneakerWorld", 80.0);
        req.deadline = Some(Weekday::Fri);
        assert_eq!(estimate_shipping(&catalog, &rules, &req).meets_deadline, Some(true));

        // paid shipping: Monday + 5 = Saturday, after Friday
        let mut req = request("SneakerWorld", 65.99);
        req.deadline = Some(Weekday::Fri);
        assert_eq!(estimate_shipping(&catalog, &rules, &req).meets_deadline, Some(false));
    }

    #[test]
    fn test_tool_execution() {
        let tool = EstimateShippingTool::new(
            Arc::new(Catalog::builtin()),
            ShippingRules::default(),
            "New York".to_string(),
        );
        let result = tool
            .execute(json!({
                "store": "FashionHub",
                "price": 35.99,
                "today": "2026-10-19",
                "deadline": "friday"
            }))
            .unwrap();

        assert_eq!(result["cost"], 5.99);
        assert_eq!(result["estimated_delivery_date"], "2026-10-24");
        assert_eq!(result["destination"], "New York");
        assert_eq!(result["meets_deadline"], false);
    }

    #[rstest]
    #[case("fri")]
    #[case("Friday")]
    #[case("FRIDAY")]
    fn test_tool_deadline_names(#[case] deadline: &str) {
        let tool = EstimateShippingTool::new(
            Arc::new(Catalog::builtin()),
            ShippingRules::default(),
            "New York".to_string(),
        );
        let result = tool
            .execute(json!({
                "store": "SneakerWorld",
                "price": 80.0,
                "today": "2026-10-19",
                "deadline": deadline
            }))
            .unwrap();
        assert_eq!(result["meets_deadline"], true);
    }

    #[test]
    fn test_tool_rejects_unknown_weekday() {
        let tool = EstimateShippingTool::new(
            Arc::new(Catalog::builtin()),
            ShippingRules::default(),
            "New York".to_string(),
        );
        let result = tool.execute(json!({
            "store": "SiteA",
            "price": 1.0,
            "today": "2026-10-19",
            "deadline": "someday"
        }));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_tool_rejects_bad_date() {
        let tool = EstimateShippingTool::new(
            Arc::new(Catalog::builtin()),
            ShippingRules::default(),
            "New York".to_string(),
        );
        let result = tool.execute(json!({"store": "SiteA", "price": 1.0, "today": "tomorrow"}));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
