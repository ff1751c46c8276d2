//! Plain-text rendering of a [`ShoppingReport`]
//!
//! Output has no colour codes; the CLI styles around it, never inside it.

use crate::agents::{Offer, OfferSource, PolicyLookup, ShoppingReport};
use crate::tools::returns::{summarize, NO_POLICY_FOUND};
use chrono::Weekday;
use std::fmt::Write;

/// Whole response when a search matched nothing
pub const NO_PRODUCTS_FOUND: &str = "Sorry, no products found matching your criteria.";

/// Render the report as numbered offer blocks followed by the optional
/// return-policy section.
pub fn render_report(report: &ShoppingReport, currency: &str) -> String {
    let mut sections = Vec::new();

    if report.offers.is_empty() {
        if report.searched || report.return_policy.is_none() {
            sections.push(NO_PRODUCTS_FOUND.to_string());
        }
    } else {
        sections.push(render_offers(report, currency));
    }

    if let Some(lookup) = &report.return_policy {
        sections.push(render_policy_section(lookup));
    }

    sections.join("\n\n")
}

fn render_offers(report: &ShoppingReport, currency: &str) -> String {
    let products = report.product_count();
    let comparisons = report.offers.len() - products;

    let mut out = if comparisons > 0 {
        format!("Found {products} matching product(s) and {comparisons} price comparisons:\n")
    } else {
        format!("Found {products} matching product(s):\n")
    };

    for (i, offer) in report.offers.iter().enumerate() {
        out.push('\n');
        render_offer(&mut out, i + 1, offer, currency);
    }

    out.trim_end().to_string()
}

fn render_offer(out: &mut String, number: usize, offer: &Offer, currency: &str) {
    let tag = match offer.source {
        OfferSource::Listing => "",
        OfferSource::Comparison => " (price comparison)",
    };
    let stock = if offer.in_stock {
        "in stock"
    } else {
        "out of stock"
    };

    let _ = writeln!(out, "{number}. {} from {}{tag}", offer.name, offer.store);
    let _ = writeln!(out, "   {}, size {}, {stock}", offer.color, offer.size);
    let _ = writeln!(out, "   Price: {}", money(currency, offer.price));

    if let Some(discount) = &offer.discount {
        let code = discount.code.as_deref().unwrap_or_default();
        if discount.valid {
            let _ = writeln!(
                out,
                "   Discount: code '{code}' applied for {}% off. Final price: {}",
                discount.discount_percentage,
                money(currency, offer.final_price)
            );
        } else {
            let _ = writeln!(out, "   Discount: code '{code}' is invalid.");
        }
    }

    let shipping = &offer.shipping;
    let cost = if shipping.free_shipping && shipping.cost == 0.0 {
        "free".to_string()
    } else {
        money(currency, shipping.cost)
    };
    let mut line = format!(
        "   Shipping to {}: {cost}, estimated delivery {} ({} days)",
        shipping.destination, shipping.estimated_delivery_date, shipping.estimated_days
    );
    if let (Some(day), Some(meets)) = (shipping.deadline, shipping.meets_deadline) {
        let verdict = if meets { "arrives by" } else { "will not arrive by" };
        let _ = write!(line, ", {verdict} {}", weekday_name(day));
    }
    let _ = writeln!(out, "{line}");

    let policy = offer
        .return_policy
        .as_ref()
        .map(summarize)
        .unwrap_or_else(|| NO_POLICY_FOUND.to_string());
    let _ = writeln!(out, "   Return policy: {policy}");

    if let Some(link) = &offer.link {
        let _ = writeln!(out, "   Link: {link}");
    }
}

fn render_policy_section(lookup: &PolicyLookup) -> String {
    let Some(policy) = &lookup.policy else {
        return format!("No return policy found for {}.", lookup.store);
    };

    let mut out = format!("Return Policy for {}:\n", policy.store);
    let _ = writeln!(out, "- {} days to return", policy.days_to_return);
    let _ = writeln!(
        out,
        "- {}",
        if policy.free_returns {
            "Free returns"
        } else {
            "Paid returns"
        }
    );
    if !policy.conditions.is_empty() {
        out.push_str("- Conditions:\n");
        for condition in &policy.conditions {
            let _ = writeln!(out, "  * {condition}");
        }
    }

    out.trim_end().to_string()
}

fn money(currency: &str, amount: f64) -> String {
    format!("{currency}{amount:.2}")
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::tools::discount::check_discount;
    use crate::tools::shipping::ShippingEstimate;
    use chrono::NaiveDate;

    fn skirt_offer() -> Offer {
        let catalog = Catalog::builtin();
        Offer {
            product_id: "1".to_string(),
            name: "Floral Summer Skirt".to_string(),
            store: "FashionHub".to_string(),
            color: "Blue".to_string(),
            size: "S".to_string(),
            in_stock: true,
            source: OfferSource::Listing,
            price: 35.99,
            discount: Some(check_discount(&catalog, 35.99, Some("SAVE10"))),
            final_price: 32.391,
            shipping: ShippingEstimate {
                available: true,
                cost: 5.99,
                free_shipping: false,
                estimated_days: 5,
                estimated_delivery_date: NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
                destination: "New York".to_string(),
                deadline: Some(Weekday::Fri),
                meets_deadline: Some(false),
            },
            return_policy: catalog.store("FashionHub").map(|s| s.return_policy.clone()),
            link: None,
        }
    }

    #[test]
    fn test_empty_search_is_exact_sentence() {
        let report = ShoppingReport {
            searched: true,
            ..Default::default()
        };
        assert_eq!(render_report(&report, "$"), NO_PRODUCTS_FOUND);
        assert_eq!(render_report(&ShoppingReport::default(), "$"), NO_PRODUCTS_FOUND);
    }

    #[test]
    fn test_offer_block() {
        let report = ShoppingReport {
            searched: true,
            offers: vec![skirt_offer()],
            return_policy: None,
        };
        let text = render_report(&report, "$");

        assert!(text.starts_with("Found 1 matching product(s):\n\n1. Floral Summer Skirt from FashionHub"));
        assert!(text.contains("Blue, size S, in stock"));
        assert!(text.contains("Price: $35.99"));
        assert!(text.contains("code 'SAVE10' applied for 10% off. Final price: $32.39"));
        assert!(text.contains(
            "Shipping to New York: $5.99, estimated delivery 2026-10-24 (5 days), will not arrive by Friday"
        ));
        assert!(text.contains("Return policy: 30-day returns, free returns"));
        assert!(!text.contains("Link:"));
    }

    #[test]
    fn test_comparison_offer_and_free_shipping() {
        let mut comparison = skirt_offer();
        comparison.source = OfferSource::Comparison;
        comparison.store = "SiteB".to_string();
        comparison.in_stock = false;
        comparison.discount = None;
        comparison.shipping.cost = 0.0;
        comparison.shipping.free_shipping = true;
        comparison.shipping.deadline = None;
        comparison.shipping.meets_deadline = None;
        comparison.return_policy = None;
        comparison.link = Some("https://siteb.com/products/floral-summer-skirt".to_string());

        let report = ShoppingReport {
            searched: true,
            offers: vec![skirt_offer(), comparison],
            return_policy: None,
        };
        let text = render_report(&report, "€");

        assert!(text.starts_with("Found 1 matching product(s) and 1 price comparisons:"));
        assert!(text.contains("2. Floral Summer Skirt from SiteB (price comparison)"));
        assert!(text.contains("out of stock"));
        assert!(text.contains("Price: €35.99"));
        assert!(text.contains("Shipping to New York: free, estimated delivery 2026-10-24 (5 days)\n"));
        assert!(text.contains("Return policy: No policy found"));
        assert!(text.ends_with("Link: https://siteb.com/products/floral-summer-skirt"));
    }

    #[test]
    fn test_invalid_discount_line() {
        let mut offer = skirt_offer();
        offer.discount = Some(check_discount(&Catalog::builtin(), 35.99, Some("BOGUS")));
        offer.final_price = 35.99;
        let report = ShoppingReport {
            searched: true,
            offers: vec![offer],
            return_policy: None,
        };

        assert!(render_report(&report, "$").contains("Discount: code 'BOGUS' is invalid."));
    }

    #[test]
    fn test_policy_section() {
        let catalog = Catalog::builtin();
        let report = ShoppingReport {
            searched: false,
            offers: Vec::new(),
            return_policy: Some(PolicyLookup {
                store: "SiteA".to_string(),
                policy: catalog.store("SiteA").map(|s| s.return_policy.clone()),
            }),
        };

        assert_eq!(
            render_report(&report, "$"),
            "Return Policy for SiteA:\n\
             - 14 days to return\n\
             - Paid returns\n\
             - Conditions:\n  \
             * Store credit only\n  \
             * Within 14 days"
        );
    }

    #[test]
    fn test_unknown_policy_store() {
        let report = ShoppingReport {
            searched: false,
            offers: Vec::new(),
            return_policy: Some(PolicyLookup {
                store: "Nowhere".to_string(),
                policy: None,
            }),
        };
        assert_eq!(render_report(&report, "$"), "No return policy found for Nowhere.");
    }
}
