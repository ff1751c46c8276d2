use crate::agents::{
    AgentResponse, Offer, OfferSource, PolicyLookup, ShoppingReport, ToolCallRecord,
};
use crate::catalog::{Catalog, Product};
use crate::config::AssistantConfig;
use crate::parser::{Criteria, QueryParser};
use crate::render::render_report;
use crate::tools::compare::{compare_prices, ComparisonHasher};
use crate::tools::discount::check_discount;
use crate::tools::returns::get_return_policy;
use crate::tools::search::{search_products, SearchFilter};
use crate::tools::shipping::{estimate_shipping, ShippingRequest};
use crate::types::Result;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Orchestrates parser, tools and renderer for one query at a time.
pub struct ShoppingAgent {
    config: AssistantConfig,
    catalog: Arc<Catalog>,
    parser: QueryParser,
    hasher: ComparisonHasher,
    /// Fixed order date; the local date is used when unset
    today: Option<NaiveDate>,
}

/// One priced listing, before discount, shipping and policy are attached.
struct Listing<'a> {
    product: &'a Product,
    store: &'a str,
    price: f64,
    in_stock: bool,
    source: OfferSource,
    link: Option<String>,
}

impl ShoppingAgent {
    pub fn new(config: AssistantConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let parser = QueryParser::new(&config.parser, catalog.store_names())?;
        let hasher = ComparisonHasher::new(config.comparison_seed);

        Ok(Self {
            config,
            catalog,
            parser,
            hasher,
            today: None,
        })
    }

    /// Build an agent over the catalog the configuration points at
    pub fn from_config(config: AssistantConfig) -> Result<Self> {
        let catalog = Arc::new(config.catalog()?);
        Self::new(config, catalog)
    }

    /// Pin the order date used for delivery estimates
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn parse(&self, query: &str) -> Criteria {
        self.parser.parse(query)
    }

    /// Parse, run the tools and render a response
    pub fn process_query(&self, query: &str) -> AgentResponse {
        let criteria = self.parse(query);
        let mut tool_calls = Vec::new();
        let report = self.execute_plan(&criteria, &mut tool_calls);
        let content = render_report(&report, &self.config.currency_symbol);

        info!(
            searched = report.searched,
            offers = report.offers.len(),
            tool_calls = tool_calls.len(),
            "processed query"
        );

        AgentResponse {
            query: query.to_string(),
            criteria,
            report,
            content,
            tool_calls,
        }
    }

    /// Run the fixed tool sequence for `criteria`, recording every call.
    ///
    /// Search runs only when a product filter is present. Comparison offers are
    /// added per matched product when the query asks for them, and the
    /// dedicated policy section needs both a return question and a named store.
    pub fn execute_plan(
        &self,
        criteria: &Criteria,
        calls: &mut Vec<ToolCallRecord>,
    ) -> ShoppingReport {
        let today = self.today();
        let destination = criteria
            .location
            .as_deref()
            .unwrap_or(&self.config.default_location);

        let searched = criteria.has_product_filter();
        let mut offers = Vec::new();

        if searched {
            let filter = SearchFilter::from(criteria);
            let products = record(
                calls,
                "search_products",
                serde_json::to_value(&filter).unwrap_or_default(),
                || search_products(&self.catalog, &filter),
            );

            for product in products {
                let listing = Listing {
                    product,
                    store: &product.store,
                    price: product.price,
                    in_stock: product.in_stock,
                    source: OfferSource::Listing,
                    link: None,
                };
                offers.push(self.build_offer(listing, criteria, destination, today, calls));

                if !criteria.wants_comparison {
                    continue;
                }

                let comparisons = record(
                    calls,
                    "compare_prices",
                    json!({ "product_id": product.id }),
                    || compare_prices(&self.catalog, &self.hasher, product),
                );
                for comparison in &comparisons {
                    let listing = Listing {
                        product,
                        store: &comparison.store,
                        price: comparison.price,
                        in_stock: comparison.in_stock,
                        source: OfferSource::Comparison,
                        link: Some(comparison.link.clone()),
                    };
                    offers.push(self.build_offer(listing, criteria, destination, today, calls));
                }
            }
        }

        let return_policy = match (&criteria.store, criteria.wants_return_policy) {
            (Some(store), true) => {
                let policy = record(calls, "get_return_policy", json!({ "store": store }), || {
                    get_return_policy(&self.catalog, store).cloned()
                });
                Some(PolicyLookup {
                    store: store.clone(),
                    policy,
                })
            }
            _ => None,
        };

        ShoppingReport {
            searched,
            offers,
            return_policy,
        }
    }

    fn build_offer(
        &self,
        listing: Listing<'_>,
        criteria: &Criteria,
        destination: &str,
        today: NaiveDate,
        calls: &mut Vec<ToolCallRecord>,
    ) -> Offer {
        let price = listing.price;

        let discount = criteria.discount_code.as_deref().map(|code| {
            record(
                calls,
                "check_discount",
                json!({ "price": price, "code": code }),
                || check_discount(&self.catalog, price, Some(code)),
            )
        });
        let final_price = discount.as_ref().map_or(price, |d| d.final_price);

        let request = ShippingRequest {
            store: listing.store,
            price,
            destination,
            today,
            deadline: criteria.deadline,
        };
        let shipping = record(
            calls,
            "estimate_shipping",
            json!({
                "store": request.store,
                "price": price,
                "location": destination,
                "today": today.to_string(),
                "deadline": criteria.deadline.map(|d| d.to_string()),
            }),
            || estimate_shipping(&self.catalog, &self.config.shipping, &request),
        );

        let return_policy = record(
            calls,
            "get_return_policy",
            json!({ "store": listing.store }),
            || get_return_policy(&self.catalog, listing.store).cloned(),
        );

        Offer {
            product_id: listing.product.id.clone(),
            name: listing.product.name.clone(),
            store: listing.store.to_string(),
            color: listing.product.color.clone(),
            size: listing.product.size.clone(),
            in_stock: listing.in_stock,
            source: listing.source,
            price,
            discount,
            final_price,
            shipping,
            return_policy,
            link: listing.link,
        }
    }
}

/// Run one tool function and append its trace record.
fn record<T: Serialize>(
    calls: &mut Vec<ToolCallRecord>,
    name: &str,
    arguments: Value,
    run: impl FnOnce() -> T,
) -> T {
    let started = Instant::now();
    let output = run();
    let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    let result = serde_json::to_value(&output).unwrap_or_default();
    debug!(tool = name, %arguments, duration_us, "tool call");

    calls.push(ToolCallRecord {
        name: name.to_string(),
        arguments,
        result,
        duration_us,
    });
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NO_PRODUCTS_FOUND;

    fn agent() -> ShoppingAgent {
        ShoppingAgent::new(AssistantConfig::default(), Arc::new(Catalog::builtin()))
            .unwrap()
            .with_today(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_no_filters_means_no_search() {
        let response = agent().process_query("hello there");

        assert!(!response.report.searched);
        assert!(response.report.offers.is_empty());
        assert!(response.tool_calls.is_empty());
        assert_eq!(response.content, NO_PRODUCTS_FOUND);
    }

    #[test]
    fn test_tool_sequence_for_single_match() {
        let response = agent().process_query("floral skirt under $40 with code 'SAVE10'");
        let names: Vec<&str> = response.tool_calls.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "search_products",
                "check_discount",
                "estimate_shipping",
                "get_return_policy"
            ]
        );
        assert_eq!(response.tool_calls[0].result[0]["id"], "1");
    }

    #[test]
    fn test_no_discount_call_without_code() {
        let response = agent().process_query("blue jacket");
        assert!(response.tool_calls.iter().all(|c| c.name != "check_discount"));

        let offer = &response.report.offers[0];
        assert!(offer.discount.is_none());
        assert_eq!(offer.final_price, offer.price);
    }

    #[test]
    fn test_comparison_adds_one_offer_per_other_store() {
        let response = agent().process_query("casual denim jacket on SiteA, any better deals?");
        let report = &response.report;

        assert_eq!(report.offers.len(), 4);
        assert_eq!(report.offers[0].source, OfferSource::Listing);
        assert_eq!(report.offers[0].store, "SiteA");

        let stores: Vec<&str> = report.offers[1..].iter().map(|o| o.store.as_str()).collect();
        assert_eq!(stores, vec!["FashionHub", "SneakerWorld", "SiteB"]);
        assert!(report.offers[1..]
            .iter()
            .all(|o| o.source == OfferSource::Comparison && o.link.is_some()));
        assert_eq!(report.product_count(), 1);
    }

    #[test]
    fn test_comparison_offers_use_their_own_store_rules() {
        let response = agent().process_query("jacket, compare prices please");
        assert_eq!(response.report.offers.len(), 4);
        for offer in &response.report.offers {
            let policy = offer.return_policy.as_ref().unwrap();
            assert_eq!(policy.store, offer.store);
        }
    }

    #[test]
    fn test_policy_section_requires_named_store() {
        let with_store = agent().process_query("Do returns work at SiteB?");
        let lookup = with_store.report.return_policy.unwrap();
        assert_eq!(lookup.store, "SiteB");
        assert_eq!(lookup.policy.map(|p| p.days_to_return), Some(30));

        let without_store = agent().process_query("Do you accept returns?");
        assert!(without_store.report.return_policy.is_none());
    }

    #[test]
    fn test_location_defaults_to_config() {
        let response = agent().process_query("white sneakers");
        assert_eq!(response.report.offers[0].shipping.destination, "New York");

        let response = agent().process_query("white sneakers, shipping to Denver.");
        assert_eq!(response.report.offers[0].shipping.destination, "Denver");
    }
}
