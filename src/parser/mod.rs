//! Query Parser
//!
//! Turns a free-text shopping request into [`Criteria`]. Parsing is an ordered
//! list of independent field rules plus three closed vocabularies (colors,
//! product types, store names). There is no fuzzy matching: a field is either
//! found by its marker or left unset.
//!
//! ```ignore
//! let parser = QueryParser::new(&ParserConfig::default(), catalog.store_names())?;
//! let criteria = parser.parse("white sneakers (size 8) under $70");
//! assert_eq!(criteria.max_price, Some(70.0));
//! ```

use crate::config::ParserConfig;
use crate::types::{AppError, Result};
use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Structured filters and intents extracted from one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Product type, matched as a substring of product names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    /// Destination after "shipping to"; the configured default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// First catalog store named in the query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Weekday the order should arrive by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Weekday>,
    #[serde(default)]
    pub wants_comparison: bool,
    #[serde(default)]
    pub wants_return_policy: bool,
}

impl Criteria {
    /// True when any search filter is present.
    pub fn has_product_filter(&self) -> bool {
        self.product.is_some()
            || self.color.is_some()
            || self.size.is_some()
            || self.max_price.is_some()
            || self.min_price.is_some()
    }

    /// True when nothing at all was recognized.
    pub fn is_empty(&self) -> bool {
        *self == Criteria::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    MaxPrice,
    MinPrice,
    Size,
    DiscountCode,
    Location,
    Deadline,
}

/// A marker pattern; the first participating group carries the value.
#[derive(Debug)]
struct Rule {
    field: Field,
    pattern: Regex,
}

/// Words that end a captured destination
const STOP_WORDS: &[&str] = &[
    "by", "before", "within", "for", "and", "with", "please", "in", "at", "on", "from",
    "under", "below", "over", "above", "less", "more", "size", "code", "promo", "discount",
];

/// Rule-based query parser.
#[derive(Debug)]
pub struct QueryParser {
    rules: Vec<Rule>,
    colors: Vec<(String, Regex)>,
    product_types: Vec<(String, Regex)>,
    stores: Vec<(String, Regex)>,
    comparison_phrases: Vec<String>,
}

impl QueryParser {
    /// Build a parser for the given vocabulary and store names.
    pub fn new<'a>(
        config: &ParserConfig,
        store_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let rules = [
            (
                Field::MaxPrice,
                r"\b(?:under|below|less than)\s*\$(?:\s*(\d+(?:\.\d+)?))?",
            ),
            (
                Field::MinPrice,
                r"\b(?:over|above|more than)\s*\$(?:\s*(\d+(?:\.\d+)?))?",
            ),
            (Field::Size, r"\bsize\b(?:\s+(\w+))?"),
            (
                Field::DiscountCode,
                r#"\bcode\s*['"](\w+)|\b(?:promo|discount)\s+code\b(?:\s+['"]?(\w+))?"#,
            ),
            (
                Field::Location,
                r"\b(?:shipping|ship|deliver|delivery)\s+to\b(?:\s+([a-z][a-z ]*))?",
            ),
            (
                Field::Deadline,
                r"\bby\s+((?:mon|tues|wednes|thurs|fri|satur|sun)day)\b",
            ),
        ]
        .into_iter()
        .map(|(field, pattern)| {
            Ok(Rule {
                field,
                pattern: compile(&format!("(?i){}", pattern))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

        let colors = vocabulary(&config.colors, "")?;
        let product_types = vocabulary(&config.product_types, "(?:e?s)?")?;
        let stores = store_names
            .into_iter()
            .map(|s| Ok((s.to_string(), word_pattern(s, "")?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            colors,
            product_types,
            stores,
            comparison_phrases: config
                .comparison_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        })
    }

    /// Extract criteria from a query. Never fails: unrecognized or malformed
    /// markers leave their field unset.
    pub fn parse(&self, query: &str) -> Criteria {
        let mut criteria = Criteria::default();

        for rule in &self.rules {
            let mut matched = false;
            let value = rule.pattern.captures_iter(query).find_map(|caps| {
                matched = true;
                caps.iter().skip(1).flatten().next().map(|m| m.as_str())
            });

            match value {
                Some(value) => apply(&mut criteria, rule.field, value),
                None if matched => {
                    warn!(field = ?rule.field, "marker without a value, ignoring")
                }
                None => {}
            }
        }

        criteria.color = first_match(&self.colors, query);
        criteria.product = first_match(&self.product_types, query);
        criteria.store = first_match(&self.stores, query);

        let lowered = query.to_lowercase();
        criteria.wants_comparison = self
            .comparison_phrases
            .iter()
            .any(|p| lowered.contains(p.as_str()));
        criteria.wants_return_policy = lowered.contains("return");

        debug!(?criteria, "parsed query");
        criteria
    }
}

fn apply(criteria: &mut Criteria, field: Field, value: &str) {
    match field {
        Field::MaxPrice => criteria.max_price = parse_amount(value),
        Field::MinPrice => criteria.min_price = parse_amount(value),
        Field::Size => criteria.size = Some(value.to_string()),
        Field::DiscountCode => criteria.discount_code = Some(value.to_string()),
        Field::Location => criteria.location = trim_location(value),
        Field::Deadline => criteria.deadline = value.parse::<Weekday>().ok(),
    }
}

fn parse_amount(value: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(amount) => Some(amount),
        Err(e) => {
            warn!(value, error = %e, "unparseable amount, ignoring");
            None
        }
    }
}

/// Cut a captured destination at the first stop word.
fn trim_location(value: &str) -> Option<String> {
    let words: Vec<&str> = value
        .split_whitespace()
        .take_while(|w| !STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

fn first_match(vocabulary: &[(String, Regex)], query: &str) -> Option<String> {
    vocabulary
        .iter()
        .find(|(_, pattern)| pattern.is_match(query))
        .map(|(word, _)| word.clone())
}

fn vocabulary(words: &[String], suffix: &str) -> Result<Vec<(String, Regex)>> {
    words
        .iter()
        .map(|w| Ok((w.to_lowercase(), word_pattern(w, suffix)?)))
        .collect()
}

fn word_pattern(word: &str, suffix: &str) -> Result<Regex> {
    compile(&format!(r"(?i)\b{}{}\b", regex::escape(word), suffix))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| AppError::Config(format!("Invalid parser pattern '{}': {}", pattern, e)))
}
