//! Return policy lookup

use crate::catalog::{Catalog, ReturnPolicy};
use crate::tools::registry::{parse_args, Tool};
use crate::types::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Summary returned for stores without a policy
pub const NO_POLICY_FOUND: &str = "No policy found";

/// The store's policy, or `None` for an unknown store.
pub fn get_return_policy<'a>(catalog: &'a Catalog, store: &str) -> Option<&'a ReturnPolicy> {
    catalog.store(store).map(|s| &s.return_policy)
}

/// One-line summary such as `30-day returns, free returns`.
pub fn check_return_policy(catalog: &Catalog, store: &str) -> String {
    get_return_policy(catalog, store)
        .map(summarize)
        .unwrap_or_else(|| NO_POLICY_FOUND.to_string())
}

pub fn summarize(policy: &ReturnPolicy) -> String {
    format!(
        "{}-day returns, {}",
        policy.days_to_return,
        if policy.free_returns {
            "free returns"
        } else {
            "paid returns"
        }
    )
}

#[derive(Debug, Deserialize)]
struct StoreArgs {
    store: String,
}

fn store_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "store": { "type": "string" }
        },
        "required": ["store"]
    })
}

pub struct GetReturnPolicyTool {
    catalog: Arc<Catalog>,
}

impl GetReturnPolicyTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for GetReturnPolicyTool {
    fn name(&self) -> &str {
        "get_return_policy"
    }

    fn description(&self) -> &str {
        "Get the full return policy of a store"
    }

    fn parameters_schema(&self) -> Value {
        store_schema()
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: StoreArgs = parse_args(self.name(), args)?;
        let policy = get_return_policy(&self.catalog, &args.store);

        Ok(json!({
            "store": args.store,
            "found": policy.is_some(),
            "policy": policy
        }))
    }
}

pub struct CheckReturnPolicyTool {
    catalog: Arc<Catalog>,
}

impl CheckReturnPolicyTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for CheckReturnPolicyTool {
    fn name(&self) -> &str {
        "check_return_policy"
    }

    fn description(&self) -> &str {
        "Summarize a store's return policy in one line"
    }

    fn parameters_schema(&self) -> Value {
        store_schema()
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: StoreArgs = parse_args(self.name(), args)?;
        let summary = check_return_policy(&self.catalog, &args.store);

        Ok(json!({
            "store": args.store,
            "summary": summary
        }))
    }
}
