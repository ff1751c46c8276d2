use crate::catalog::Catalog;
use crate::config::AssistantConfig;
use crate::types::{AppError, Result, ToolDefinition};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A named capability invoked with JSON arguments.
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, args: Value) -> Result<Value>;
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with every shopping tool bound to `catalog`
    pub fn with_default_tools(catalog: Arc<Catalog>, config: &AssistantConfig) -> Self {
        use crate::tools::{compare, discount, returns, search, shipping};

        let mut registry = Self::new();

        registry.register(Arc::new(search::SearchProductsTool::new(catalog.clone())));
        registry.register(Arc::new(shipping::EstimateShippingTool::new(
            catalog.clone(),
            config.shipping.clone(),
            config.default_location.clone(),
        )));

        registry.register(Arc::new(discount::CheckDiscountTool::new(catalog.clone())));
        registry.register(Arc::new(discount::ApplyPromoCodeTool::new(catalog.clone())));

        registry.register(Arc::new(compare::ComparePricesTool::new(
            catalog.clone(),
            compare::ComparisonHasher::new(config.comparison_seed),
        )));

        registry.register(Arc::new(returns::GetReturnPolicyTool::new(catalog.clone())));
        registry.register(Arc::new(returns::CheckReturnPolicyTool::new(catalog)));

        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Tool definitions sorted by name
    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub fn execute(&self, name: &str, args: Value) -> Result<Value> {
        match self.tools.get(name) {
            Some(tool) => {
                tracing::debug!(tool = name, %args, "executing tool");
                tool.execute(args)
            }
            None => Err(AppError::NotFound(format!("Tool not found: {}", name))),
        }
    }

    /// Get a sorted list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

/// Deserialize a tool's argument object, reporting failures as invalid input.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("{}: {}", tool, e)))
}
