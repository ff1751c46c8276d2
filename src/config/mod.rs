//! Configuration for the shopping assistant
//!
//! The assistant can be configured via:
//! - `shopping-assistant.toml` in the current directory
//! - an explicit `--config` path (or `SHOPPING_ASSISTANT_CONFIG`)
//! - command line overrides (`--location`, `--seed`)
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! built-in demonstration behavior.

use crate::catalog::Catalog;
use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "shopping-assistant.toml";

/// Destination assumed when a query does not say where to ship
pub const DEFAULT_LOCATION: &str = "New York";

/// Seed of the price-comparison hasher
pub const DEFAULT_COMPARISON_SEED: u64 = 0x5eed_c0de;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssistantConfig {
    /// Destination used when the query has no "shipping to"
    pub default_location: String,

    /// Prefix for every rendered amount
    pub currency_symbol: String,

    /// Seed for the deterministic price-comparison offsets
    pub comparison_seed: u64,

    /// Optional TOML catalog replacing the built-in tables
    pub catalog_path: Option<PathBuf>,

    /// Query parser vocabulary
    pub parser: ParserConfig,

    /// Shipping rule parameters
    pub shipping: ShippingRules,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            currency_symbol: "$".to_string(),
            comparison_seed: DEFAULT_COMPARISON_SEED,
            catalog_path: None,
            parser: ParserConfig::default(),
            shipping: ShippingRules::default(),
        }
    }
}

/// Closed vocabularies recognized by the query parser, in priority order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    pub colors: Vec<String>,
    pub product_types: Vec<String>,
    /// Phrases that ask for a price comparison
    pub comparison_phrases: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            colors: strings(&[
                "white", "black", "blue", "red", "green", "yellow", "purple", "pink",
            ]),
            product_types: strings(&["skirt", "sneakers", "jacket", "dress", "jeans"]),
            comparison_phrases: strings(&[
                "better deal",
                "price comparison",
                "compare",
                "cheaper",
            ]),
        }
    }
}

/// Parameters of the shipping estimate.
///
/// With the defaults the destination never changes the result: the surcharge
/// and extra days outside `home_region` are both zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShippingRules {
    /// Delivery days when shipping is free
    pub free_days: u32,
    /// Delivery days when shipping is paid
    pub paid_days: u32,
    /// Destination treated as local
    pub home_region: String,
    /// Flat cost added outside the home region
    pub remote_surcharge: f64,
    /// Days added outside the home region
    pub remote_extra_days: u32,
}

impl Default for ShippingRules {
    fn default() -> Self {
        Self {
            free_days: 3,
            paid_days: 5,
            home_region: DEFAULT_LOCATION.to_string(),
            remote_surcharge: 0.0,
            remote_extra_days: 0,
        }
    }
}

impl AssistantConfig {
    /// Load configuration from file
    ///
    /// An explicit path must exist. Without one, `shopping-assistant.toml` is
    /// used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });

        match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    AppError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let mut config = Self::from_toml_str(&content).map_err(|e| {
                    AppError::Config(format!("{} ({})", e, path.display()))
                })?;

                // Relative catalog paths are resolved against the config file
                if let (Some(catalog), Some(dir)) = (&config.catalog_path, path.parent()) {
                    if catalog.is_relative() {
                        config.catalog_path = Some(dir.join(catalog));
                    }
                }

                tracing::debug!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AssistantConfig = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.shipping.remote_surcharge < 0.0 {
            return Err(AppError::Config(
                "shipping.remote_surcharge must not be negative".to_string(),
            ));
        }
        if self.parser.colors.iter().any(|c| c.trim().is_empty())
            || self.parser.product_types.iter().any(|p| p.trim().is_empty())
        {
            return Err(AppError::Config(
                "parser vocabularies must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the catalog this configuration points at
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
