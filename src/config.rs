//! Tunable settings, loadable from YAML.
//!
//! Every field has a default matching the site's behaviour, so a config
//! file only needs the values it changes:
//!
//! ```
//! use odin_recipes::Config;
//!
//! let config = Config::from_yaml_str("related_count: 6")?;
//! assert_eq!(config.related_count, 6);
//! assert_eq!(config.shopping_list_key, "shoppingList");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::related::DEFAULT_RELATED_COUNT;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SHOPPING_LIST_KEY: &str = "shoppingList";
pub const COOK_MODE_KEY: &str = "cookMode";
/// Recipe shown when a page name matches nothing (Egusi Soup).
pub const DEFAULT_RECIPE_ID: u32 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage key of the shopping list blob
    pub shopping_list_key: String,
    /// Storage key of the cook mode flag
    pub cook_mode_key: String,
    pub related_count: usize,
    /// How many recipes a "random picks" view shows
    pub random_count: usize,
    pub default_recipe_id: u32,
    pub contact: ContactLimits,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shopping_list_key: SHOPPING_LIST_KEY.to_string(),
            cook_mode_key: COOK_MODE_KEY.to_string(),
            related_count: DEFAULT_RELATED_COUNT,
            random_count: 3,
            default_recipe_id: DEFAULT_RECIPE_ID,
            contact: ContactLimits::default(),
        }
    }
}

/// Message length thresholds of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactLimits {
    pub min_message_len: usize,
    pub warning_len: usize,
    pub max_len: usize,
}

impl Default for ContactLimits {
    fn default() -> Self {
        ContactLimits {
            min_message_len: 10,
            warning_len: 750,
            max_len: 900,
        }
    }
}

impl Config {
    /// Parses YAML text. Empty text yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
