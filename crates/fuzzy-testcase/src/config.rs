//! Defaults for fuzzy assertions
//!
//! Read from environment variables or a YAML file:
//!
//! ```yaml
//! default_places: 10
//! message_limit: 2000
//! ```

use std::env;
use std::fs;
use std::path::Path;

use fuzzy_match::{DEFAULT_MESSAGE_LIMIT, DEFAULT_PLACES};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding [`FuzzyConfig::default_places`]
pub const PLACES_VAR: &str = "FUZZY_DEFAULT_PLACES";

/// Environment variable overriding [`FuzzyConfig::message_limit`]
pub const MESSAGE_LIMIT_VAR: &str = "FUZZY_MESSAGE_LIMIT";

/// Settings shared by the assertions of a test case
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuzzyConfig {
    /// Significant digits used when a comparison names no tolerance
    pub default_places: i32,
    /// Longest rendering of an operand in failure messages
    pub message_limit: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            default_places: DEFAULT_PLACES,
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }
}

impl FuzzyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(PLACES_VAR) {
            config.default_places = parse_var(PLACES_VAR, &raw)?;
        }
        if let Some(raw) = lookup(MESSAGE_LIMIT_VAR) {
            config.message_limit = parse_var(MESSAGE_LIMIT_VAR, &raw)?;
        }
        debug!(?config, "Loaded fuzzy config from environment");
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str, source_path: &Path) -> ConfigResult<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
                path: source_path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.message_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "message_limit".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Load configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<FuzzyConfig> {
    let path = path.as_ref();
    debug!("Loading fuzzy config: {:?}", path);

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    FuzzyConfig::from_yaml_str(&content, path)
}

/// Load configuration from YAML text
pub fn load_config_str(content: &str) -> ConfigResult<FuzzyConfig> {
    FuzzyConfig::from_yaml_str(content, Path::new("<string>"))
}

fn parse_var<T>(key: &str, raw: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
