//! Configuration management
//!
//! Settings are read from a TOML or JSON file and can be overridden with
//! environment variables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

const ENV_BRAND: &str = "TWEET_TOKENIZER_BRAND";
const ENV_PRESERVE_CASE: &str = "TWEET_TOKENIZER_PRESERVE_CASE";
const ENV_LOG_LEVEL: &str = "TWEET_TOKENIZER_LOG_LEVEL";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tokenizer configuration
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Tokenizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Tracked brand name
    #[serde(default = "default_brand")]
    pub brand: String,

    /// Keep token case (emoticons always keep theirs)
    #[serde(default = "default_preserve_case")]
    pub preserve_case: bool,

    /// Remove links before tokenizing
    #[serde(default)]
    pub strip_urls: bool,
}

fn default_brand() -> String {
    "Apple".to_string()
}

fn default_preserve_case() -> bool {
    true
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            preserve_case: default_preserve_case(),
            strip_urls: false,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Check that the configuration can build a tokenizer
    pub fn validate(&self) -> Result<()> {
        if self.tokenizer.brand.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "tokenizer.brand must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `TWEET_TOKENIZER_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides looked up by variable name.
    ///
    /// A `TWEET_TOKENIZER_PRESERVE_CASE` value other than `true` or `false` is
    /// ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(brand) = lookup(ENV_BRAND) {
            self.tokenizer.brand = brand;
        }

        if let Some(value) = lookup(ENV_PRESERVE_CASE) {
            match value.parse() {
                Ok(preserve) => self.tokenizer.preserve_case = preserve,
                Err(_) => warn!(
                    variable = ENV_PRESERVE_CASE,
                    value = %value,
                    "ignoring override, expected true or false"
                ),
            }
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
    }
}

/// Parse configuration text; JSON if it looks like an object, TOML otherwise
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let config: AppConfig = if content.trim_start().starts_with('{') {
        serde_json::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?
    } else {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration from environment variables
pub fn load_config_from_env() -> AppConfig {
    let mut config = AppConfig::default();
    config.apply_env_overrides();
    config
}
