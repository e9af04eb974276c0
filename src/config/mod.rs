//! # Relay Configuration
//!
//! Layered configuration for the dispatch core and its logging.
//!
//! ## Sources
//!
//! Values are merged in order, later sources winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`config/relay.toml` unless a path is given)
//! 3. `RELAY_*` environment variables, with `__` separating nested keys
//!    (`RELAY_LOGGING__LEVEL=info`, `RELAY_DISPATCH__WARN_ON_DUPLICATE_CONTEXT=false`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use relay_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let json_logs = manager.config().logging.json;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure mirroring relay.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Deployment environment (development, test, production)
    pub environment: String,

    /// Structured logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Registry behaviour settings
    #[serde(default)]
    pub dispatch: DispatchSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Explicit level; derived from the environment when absent
    #[serde(default)]
    pub level: Option<String>,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DispatchSettings {
    /// Log a warning when a context registers twice for the same notification
    pub warn_on_duplicate_context: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            warn_on_duplicate_context: true,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            logging: LoggingConfig::default(),
            dispatch: DispatchSettings::default(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.environment.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "environment",
                "root configuration",
            ));
        }

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ConfigurationError::invalid_value(
                    "logging.level",
                    level.clone(),
                    format!("expected one of {}", LOG_LEVELS.join(", ")),
                ));
            }
        }

        Ok(())
    }

    /// Effective log level: the configured one, else derived from the environment
    pub fn log_level(&self) -> String {
        match &self.logging.level {
            Some(level) => level.to_ascii_lowercase(),
            None => match self.environment.as_str() {
                "production" => "info".to_string(),
                _ => "debug".to_string(),
            },
        }
    }
}
