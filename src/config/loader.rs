//! Configuration Loader
//!
//! Environment-aware configuration loading built on the `config` crate.
//! Handles environment detection, optional file discovery, and `RELAY_*` overrides.

use super::error::ConfigResult;
use super::DispatchConfig;
use config::{Config, Environment, File, FileFormat};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config/relay.toml";
const ENV_PREFIX: &str = "RELAY";

pub struct ConfigManager {
    config: DispatchConfig,
    environment: String,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_file(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(config_path: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_file_with_env(config_path, &environment)
    }

    /// Load configuration from a specific file with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_file_with_env(
        config_path: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        debug!(
            environment = environment,
            config_path = %config_path.display(),
            "Loading relay configuration"
        );

        let config = Self::build_config(&config_path, environment)?;
        config.validate()?;

        debug!(
            "Configuration loaded successfully: {}",
            serde_json::to_string(&config).unwrap_or_else(|_| "[serialization error]".to_string())
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_path,
        }))
    }

    fn build_config(config_path: &Path, environment: &str) -> ConfigResult<DispatchConfig> {
        let defaults = DispatchConfig::default();

        let config = Config::builder()
            .set_default("logging.json", defaults.logging.json)?
            .set_default(
                "dispatch.warn_on_duplicate_context",
                defaults.dispatch.warn_on_duplicate_context,
            )?
            .add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", environment)?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Detect the environment from `RELAY_ENV`, then `APP_ENV`
    pub fn detect_environment() -> String {
        env::var("RELAY_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// JSON view of the loaded configuration for diagnostics
    pub fn debug_config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
