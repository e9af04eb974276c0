//! # Structured Logging Module
//!
//! Environment-aware structured logging for registry and dispatch operations.

use crate::config::DispatchConfig;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging from configuration
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_structured_logging(config: &DispatchConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let log_level = config.log_level();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_level.clone()));

        let layer = if config.logging.json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // Use try_init to avoid panic if global subscriber already set
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %config.environment,
            level = %log_level,
            json = config.logging.json,
            "STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Log structured data for registry operations
pub fn log_registry_operation(
    operation: &str,
    multiton_key: &str,
    notification: Option<&str>,
    status: &str,
) {
    tracing::debug!(
        operation = %operation,
        multiton_key = %multiton_key,
        notification = notification,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}
