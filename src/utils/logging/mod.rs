//! Logging utilities
//!
//! Installs the global `tracing` subscriber used by the binary. The library
//! itself only emits events; embedding applications bring their own subscriber.

use crate::utils::error::{GateError, Result};
use tracing_subscriber::EnvFilter;

/// Subscriber settings
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Default filter directive, used when `RUST_LOG` is unset
    pub level: String,
    /// Emit newline-delimited JSON instead of human-readable lines
    pub json: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Build the filter, preferring `RUST_LOG` over the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| GateError::config(format!("Invalid log filter '{}': {}", level, e))),
    }
}

/// Install the global subscriber
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let filter = build_filter(&options.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if options.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| GateError::internal(format!("Failed to install logger: {}", e)))
}
