//! Configuration management
//!
//! This module handles loading, validation, and management of the gate and
//! router configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::routing::RouteTable;
use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Prefix of every environment variable read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "ROUTE_GATE_";

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Access gate configuration
    #[serde(default)]
    pub gate: GateConfig,
    /// Session authority configuration
    #[serde(default)]
    pub authority: AuthorityConfig,
    /// Route table
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gate: GateConfig::default(),
            authority: AuthorityConfig::default(),
            routes: default_routes(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from defaults plus `ROUTE_GATE_*` overrides
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{}{}", ENV_PREFIX, suffix));
        let mut config = Self::default();

        if let Some(fallback) = var("FALLBACK") {
            config.gate.fallback = fallback;
        }
        if let Some(timeout) = var("AUTHORITY_TIMEOUT_MS") {
            config.gate.authority_timeout_ms = timeout
                .parse()
                .map_err(|e| GateError::Config(format!("Invalid authority timeout: {}", e)))?;
        }
        if let Some(logged_in) = var("LOGGED_IN") {
            config.authority.logged_in = logged_in
                .parse()
                .map_err(|e| GateError::Config(format!("Invalid logged-in flag: {}", e)))?;
        }
        if let Some(latency) = var("AUTHORITY_LATENCY_MS") {
            config.authority.latency_ms = latency
                .parse()
                .map_err(|e| GateError::Config(format!("Invalid authority latency: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get gate configuration
    pub fn gate(&self) -> &GateConfig {
        &self.gate
    }

    /// Get authority configuration
    pub fn authority(&self) -> &AuthorityConfig {
        &self.authority
    }

    /// Get the configured route definitions
    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    /// Compile the configured routes
    pub fn route_table(&self) -> Result<RouteTable> {
        RouteTable::from_config(&self.routes)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gate
            .validate()
            .map_err(|e| GateError::validation(format!("Gate config error: {}", e)))?;

        self.authority
            .validate()
            .map_err(|e| GateError::validation(format!("Authority config error: {}", e)))?;

        for route in &self.routes {
            route
                .validate()
                .map_err(|e| GateError::validation(format!("Route config error: {}", e)))?;
        }

        // Catches duplicates and conflicts that only show up once routes are flattened.
        self.route_table()
            .map_err(|e| GateError::validation(format!("Route table error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
