//! Gate configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Access gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Destination for denied requests
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Upper bound on a single authority check, in milliseconds
    #[serde(default = "default_authority_timeout_ms")]
    pub authority_timeout_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            authority_timeout_ms: default_authority_timeout_ms(),
        }
    }
}

impl GateConfig {
    pub fn authority_timeout(&self) -> Duration {
        Duration::from_millis(self.authority_timeout_ms)
    }
}
