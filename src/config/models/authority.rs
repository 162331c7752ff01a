//! Session authority configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration of the built-in session authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// Whether the session starts logged in
    #[serde(default)]
    pub logged_in: bool,
    /// Delay before each answer, in milliseconds
    #[serde(default = "default_authority_latency_ms")]
    pub latency_ms: u64,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            logged_in: false,
            latency_ms: default_authority_latency_ms(),
        }
    }
}

impl AuthorityConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
