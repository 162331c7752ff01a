//! Authority sources answering "is the current principal authenticated?"

use crate::config::AuthorityConfig;
use crate::utils::error::{GateError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// External collaborator consulted by the gate
///
/// The gate holds a shared reference only; the caller owns the source and
/// decides its lifecycle.
#[async_trait]
pub trait AuthoritySource: Send + Sync {
    /// Ask whether the current principal is authenticated
    async fn check_authenticated(&self) -> Result<bool>;
}

/// Session-backed authority with login/logout toggles
///
/// Answers after a fixed latency, reading the session state at the moment it
/// answers rather than when it was asked.
#[derive(Debug)]
pub struct SessionAuthority {
    logged_in: AtomicBool,
    latency: Duration,
}

impl SessionAuthority {
    pub fn new(latency: Duration) -> Self {
        Self {
            logged_in: AtomicBool::new(false),
            latency,
        }
    }

    pub fn from_config(config: &AuthorityConfig) -> Self {
        let authority = Self::new(config.latency());
        if config.logged_in {
            authority.login();
        }
        authority
    }

    pub fn login(&self) {
        debug!("Session authority: login");
        self.logged_in.store(true, Ordering::Release);
    }

    pub fn logout(&self) {
        debug!("Session authority: logout");
        self.logged_in.store(false, Ordering::Release);
    }

    /// Get the current login state
    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::Acquire)
    }

    /// Get the simulated answer latency
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SessionAuthority {
    fn default() -> Self {
        Self::from_config(&AuthorityConfig::default())
    }
}

#[async_trait]
impl AuthoritySource for SessionAuthority {
    async fn check_authenticated(&self) -> Result<bool> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.is_logged_in())
    }
}

/// Authority with a fixed answer
#[derive(Debug, Clone)]
pub struct StaticAuthority {
    authenticated: bool,
    delay: Duration,
}

impl StaticAuthority {
    pub fn allowing() -> Self {
        Self {
            authenticated: true,
            delay: Duration::ZERO,
        }
    }

    pub fn denying() -> Self {
        Self {
            authenticated: false,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl AuthoritySource for StaticAuthority {
    async fn check_authenticated(&self) -> Result<bool> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.authenticated)
    }
}

/// Authority whose check always fails
#[derive(Debug, Clone)]
pub struct FailingAuthority {
    message: String,
}

impl FailingAuthority {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl AuthoritySource for FailingAuthority {
    async fn check_authenticated(&self) -> Result<bool> {
        Err(GateError::authority(self.message.clone()))
    }
}
