//! # route-gate
//!
//! Asynchronous access gate for navigation steps.
//!
//! ## Features
//!
//! - **Exactly-once decisions**: every request resolves to a single `Allowed` or `Denied`
//! - **Single redirect**: denied requests are redirected once to a fallback destination
//! - **Failure folding**: authority errors and timeouts become `Denied(AuthorityUnavailable)`
//! - **Cancellation**: abandoned requests never apply their redirect
//! - **Guarded routing**: a router that gates the children of guarded routes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use route_gate::{Config, Router, SessionAuthority};
//! use route_gate::gate::GateSettings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gate.yaml").await?;
//!     let authority = Arc::new(SessionAuthority::from_config(config.authority()));
//!     let router = Router::new(
//!         config.route_table()?,
//!         authority.clone(),
//!         GateSettings::from(config.gate()),
//!     );
//!
//!     authority.login();
//!     let outcome = router.navigate("/servers/1/edit").await;
//!     println!("{}", outcome);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod gate;
pub mod routing;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use gate::{
    AccessGate, AccessRequest, AuthDecision, AuthoritySource, CancelToken, DenialReason,
    Navigator, SessionAuthority,
};
pub use routing::{ActivatedRoute, Location, NavigationOutcome, Router};
pub use utils::error::{GateError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
