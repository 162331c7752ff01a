//! Configuration data models
//!
//! This module defines all configuration structures used by the gate and router.

#![allow(missing_docs)]

pub mod authority;
pub mod gate;
pub mod routes;

// Re-export all configuration types
pub use authority::*;
pub use gate::*;
pub use routes::*;

/// Default fallback destination for denied requests
pub fn default_fallback() -> String {
    "/".to_string()
}

/// Default authority timeout in milliseconds
pub fn default_authority_timeout_ms() -> u64 {
    5_000
}

/// Default latency of the session authority in milliseconds
pub fn default_authority_latency_ms() -> u64 {
    800
}
