//! Gate, authority and route validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

/// Longest authority timeout accepted, in milliseconds
const MAX_AUTHORITY_TIMEOUT_MS: u64 = 300_000;
/// Longest simulated authority latency accepted, in milliseconds
const MAX_AUTHORITY_LATENCY_MS: u64 = 60_000;

impl Validate for GateConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gate configuration");

        validate_destination("Gate fallback", &self.fallback)?;

        if self.authority_timeout_ms == 0 {
            return Err("Authority timeout must be greater than 0".to_string());
        }

        if self.authority_timeout_ms > MAX_AUTHORITY_TIMEOUT_MS {
            return Err(format!(
                "Authority timeout should not exceed {}ms",
                MAX_AUTHORITY_TIMEOUT_MS
            ));
        }

        Ok(())
    }
}

impl Validate for AuthorityConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating authority configuration");

        if self.latency_ms > MAX_AUTHORITY_LATENCY_MS {
            return Err(format!(
                "Authority latency should not exceed {}ms",
                MAX_AUTHORITY_LATENCY_MS
            ));
        }

        Ok(())
    }
}

impl Validate for RouteConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.starts_with('/') {
            return Err(format!(
                "Route path '{}' must be relative (no leading '/')",
                self.path
            ));
        }

        for segment in self.path.split('/').filter(|s| !s.is_empty()) {
            if segment == ":" {
                return Err(format!("Route path '{}' has an unnamed parameter", self.path));
            }
            if segment == "**" && self.path != "**" {
                return Err(format!(
                    "Wildcard must be the whole route path, found '{}'",
                    self.path
                ));
            }
        }

        if self.path == "**" {
            if self.redirect_to.is_none() {
                return Err("Wildcard route must declare redirect_to".to_string());
            }
            if !self.children.is_empty() {
                return Err("Wildcard route cannot have children".to_string());
            }
        }

        if let Some(target) = &self.redirect_to {
            validate_destination(&format!("Redirect of route '{}'", self.path), target)?;
            if !self.children.is_empty() {
                return Err(format!(
                    "Redirecting route '{}' cannot have children",
                    self.path
                ));
            }
        }

        for child in &self.children {
            if child.path == "**" {
                return Err(format!(
                    "Wildcard is only allowed at the top level, found under '{}'",
                    self.path
                ));
            }
            child.validate()?;
        }

        Ok(())
    }
}

fn validate_destination(label: &str, destination: &str) -> Result<(), String> {
    if destination.is_empty() {
        return Err(format!("{} cannot be empty", label));
    }
    if !destination.starts_with('/') {
        return Err(format!(
            "{} must be an absolute path starting with '/', got '{}'",
            label, destination
        ));
    }
    Ok(())
}
