//! Common test utilities for route-gate
//!
//! - Recording navigator and scripted authorities
//! - Route table fixtures

pub mod fixtures;

pub use fixtures::{RecordingNavigator, ScriptedAuthority, recipe_routes};
