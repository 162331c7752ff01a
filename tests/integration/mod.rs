//! Integration tests for route-gate
//!
//! These tests drive the public API with fake collaborators.

pub mod config_tests;
pub mod gate_tests;
pub mod router_tests;
