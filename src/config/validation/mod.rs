//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `gate_validators`: validators for the gate, authority and route sections
//! - `tests`: Test suite for all validators

mod gate_validators;
mod trait_def;

pub use trait_def::Validate;
