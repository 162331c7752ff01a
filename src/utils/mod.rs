//! Utility modules for the access gate
//!
//! - **error**: error type and result alias
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{GateError, Result};
pub use logging::{LoggingOptions, init_logging};
