//! Error types for the access gate

use thiserror::Error;

/// Result type alias for the access gate
pub type Result<T> = std::result::Result<T, GateError>;

/// Main error type for the access gate
///
/// Gate evaluations never return this type to their caller; authority failures
/// are folded into a denial. It surfaces from configuration, route table
/// construction and the collaborator traits.
#[derive(Error, Debug)]
pub enum GateError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The authority could not answer
    #[error("Authority error: {0}")]
    Authority(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// A redirect or location change was rejected
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Route definition or parameter errors
    #[error("Route error: {0}")]
    Route(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
