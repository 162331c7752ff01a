//! Helper functions for creating specific error types

use super::types::GateError;

/// Helper functions for creating specific errors
impl GateError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn authority<S: Into<String>>(message: S) -> Self {
        Self::Authority(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn navigation<S: Into<String>>(message: S) -> Self {
        Self::Navigation(message.into())
    }

    pub fn route<S: Into<String>>(message: S) -> Self {
        Self::Route(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error came from an unreachable or slow authority
    pub fn is_authority_failure(&self) -> bool {
        matches!(self, Self::Authority(_) | Self::Timeout(_))
    }
}
