//! Navigation capability used for redirects

use crate::utils::error::Result;
use async_trait::async_trait;

/// Capability to move the application to another destination
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Redirect to `destination`
    async fn redirect_to(&self, destination: &str) -> Result<()>;
}
