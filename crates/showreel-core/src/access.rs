//! User access directory abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// Answers whether a user may enter the product.
///
/// The production implementation proxies to an internal service; tests inject
/// static or failing directories.
#[async_trait]
pub trait AccessDirectory: Send + Sync {
    /// Returns `true` if `user_id` is allowed access.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` or `DomainError::Upstream` when
    /// the directory cannot be consulted.
    async fn is_allowed(&self, user_id: &str) -> Result<bool, DomainError>;
}
