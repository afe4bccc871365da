//! Test access directories — mock `AccessDirectory` implementations.

use std::collections::HashSet;

use async_trait::async_trait;
use showreel_core::access::AccessDirectory;
use showreel_core::error::DomainError;

/// A directory that allows exactly the configured user IDs.
#[derive(Debug, Default)]
pub struct StaticAccessDirectory {
    allowed: HashSet<String>,
}

impl StaticAccessDirectory {
    /// Creates a directory allowing each of `user_ids`.
    #[must_use]
    pub fn allowing<I, S>(user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: user_ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AccessDirectory for StaticAccessDirectory {
    async fn is_allowed(&self, user_id: &str) -> Result<bool, DomainError> {
        Ok(self.allowed.contains(user_id))
    }
}

/// A directory that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingAccessDirectory;

#[async_trait]
impl AccessDirectory for FailingAccessDirectory {
    async fn is_allowed(&self, _user_id: &str) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
