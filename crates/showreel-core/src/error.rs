//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input or configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An I/O or transport error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// An upstream service answered with an unexpected status.
    #[error("upstream service returned {status}: {message}")]
    Upstream {
        /// HTTP status code returned by the upstream service.
        status: u16,
        /// Body or reason reported by the upstream service.
        message: String,
    },
}
