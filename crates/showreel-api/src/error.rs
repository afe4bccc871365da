//! Showreel API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use showreel_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Scene content could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] DomainError),

    /// The outbound HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable error code, e.g. `validation_error`.
    pub error: &'static str,
    /// Rendered `DomainError`.
    pub message: String,
}

/// A `DomainError` surfaced by a route handler.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    /// HTTP status and error code for the wrapped error.
    ///
    /// No current route lets an upstream failure through (user validation
    /// reports its own 500), so the 502 mapping only covers future handlers.
    #[must_use]
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Upstream { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.classify();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
