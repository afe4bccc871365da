//! User-access validation endpoint.
//!
//! A thin proxy: check that a user ID was supplied, ask the access
//! directory, and report the answer in the shape the front-end expects.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::state::AppState;

/// Error message for a request without a usable `userId`.
pub const MISSING_USER_ID: &str = "userId is required";

/// Error message when the directory could not be consulted.
pub const VALIDATION_FAILED: &str = "internal error validating user";

/// Request body for POST /validate-user.
#[derive(Debug, Deserialize)]
pub struct ValidateUserRequest {
    /// The user to check.
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Response body for POST /validate-user.
#[derive(Debug, Serialize)]
pub struct ValidateUserResponse {
    /// Whether the user may enter.
    pub allowed: bool,
    /// Whether the check itself completed.
    pub success: bool,
    /// Reason the check did not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateUserResponse {
    fn answered(allowed: bool) -> Self {
        Self {
            allowed,
            success: true,
            error: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            allowed: false,
            success: false,
            error: Some(message.to_owned()),
        }
    }
}

/// Extracts a usable `userId` from a JSON body. Blank IDs and the dot
/// segments `.` and `..` are treated as missing.
fn parse_user_id(body: &[u8]) -> Option<String> {
    let request: ValidateUserRequest = serde_json::from_slice(body).ok()?;
    request
        .user_id
        .map(|id| id.trim().to_owned())
        .filter(|id| !matches!(id.as_str(), "" | "." | ".."))
}

/// POST /validate-user
#[instrument(skip(state, body), fields(body_len = body.len()))]
async fn validate_user(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<ValidateUserResponse>) {
    let Some(user_id) = parse_user_id(&body) else {
        warn!("validate_user called without userId");
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidateUserResponse::failed(MISSING_USER_ID)),
        );
    };

    match state.access_directory.is_allowed(&user_id).await {
        Ok(allowed) => {
            info!(allowed, "user validated");
            (StatusCode::OK, Json(ValidateUserResponse::answered(allowed)))
        }
        Err(err) => {
            error!(error = %err, "user validation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ValidateUserResponse::failed(VALIDATION_FAILED)),
            )
        }
    }
}

/// Returns the router for user validation.
pub fn router() -> Router<AppState> {
    Router::new().route("/validate-user", post(validate_user))
}
