//! HTTP-backed access directory.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use showreel_core::access::AccessDirectory;
use showreel_core::error::DomainError;
use tracing::debug;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct AccessResponse {
    allowed: bool,
}

/// Asks the internal user service whether a user may enter.
///
/// Issues `GET {base}/users/{user_id}/access` and expects
/// `{"allowed": bool}`. A 404 means the service does not know the user,
/// which is reported as not allowed.
#[derive(Debug, Clone)]
pub struct HttpAccessDirectory {
    client: Client,
    base_url: Url,
}

impl HttpAccessDirectory {
    /// Creates a directory for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `base_url` is not an absolute http(s)
    /// URL, or `AppError::Client` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("USER_SERVICE_URL is not a URL: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(
                "USER_SERVICE_URL must be an http(s) URL".to_owned(),
            ));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn access_url(&self, user_id: &str) -> Result<Url, DomainError> {
        // Dot segments would be normalised away and address another resource.
        if matches!(user_id, "" | "." | "..") {
            return Err(DomainError::Validation(format!(
                "user id {user_id:?} is not a valid path segment"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DomainError::Infrastructure("user service URL has no path".to_owned()))?
            .pop_if_empty()
            .extend(["users", user_id, "access"]);
        Ok(url)
    }
}

#[async_trait]
impl AccessDirectory for HttpAccessDirectory {
    async fn is_allowed(&self, user_id: &str) -> Result<bool, DomainError> {
        let url = self.access_url(user_id)?;
        debug!(host = url.host_str().unwrap_or_default(), "querying user service");

        let response = self.client.get(url).send().await.map_err(|e| {
            DomainError::Infrastructure(format!("user service request failed: {e}"))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DomainError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: AccessResponse = response.json().await.map_err(|e| {
            DomainError::Infrastructure(format!("invalid user service response: {e}"))
        })?;
        Ok(body.allowed)
    }
}
