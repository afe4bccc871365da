//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_USER_SERVICE_TIMEOUT_MS: u64 = 5000;

/// Settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Base URL of the internal user service (`USER_SERVICE_URL`).
    pub user_service_url: String,
    /// Request timeout for the user service (`USER_SERVICE_TIMEOUT_MS`).
    pub user_service_timeout: Duration,
    /// Optional YAML scene catalogue replacing the built-in intro
    /// (`INTRO_SCENES_PATH`).
    pub intro_scenes_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let user_service_url = lookup("USER_SERVICE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("USER_SERVICE_URL environment variable must be set".to_owned())
            })?;
        let timeout_ms = match lookup("USER_SERVICE_TIMEOUT_MS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("USER_SERVICE_TIMEOUT_MS must be a whole number: {e}"))
            })?,
            None => DEFAULT_USER_SERVICE_TIMEOUT_MS,
        };
        let intro_scenes_path = lookup("INTRO_SCENES_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            user_service_url,
            user_service_timeout: Duration::from_millis(timeout_ms),
            intro_scenes_path,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_only_required_vars_set() {
        let config = config_from(&[("USER_SERVICE_URL", "http://users.internal")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.user_service_timeout, Duration::from_millis(5000));
        assert_eq!(config.intro_scenes_path, None);
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_all_vars_are_read() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("USER_SERVICE_URL", "http://users.internal"),
            ("USER_SERVICE_TIMEOUT_MS", "250"),
            ("INTRO_SCENES_PATH", "/etc/showreel/intro.yaml"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.user_service_timeout, Duration::from_millis(250));
        assert_eq!(
            config.intro_scenes_path,
            Some(PathBuf::from("/etc/showreel/intro.yaml"))
        );
    }

    #[test]
    fn test_missing_user_service_url_is_a_config_error() {
        let result = config_from(&[("PORT", "8080")]);

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("USER_SERVICE_URL")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = config_from(&[("USER_SERVICE_URL", "http://u"), ("PORT", "70000")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_host_fails_at_socket_addr() {
        let config = config_from(&[("USER_SERVICE_URL", "http://u"), ("HOST", "not a host")])
            .unwrap();

        assert!(matches!(config.socket_addr(), Err(AppError::Config(_))));
    }
}
