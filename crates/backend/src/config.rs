//! Backend connection settings and the environment helpers every Course Shop
//! binary loads its configuration with.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKEND_API_URL` - Base URL of the REST backend (e.g. `https://api.example.com/api`)
//!
//! ## Optional
//! - `BACKEND_TIMEOUT_SECS` - Per-request timeout in seconds (default: 15)
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` - Error reporting; off without a DSN
//! - `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE` - Sample rates (default: 1.0)

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL; always ends with `/` so relative paths join beneath it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Build a configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not HTTP(S).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEnvVar("BACKEND_API_URL".to_string(), reason);

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme: {}", url.scheme())));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            timeout,
        })
    }

    /// Load from `BACKEND_API_URL` and `BACKEND_TIMEOUT_SECS`.
    ///
    /// Does not read `.env`; callers load it first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is missing or invalid or the timeout
    /// is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("BACKEND_API_URL")?;
        let timeout_secs: u64 = parse_env_or_default("BACKEND_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }
}

/// Error-reporting settings, read the same way by every binary.
#[derive(Debug, Clone, PartialEq)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl SentryConfig {
    /// Reporting switched off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 1.0,
        }
    }

    /// Load from the `SENTRY_*` variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a sample rate is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", 1.0)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if the variable is unset.
pub fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the variable is set but does not
/// parse.
pub fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = BackendConfig::new("https://api.example.com/api", Duration::from_secs(5)).unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.com/api/");
        assert_eq!(
            config.base_url.join("orders/create").unwrap().as_str(),
            "https://api.example.com/api/orders/create"
        );
    }

    #[test]
    fn test_base_url_root() {
        let config = BackendConfig::new("http://127.0.0.1:5000", Duration::from_secs(5)).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(matches!(
            BackendConfig::new("not a url", Duration::from_secs(5)),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            BackendConfig::new("ftp://files.example.com", Duration::from_secs(5)),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_parse_env_or_default_unset() {
        let value: u64 = parse_env_or_default("COURSE_SHOP_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
