//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `BACKEND_API_URL` - Base URL of the REST backend
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `BACKEND_TIMEOUT_SECS` - Backend request timeout (default: 15)
//! - `COURSE_PRICE_TAKA` - Course price shown on the site (default: 3000)
//! - `PAYMENT_METHODS_CACHE_TTL_SECS` - How long active payment methods are cached (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use course_shop_backend::config::{get_required_env, parse_env_or_default};
use course_shop_backend::{BackendConfig, SentryConfig};
use course_shop_core::Taka;

pub use course_shop_backend::ConfigError;

/// Default course price in whole taka.
pub const DEFAULT_COURSE_PRICE_TAKA: i64 = 3000;

/// Default lifetime of the cached active payment methods.
pub const DEFAULT_PAYMENT_METHODS_CACHE_TTL_SECS: u64 = 60;

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// REST backend connection
    pub backend: BackendConfig,
    /// Course price shown on the home and order pages
    pub course_price: Taka,
    /// Lifetime of cached active payment methods
    pub payment_methods_ttl: Duration,
    /// Error reporting
    pub sentry: SentryConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or_default("STOREFRONT_PORT", 3000_u16)?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let backend = BackendConfig::from_env()?;

        let course_price = Taka::from_whole(parse_env_or_default(
            "COURSE_PRICE_TAKA",
            DEFAULT_COURSE_PRICE_TAKA,
        )?);
        let payment_methods_ttl = Duration::from_secs(parse_env_or_default(
            "PAYMENT_METHODS_CACHE_TTL_SECS",
            DEFAULT_PAYMENT_METHODS_CACHE_TTL_SECS,
        )?);


        Ok(Self {
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            backend,
            course_price,
            payment_methods_ttl,
            sentry: SentryConfig::from_env()?,
        })
    }

    /// Configuration for running against `backend_url` on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `backend_url` is not an HTTP(S) URL.
    pub fn local(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            backend: BackendConfig::new(backend_url, Duration::from_secs(5))?,
            course_price: Taka::from_whole(DEFAULT_COURSE_PRICE_TAKA),
            payment_methods_ttl: Duration::from_secs(DEFAULT_PAYMENT_METHODS_CACHE_TTL_SECS),
            sentry: SentryConfig::disabled(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let mut config = StorefrontConfig::local("http://127.0.0.1:5000/api").unwrap();
        config.port = 3000;

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_local_defaults() {
        let config = StorefrontConfig::local("http://127.0.0.1:5000/api").unwrap();
        assert_eq!(config.course_price, Taka::from_whole(3000));
        assert_eq!(config.payment_methods_ttl, Duration::from_secs(60));
        assert_eq!(config.backend.base_url.as_str(), "http://127.0.0.1:5000/api/");
    }

    #[test]
    fn test_local_rejects_bad_backend_url() {
        assert!(StorefrontConfig::local("localhost:5000").is_err());
    }
}
