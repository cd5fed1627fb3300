//! Application state shared across handlers.

use std::sync::Arc;

use course_shop_backend::{BackendClient, BackendError};
use course_shop_core::PaymentMethod;
use moka::future::Cache;
use tracing::debug;

use crate::config::StorefrontConfig;

const ACTIVE_METHODS_KEY: &str = "active";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: BackendClient,
    payment_methods: Cache<&'static str, Arc<Vec<PaymentMethod>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;
        let payment_methods = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.payment_methods_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                payment_methods,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Active payment methods, served from cache when fresh.
    ///
    /// Only non-empty lists are cached, so an outage or a moment with no
    /// active methods is retried on the next request.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the cache is cold and the fetch fails.
    pub async fn active_payment_methods(&self) -> Result<Arc<Vec<PaymentMethod>>, BackendError> {
        if let Some(methods) = self.inner.payment_methods.get(ACTIVE_METHODS_KEY).await {
            debug!("Cache hit for active payment methods");
            return Ok(methods);
        }

        let methods = Arc::new(self.inner.backend.active_payment_methods().await?);
        if !methods.is_empty() {
            self.inner
                .payment_methods
                .insert(ACTIVE_METHODS_KEY, Arc::clone(&methods))
                .await;
        }

        Ok(methods)
    }

    /// Drop the cached payment methods.
    ///
    /// Called when the backend reports the selected method is inactive.
    pub async fn invalidate_payment_methods(&self) {
        self.inner
            .payment_methods
            .invalidate(ACTIVE_METHODS_KEY)
            .await;
    }
}
