//! HTTP client for the REST backend.
//!
//! One `impl BackendClient` block per resource lives in the submodules; this
//! module owns request construction and response decoding.

mod auth;
mod orders;
mod payment_methods;
mod sellers;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::envelope;
use crate::error::BackendError;

pub use sellers::SellerInput;

/// Client for the course backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: url::Url,
    requests_sent: AtomicU64,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("course-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
                requests_sent: AtomicU64::new(0),
            }),
        })
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &url::Url {
        &self.inner.base_url
    }

    /// Number of requests this client (and its clones) has sent.
    #[must_use]
    pub fn requests_sent(&self) -> u64 {
        self.inner.requests_sent.load(Ordering::Relaxed)
    }

    /// Start a request to the path made of `segments`, below the base URL.
    ///
    /// Each segment is percent-encoded, so record IDs can be passed as-is.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&SecretString>,
    ) -> Result<RequestBuilder, BackendError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);

        let builder = self.inner.client.request(method, url);

        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    /// Send a request and decode the envelope payload.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        self.inner.requests_sent.fetch_add(1, Ordering::Relaxed);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        envelope::decode(status, &body)
    }
}
