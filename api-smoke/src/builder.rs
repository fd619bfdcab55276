use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use reqwest::Url;

use crate::client::{DEFAULT_GENERATION_TIMEOUT, DEFAULT_HEALTH_TIMEOUT};
use crate::transport::{ReqwestTransport, Transport};
use crate::{Error, Result, SmokeClient};

/// Base URL used when neither the builder nor `API_SMOKE_BASE_URL` provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// API key used when neither the builder nor `API_SMOKE_API_KEY` provides one.
/// The server under test accepts any bearer token.
pub const DEFAULT_API_KEY: &str = "dummy-key";

/// A builder for constructing a [`SmokeClient`].
///
/// - Uses either `API_SMOKE_BASE_URL` environment variable or `http://localhost:3000`.
/// - Uses either `API_SMOKE_API_KEY` environment variable or `dummy-key`.
/// - Bounds health checks by 10 seconds and generation requests by 120 seconds.
/// - Uses `reqwest`-based transport by default - [`ReqwestTransport`].
pub struct SmokeClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    health_timeout: Duration,
    generation_timeout: Duration,
    transport: Option<Arc<dyn Transport + Send + Sync>>,
}

impl SmokeClientBuilder {
    /// Creates a new [`SmokeClientBuilder`]. This method is called by [`SmokeClient::builder`]
    pub(crate) fn new() -> Self {
        SmokeClientBuilder {
            base_url: None,
            api_key: None,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            transport: None,
        }
    }

    /// Sets the base URL of the server under test.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the bearer token sent with chat completion requests.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the timeout of the health check.
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Sets the timeout of the chat completion and direct generation requests.
    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Sets a custom transport implementation for the client.
    ///
    /// For testing, you can use [`MockTransport`](crate::transport::MockTransport)
    /// or your own mock [`Transport`] implementations.
    pub fn transport(mut self, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`SmokeClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Client`](variant@Error::Client) if the base URL is invalid or if
    /// [`ReqwestTransport`] cannot be initialized.
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub fn build(self) -> Result<SmokeClient> {
        let transport = if let Some(t) = self.transport {
            t
        } else {
            let base_url_str = self.base_url.unwrap_or_else(|| {
                std::env::var("API_SMOKE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            });
            let api_key = self
                .api_key
                .or_else(|| std::env::var("API_SMOKE_API_KEY").ok())
                .unwrap_or_else(|| DEFAULT_API_KEY.to_string());

            let base_url = Url::parse(&base_url_str)
                .map_err(|e| Error::Client(format!("Invalid base URL: {}", e)))?;

            Arc::new(ReqwestTransport::new(base_url, Some(api_key))?)
        };

        Ok(SmokeClient {
            transport,
            health_timeout: self.health_timeout,
            generation_timeout: self.generation_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_unparsable_base_url() {
        let result = SmokeClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(Error::Client(message)) if message.contains("Invalid base URL")));
    }

    #[test]
    fn accepts_an_explicit_base_url() {
        assert!(SmokeClient::builder()
            .base_url("http://127.0.0.1:3000")
            .api_key("k")
            .build()
            .is_ok());
    }
}
