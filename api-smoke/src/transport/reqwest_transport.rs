use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::transport::Transport;
use crate::types::{HttpRequest, HttpResponse, HttpVerb};
use crate::{Error, Result};

/// A [`Transport`] implementation that uses the `reqwest` crate for making HTTP requests.
///
/// This is the default transport used by [`SmokeClient`](crate::SmokeClient) if no custom
/// transport is provided. The API key is only sent on requests marked
/// [`authorized`](HttpRequest::authorized), and each request carries its own timeout.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the server under test.
    /// * `api_key` - An optional bearer credential for authorized requests.
    ///
    /// Endpoint paths are resolved beneath the base URL's path, so a server
    /// mounted at `http://host/proxy` is reached at `http://host/proxy/health`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Client`] if the `reqwest` client cannot be built.
    pub fn new(mut base_url: Url, api_key: Option<String>) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Resolves an endpoint path such as `/health` relative to the base URL.
    fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Client(e.to_string()))
    }

    async fn build_and_send_request(&self, request: HttpRequest) -> Result<reqwest::Response> {
        let url = self.endpoint_url(&request.url)?;

        let mut request_builder = match request.verb {
            HttpVerb::GET => self.client.get(url),
            HttpVerb::POST => self.client.post(url),
        };

        if request.authorized {
            if let Some(api_key) = &self.api_key {
                request_builder = request_builder.bearer_auth(api_key);
            }
        }

        if let Some(body) = &request.body {
            request_builder = request_builder.json(body);
        }

        if let Some(timeout) = request.timeout {
            request_builder = request_builder.timeout(timeout);
        }

        request_builder
            .send()
            .await
            .map_err(|e| classify(e, request.timeout))
    }
}

/// Timeouts get their own variant; every other wire failure stays a transport error.
fn classify(error: reqwest::Error, timeout: Option<Duration>) -> Error {
    match timeout {
        Some(after) if error.is_timeout() => Error::Timeout(after),
        _ => Error::Transport(error),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    /// Sends a request using `reqwest` and buffers the response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the connection fails, [`Error::Timeout`] if the
    /// request timeout elapses, and [`Error::Http`] for a non-2xx status.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(url = %request.url)))]
    async fn send_http_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let timeout = request.timeout;
        let response = self.build_and_send_request(request).await?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.bytes().await.map_err(|e| classify(e, timeout))?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
                body,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body: Some(body),
        })
    }
}
