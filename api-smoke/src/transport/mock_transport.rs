use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;

use crate::transport::Transport;
use crate::types::{HttpRequest, HttpResponse};
use crate::{Error, Result};

/// A mock implementation of the [`Transport`] trait for testing purposes.
///
/// Replies are scripted per request URL and handed out in the order they were
/// configured. Every request is recorded so tests can assert on what was sent
/// and in which order.
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Pending replies keyed by request URL (e.g. `/health`).
    replies: Arc<Mutex<HashMap<String, VecDeque<Result<HttpResponse>>>>>,
    /// Every request seen, oldest first.
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Creates a new, empty [`MockTransport`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the next request to `url`.
    ///
    /// A response outside the 2xx range is surfaced as [`Error::Http`], matching
    /// [`ReqwestTransport`](crate::transport::ReqwestTransport).
    pub fn with_response(self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.push(url.into(), Ok(response));
        self
    }

    /// Queues a 200 response with a JSON body for the next request to `url`.
    pub fn with_json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.with_response(url, HttpResponse::ok(body.to_string()))
    }

    /// Queues an error for the next request to `url`.
    pub fn with_error(self, url: impl Into<String>, error: Error) -> Self {
        self.push(url.into(), Err(error));
        self
    }

    /// Returns the requests sent through this transport so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, url: String, reply: Result<HttpResponse>) {
        self.replies
            .lock()
            .unwrap()
            .entry(url)
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl Transport for MockTransport {
    /// Pops the next scripted reply for the request URL.
    ///
    /// With nothing scripted, the request fails like a refused connection.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    async fn send_http_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&url)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(Ok(response)) if !response.is_success() => Err(Error::Http {
                status: response.status,
                url,
                body: response.body.unwrap_or_default(),
            }),
            Some(reply) => reply,
            None => Err(Error::Client(format!(
                "MockTransport: connection refused, no reply configured for {}",
                url
            ))),
        }
    }
}
