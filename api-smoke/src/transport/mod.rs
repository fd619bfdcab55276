use async_trait::async_trait;

use crate::types::{HttpRequest, HttpResponse};
use crate::Result;

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::ReqwestTransport;

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends a request and returns the buffered response.
    ///
    /// A response outside the 2xx range is returned as
    /// [`Error::Http`](crate::Error::Http) carrying the status and body, and an
    /// exchange that exceeds [`HttpRequest::timeout`] as
    /// [`Error::Timeout`](crate::Error::Timeout).
    async fn send_http_request(&self, request: HttpRequest) -> Result<HttpResponse>;
}
