use std::time::Duration;

use crate::Result;
use bytes::Bytes;
use serde::Serialize;

#[derive(Default, Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub verb: HttpVerb,
    pub body: Option<serde_json::Value>,
    /// Upper bound for the whole exchange. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
    /// Whether the transport should attach its bearer credential.
    pub authorized: bool,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    #[default]
    GET,
    POST,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn get(mut self) -> Self {
        self.verb = HttpVerb::GET;
        self
    }

    pub fn post(mut self) -> Self {
        self.verb = HttpVerb::POST;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn authorized(mut self) -> Self {
        self.authorized = true;
        self
    }

    pub fn body<T: Serialize>(mut self, body: T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

impl HttpResponse {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            body: Some(body.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_sets_verb_timeout_and_auth() {
        let request = HttpRequest::new("/v1/chat/completions")
            .post()
            .timeout(Duration::from_secs(120))
            .authorized()
            .body(json!({"model": "m"}))
            .unwrap();

        assert_eq!(request.verb, HttpVerb::POST);
        assert_eq!(request.timeout, Some(Duration::from_secs(120)));
        assert!(request.authorized);
        assert_eq!(request.body, Some(json!({"model": "m"})));
    }

    #[test]
    fn defaults_to_unauthenticated_get_without_timeout() {
        let request = HttpRequest::new("/health");
        assert_eq!(request.verb, HttpVerb::GET);
        assert!(request.timeout.is_none());
        assert!(!request.authorized);
        assert!(request.body.is_none());
    }

    #[test]
    fn success_covers_the_2xx_range_only() {
        let mut response = HttpResponse::ok("{}");
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }
}
