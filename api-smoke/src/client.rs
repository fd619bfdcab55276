use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::builder::SmokeClientBuilder;
use crate::types::chat::{ChatCompletionRequest, ChatCompletionResponse};
use crate::types::generate::{GenerateRequest, GenerateResponse};
use crate::types::health::HealthResponse;
use crate::types::{HttpRequest, HttpResponse};
use crate::SmokeClient;
use crate::{Error, Result};

pub const HEALTH_PATH: &str = "/health";
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const GENERATE_PATH: &str = "/api/generate";

pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

impl SmokeClient {
    pub fn builder() -> SmokeClientBuilder {
        SmokeClientBuilder::new()
    }

    /// Probes `GET /health`.
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub async fn health(&self) -> Result<HealthResponse> {
        let request = HttpRequest::new(HEALTH_PATH)
            .get()
            .timeout(self.health_timeout);

        let response = self.transport.send_http_request(request).await?;
        HealthResponse::from_bytes(into_body(response)?)
    }

    /// Sends an authorized `POST /v1/chat/completions`.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let request = HttpRequest::new(CHAT_COMPLETIONS_PATH)
            .post()
            .authorized()
            .timeout(self.generation_timeout)
            .body(request)?;

        let response = self.transport.send_http_request(request).await?;
        ChatCompletionResponse::from_bytes(into_body(response)?)
    }

    /// Sends an unauthenticated `POST /api/generate`.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let request = HttpRequest::new(GENERATE_PATH)
            .post()
            .timeout(self.generation_timeout)
            .body(request)?;

        let response = self.transport.send_http_request(request).await?;
        GenerateResponse::from_bytes(into_body(response)?)
    }
}

fn into_body(response: HttpResponse) -> Result<bytes::Bytes> {
    response
        .body
        .ok_or_else(|| Error::Protocol("Missing response body".into()))
}
