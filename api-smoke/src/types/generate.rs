//! Contains all data structures used with the direct generation API (Ollama `/api/generate`)

use api_smoke_macros::FromBytes;
use serde::{Deserialize, Serialize};

/// Represents a direct generation request.
///
/// Serialized as `{model, prompt, temperature}`.
#[derive(Serialize, Default, Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// The name of the model to use for generation.
    pub model: String,
    /// The prompt for the model.
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Creates a new [`GenerateRequest`].
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: None,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The body returned by the generation endpoint.
///
/// The smoke run does not interpret it beyond printing, so any JSON value is accepted.
#[derive(Deserialize, Serialize, FromBytes, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct GenerateResponse(pub serde_json::Value);

impl GenerateResponse {
    /// The generated text, when the body has Ollama's `response` field.
    pub fn text(&self) -> Option<&str> {
        self.0.get("response").and_then(|value| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_model_prompt_and_temperature() {
        let request = GenerateRequest::new("llama3", "What is 2 + 2?").temperature(0.5);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"model": "llama3", "prompt": "What is 2 + 2?", "temperature": 0.5})
        );
    }

    #[test]
    fn response_accepts_arbitrary_json() {
        let response = GenerateResponse::from_slice(br#"[1, 2, 3]"#).unwrap();
        assert_eq!(response.0, json!([1, 2, 3]));
        assert_eq!(response.text(), None);

        let response =
            GenerateResponse::from_slice(br#"{"model":"llama3","response":"4","done":true}"#)
                .unwrap();
        assert_eq!(response.text(), Some("4"));
    }
}
