//! Contains all data structures used with the OpenAI-compatible chat completions API

use std::borrow::Cow;

use api_smoke_macros::FromBytes;
use serde::{Deserialize, Serialize};

use super::Role;
use crate::{Error, Result};

/// Represents a chat completion request.
///
/// Serialized as `{model, messages, temperature, max_tokens}`. Sampling fields
/// are omitted from the body when unset.
#[derive(Serialize, Default, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    /// The model identifier, as known to the server.
    pub model: String,
    /// The conversation to complete.
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

impl ChatCompletionRequest {
    /// Creates a new [`ChatCompletionRequest`] with no messages.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Appends a message to the conversation.
    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Represents a chat completion response.
///
/// The body is kept exactly as the server sent it (key order included), so
/// printing it shows the real response. Only `choices[0].message.content` is
/// ever looked at.
#[derive(Deserialize, Serialize, FromBytes, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ChatCompletionResponse(pub serde_json::Value);

impl ChatCompletionResponse {
    /// Content of the first choice, i.e. `choices[0].message.content`.
    ///
    /// A string is returned as-is; any other JSON value (including `null`) is
    /// rendered in its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] when the body has no value at that path.
    pub fn first_content(&self) -> Result<Cow<'_, str>> {
        match self.0.pointer("/choices/0/message/content") {
            Some(serde_json::Value::String(content)) => Ok(Cow::Borrowed(content)),
            Some(other) => Ok(Cow::Owned(other.to_string())),
            None => Err(Error::Protocol(
                "response has no choices[0].message.content".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_openai_shape() {
        let request = ChatCompletionRequest::new("llama3")
            .add_message(ChatMessage::user("Hello!"))
            .temperature(0.7)
            .max_tokens(1000);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama3");
        assert_eq!(value["messages"], json!([{"role": "user", "content": "Hello!"}]));
        assert_eq!(value["max_tokens"], 1000);
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn unset_sampling_fields_are_omitted() {
        let value = serde_json::to_value(ChatCompletionRequest::new("m")).unwrap();
        assert!(value.get("temperature").is_none());
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn first_content_reads_the_first_choice() {
        let response = ChatCompletionResponse::from_slice(
            br#"{"choices":[{"message":{"content":"Paris"}},{"message":{"content":"Lyon"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_content().unwrap(), "Paris");
    }

    #[test]
    fn missing_choices_is_a_protocol_error() {
        let response = ChatCompletionResponse::from_slice(br#"{"id":"abc"}"#).unwrap();
        assert!(matches!(response.first_content(), Err(Error::Protocol(_))));
    }

    #[test]
    fn missing_content_is_a_protocol_error() {
        let response =
            ChatCompletionResponse::from_slice(br#"{"choices":[{"message":{"role":"assistant"}}]}"#)
                .unwrap();
        assert!(matches!(response.first_content(), Err(Error::Protocol(_))));
    }

    #[test]
    fn non_string_content_is_rendered_as_json() {
        let response = ChatCompletionResponse::from_slice(
            br#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_content().unwrap(), "null");
    }

    #[test]
    fn unknown_roles_are_accepted() {
        let response = ChatCompletionResponse::from_slice(
            br#"{"choices":[{"message":{"role":"developer","content":"Paris"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_content().unwrap(), "Paris");
    }

    #[test]
    fn body_is_printed_verbatim_in_server_key_order() {
        let body = r#"{"id":"chatcmpl-1","choices":[{"message":{"content":"Paris"}}],"usage":{"prompt_tokens_details":{"cached_tokens":3}}}"#;
        let response = ChatCompletionResponse::from_slice(body.as_bytes()).unwrap();

        assert_eq!(serde_json::to_string(&response).unwrap(), body);
    }
}
