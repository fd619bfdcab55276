use std::time::Duration;

use clap::Parser;

use crate::builder::{DEFAULT_API_KEY, DEFAULT_BASE_URL};
use crate::types::chat::{ChatCompletionRequest, ChatMessage};
use crate::types::generate::GenerateRequest;
use crate::{Result, SmokeClient};

pub const DEFAULT_MODEL: &str = "jinbora/deepseek-r1-Bllossom:8b";
pub const DEFAULT_CHAT_PROMPT: &str = "Hello! What is the capital of France?";
pub const DEFAULT_GENERATE_PROMPT: &str = "What is 2 + 2?";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Settings for one smoke run, read from the command line and the environment.
///
/// Every field has a default, so running the binary without arguments tests a
/// server on `http://localhost:3000`.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "api-smoke")]
#[command(about = "Smoke-test the health, chat completion and direct generation endpoints of an Ollama API server")]
#[command(version)]
pub struct SmokeConfig {
    /// Base URL of the server under test
    #[arg(long, env = "API_SMOKE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token sent with chat completion requests
    #[arg(long, env = "API_SMOKE_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,

    /// Model used by the chat completion and direct generation checks
    #[arg(long, env = "API_SMOKE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// User message sent to the chat completions endpoint
    #[arg(long, default_value = DEFAULT_CHAT_PROMPT)]
    pub chat_prompt: String,

    /// Prompt sent to the direct generation endpoint
    #[arg(long, default_value = DEFAULT_GENERATE_PROMPT)]
    pub generate_prompt: String,

    /// Sampling temperature for both generation checks
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Completion token limit for the chat check
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Health check timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub health_timeout: u64,

    /// Chat completion and direct generation timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub generation_timeout: u64,

    /// Diagnostic log filter (overrides RUST_LOG), e.g. `debug` or `api_smoke=trace`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chat_prompt: DEFAULT_CHAT_PROMPT.to_string(),
            generate_prompt: DEFAULT_GENERATE_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            health_timeout: 10,
            generation_timeout: 120,
            log_level: None,
        }
    }
}

impl SmokeConfig {
    /// Builds a `reqwest`-backed client for the configured server.
    pub fn client(&self) -> Result<SmokeClient> {
        SmokeClient::builder()
            .base_url(&self.base_url)
            .api_key(&self.api_key)
            .health_timeout(Duration::from_secs(self.health_timeout))
            .generation_timeout(Duration::from_secs(self.generation_timeout))
            .build()
    }

    /// The request sent by the chat completion check.
    pub fn chat_request(&self) -> ChatCompletionRequest {
        ChatCompletionRequest::new(&self.model)
            .add_message(ChatMessage::user(&self.chat_prompt))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
    }

    /// The request sent by the direct generation check.
    pub fn generate_request(&self) -> GenerateRequest {
        GenerateRequest::new(&self.model, &self.generate_prompt).temperature(self.temperature)
    }
}
