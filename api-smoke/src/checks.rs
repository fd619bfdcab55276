//! The three endpoint checks of a smoke run.
//!
//! Each check sends a single request, reports what happened on the console and
//! returns `Ok(true)` or `Ok(false)`. Request failures never escape a check;
//! `Err` only means the console itself could not be written.

use std::io::Write;

use crate::config::SmokeConfig;
use crate::console::{self, Console};
use crate::{Error, Result, SmokeClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Health,
    ChatCompletion,
    DirectGeneration,
}

impl Check {
    /// Every check, in the order a run executes them.
    pub const ALL: [Check; 3] = [Check::Health, Check::ChatCompletion, Check::DirectGeneration];

    /// Name shown in the summary table.
    pub fn label(self) -> &'static str {
        match self {
            Check::Health => "Health Check",
            Check::ChatCompletion => "Chat Completion",
            Check::DirectGeneration => "Direct Ollama",
        }
    }

    /// Short name used in logs and metrics.
    pub fn key(self) -> &'static str {
        match self {
            Check::Health => "health",
            Check::ChatCompletion => "chat",
            Check::DirectGeneration => "direct",
        }
    }

    pub async fn run<W: Write>(
        self,
        client: &SmokeClient,
        config: &SmokeConfig,
        console: &mut Console<W>,
    ) -> Result<bool> {
        match self {
            Check::Health => check_health(client, console).await,
            Check::ChatCompletion => check_chat_completion(client, config, console).await,
            Check::DirectGeneration => check_direct_generation(client, config, console).await,
        }
    }
}

pub async fn check_health<W: Write>(client: &SmokeClient, console: &mut Console<W>) -> Result<bool> {
    console.line("🏥 Testing health check...")?;

    match client.health().await {
        Ok(health) => {
            console.line(format!("✅ Health check passed: {}", console::compact(&health)))?;
            Ok(true)
        }
        Err(e) => {
            report_failure(Check::Health, &e);
            console.line(format!("❌ Health check failed: {}", e))?;
            Ok(false)
        }
    }
}

pub async fn check_chat_completion<W: Write>(
    client: &SmokeClient,
    config: &SmokeConfig,
    console: &mut Console<W>,
) -> Result<bool> {
    console.blank()?;
    console.line("🤖 Testing Ollama OpenAI API Server...")?;

    let response = match client.chat_completion(config.chat_request()).await {
        Ok(response) => response,
        Err(e) => {
            report_failure(Check::ChatCompletion, &e);
            console.line(format!("❌ Error: {}", e))?;
            if let Some((status, body)) = e.response() {
                console.line(format!("Response Status: {}", status))?;
                match serde_json::from_slice::<serde_json::Value>(body) {
                    Ok(data) => console.line(format!("Response Data: {}", data))?,
                    Err(_) => console.line(format!(
                        "Response Text: {}",
                        String::from_utf8_lossy(body)
                    ))?,
                }
            }
            return Ok(false);
        }
    };

    console.line("✅ Success!")?;
    console.line(format!("Response: {}", console::pretty(&response)))?;

    match response.first_content() {
        Ok(message) => {
            console.blank()?;
            console.line(format!("📝 AI Response: {}", message))?;
            Ok(true)
        }
        Err(e) => {
            report_failure(Check::ChatCompletion, &e);
            console.line(format!("❌ Error: {}", e))?;
            Ok(false)
        }
    }
}

pub async fn check_direct_generation<W: Write>(
    client: &SmokeClient,
    config: &SmokeConfig,
    console: &mut Console<W>,
) -> Result<bool> {
    console.blank()?;
    console.line("🔧 Testing direct Ollama endpoint...")?;

    match client.generate(config.generate_request()).await {
        Ok(response) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(text = response.text().unwrap_or_default(), "generation finished");
            console.line("✅ Direct Ollama test passed!")?;
            console.line(format!("Response: {}", console::pretty(&response)))?;
            Ok(true)
        }
        Err(e) => {
            report_failure(Check::DirectGeneration, &e);
            console.line(format!("❌ Direct Ollama test failed: {}", e))?;
            Ok(false)
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn report_failure(check: Check, error: &Error) {
    #[cfg(feature = "tracing")]
    tracing::warn!(check = check.key(), error = %error, "check failed");
}
