//! Anthropic messages adapter

use super::error::{status_error, transport_error};
use super::sse::{FrameContent, SseFrame, frame_json, spawn_fragment_stream};
use super::{VendorSettings, http_client};
use crate::config::ConfigError;
use arena_application::{FragmentStream, ModelAdapter, ProviderError, ensure_prompt};
use arena_domain::Participant;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

const API_VERSION: &str = "2023-06-01";

/// `max_tokens` is mandatory for this API
const FALLBACK_MAX_TOKENS: u32 = 1024;

/// Returned when a response carries no text blocks
pub const EMPTY_RESPONSE: &str = "[no text returned]";

pub struct AnthropicAdapter {
    client: reqwest::Client,
    settings: VendorSettings,
}

impl AnthropicAdapter {
    pub const DEFAULT_MODEL: &'static str = "claude-sonnet-4-5-20250929";

    pub fn new(settings: VendorSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(&settings)?,
            settings,
        })
    }

    fn request_body(&self, prompt: &str, model: &str, stream: bool) -> Value {
        let mut body = json!({
            "model": model,
            "max_tokens": self.settings.max_tokens.unwrap_or(FALLBACK_MAX_TOKENS),
            "messages": [{ "role": "user", "content": prompt }],
        });
        if stream {
            body["stream"] = json!(true);
        }
        if let Some(temperature) = self.settings.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    async fn send(
        &self,
        prompt: &str,
        model_override: Option<&str>,
        stream: bool,
    ) -> Result<reqwest::Response, ProviderError> {
        ensure_prompt(prompt)?;
        let model = model_override.unwrap_or(&self.settings.model);
        debug!(model = %model, stream, "Calling Anthropic messages");

        let response = self
            .client
            .post(self.settings.endpoint("/v1/messages"))
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.request_body(prompt, model, stream))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response)
    }
}

/// Text blocks joined with newlines, trimmed
fn message_text(body: &Value) -> String {
    let text = body
        .get("content")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        EMPTY_RESPONSE.to_string()
    } else {
        text.to_string()
    }
}

fn extract_frame(frame: &SseFrame) -> Result<FrameContent, ProviderError> {
    let value = frame_json(frame)?;
    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
    match kind {
        "content_block_delta" => Ok(value
            .pointer("/delta/text")
            .filter(|_| value.pointer("/delta/type").and_then(Value::as_str) == Some("text_delta"))
            .and_then(Value::as_str)
            .map(|s| FrameContent::Text(s.to_string()))
            .unwrap_or(FrameContent::Skip)),
        "message_stop" => Ok(FrameContent::Done),
        "error" => {
            let message = value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("stream error");
            if value.pointer("/error/type").and_then(Value::as_str) == Some("overloaded_error") {
                Err(ProviderError::Overloaded(message.to_string()))
            } else {
                Err(ProviderError::Transport(message.to_string()))
            }
        }
        _ => Ok(FrameContent::Skip),
    }
}

#[async_trait]
impl ModelAdapter for AnthropicAdapter {
    fn participant(&self) -> Participant {
        Participant::Anthropic
    }

    async fn invoke(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        let response = self.send(prompt, model_override, false).await?;
        let body: Value = response.json().await.map_err(transport_error)?;
        Ok(message_text(&body))
    }

    async fn invoke_streaming(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<FragmentStream, ProviderError> {
        let response = self.send(prompt, model_override, true).await?;
        Ok(spawn_fragment_stream(
            Participant::Anthropic,
            response,
            extract_frame,
        ))
    }
}
