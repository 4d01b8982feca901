//! OpenAI chat completions adapter

use super::error::{status_error, transport_error};
use super::sse::{FrameContent, SseFrame, frame_json, spawn_fragment_stream};
use super::{VendorSettings, http_client};
use crate::config::ConfigError;
use arena_application::{FragmentStream, ModelAdapter, ProviderError, ensure_prompt};
use arena_domain::Participant;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

/// Returned when a completion carries no message content
pub const EMPTY_RESPONSE: &str = "[No response received from OpenAI]";

pub struct OpenAiAdapter {
    client: reqwest::Client,
    settings: VendorSettings,
}

impl OpenAiAdapter {
    pub const DEFAULT_MODEL: &'static str = "gpt-5";

    pub fn new(settings: VendorSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(&settings)?,
            settings,
        })
    }

    fn request_body(&self, prompt: &str, model: &str, stream: bool) -> Value {
        let mut body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        if stream {
            body["stream"] = json!(true);
        }
        if let Some(temperature) = self.settings.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = self.settings.max_tokens {
            body["max_completion_tokens"] = json!(max_tokens);
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
        debug!(model = %model, stream, "Calling OpenAI chat completions");

        let response = self
            .client
            .post(self.settings.endpoint("/v1/chat/completions"))
            .bearer_auth(&self.settings.api_key)
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

/// Message content of the first choice
fn completion_text(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| EMPTY_RESPONSE.to_string())
}

fn extract_frame(frame: &SseFrame) -> Result<FrameContent, ProviderError> {
    if frame.data.trim() == "[DONE]" {
        return Ok(FrameContent::Done);
    }
    let value = frame_json(frame)?;
    if let Some(message) = value.pointer("/error/message").and_then(Value::as_str) {
        return Err(ProviderError::Transport(message.to_string()));
    }
    Ok(value
        .pointer("/choices/0/delta/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| FrameContent::Text(s.to_string()))
        .unwrap_or(FrameContent::Skip))
}

#[async_trait]
impl ModelAdapter for OpenAiAdapter {
    fn participant(&self) -> Participant {
        Participant::OpenAi
    }

    async fn invoke(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        let response = self.send(prompt, model_override, false).await?;
        let body: Value = response.json().await.map_err(transport_error)?;
        Ok(completion_text(&body))
    }

    async fn invoke_streaming(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<FragmentStream, ProviderError> {
        let response = self.send(prompt, model_override, true).await?;
        Ok(spawn_fragment_stream(
            Participant::OpenAi,
            response,
            extract_frame,
        ))
    }
}
