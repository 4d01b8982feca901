//! Gemini generateContent adapter

use super::error::{status_error, transport_error};
use super::sse::{FrameContent, SseFrame, frame_json, spawn_fragment_stream};
use super::{VendorSettings, http_client};
use crate::config::ConfigError;
use arena_application::{FragmentStream, ModelAdapter, ProviderError, ensure_prompt};
use arena_domain::Participant;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::debug;

pub struct GeminiAdapter {
    client: reqwest::Client,
    settings: VendorSettings,
}

impl GeminiAdapter {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-pro";

    pub fn new(settings: VendorSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(&settings)?,
            settings,
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut generation = Map::new();
        if let Some(max_tokens) = self.settings.max_tokens {
            generation.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if let Some(temperature) = self.settings.temperature {
            generation.insert("temperature".to_string(), json!(temperature));
        }
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": generation,
        })
    }

    fn url(&self, model: &str, stream: bool) -> String {
        if stream {
            self.settings
                .endpoint(&format!("/v1beta/models/{}:streamGenerateContent?alt=sse", model))
        } else {
            self.settings
                .endpoint(&format!("/v1beta/models/{}:generateContent", model))
        }
    }

    async fn send(
        &self,
        prompt: &str,
        model_override: Option<&str>,
        stream: bool,
    ) -> Result<reqwest::Response, ProviderError> {
        ensure_prompt(prompt)?;
        let model = model_override.unwrap_or(&self.settings.model);
        debug!(model = %model, stream, "Calling Gemini generateContent");

        let response = self
            .client
            .post(self.url(model, stream))
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response)
    }
}

/// Concatenated text parts of the first candidate
fn candidate_text(body: &Value) -> String {
    body.pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn extract_frame(frame: &SseFrame) -> Result<FrameContent, ProviderError> {
    let value = frame_json(frame)?;
    if let Some(message) = value.pointer("/error/message").and_then(Value::as_str) {
        return Err(ProviderError::Transport(message.to_string()));
    }
    let text = candidate_text(&value);
    if text.is_empty() {
        Ok(FrameContent::Skip)
    } else {
        Ok(FrameContent::Text(text))
    }
}

#[async_trait]
impl ModelAdapter for GeminiAdapter {
    fn participant(&self) -> Participant {
        Participant::Gemini
    }

    async fn invoke(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        let response = self.send(prompt, model_override, false).await?;
        let body: Value = response.json().await.map_err(transport_error)?;
        Ok(candidate_text(&body).trim().to_string())
    }

    async fn invoke_streaming(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<FragmentStream, ProviderError> {
        let response = self.send(prompt, model_override, true).await?;
        Ok(spawn_fragment_stream(
            Participant::Gemini,
            response,
            extract_frame,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn adapter() -> GeminiAdapter {
        GeminiAdapter::new(VendorSettings {
            api_key: "g-key".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: GeminiAdapter::DEFAULT_MODEL.to_string(),
            temperature: Some(0.7),
            max_tokens: Some(4096),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_request_body() {
        let body = adapter().request_body("Hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 4096);
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_urls() {
        let adapter = adapter();
        assert_eq!(
            adapter.url("gemini-2.5-pro", false),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
        assert!(
            adapter
                .url("gemini-2.5-flash", true)
                .ends_with("/models/gemini-2.5-flash:streamGenerateContent?alt=sse")
        );
    }

    #[test]
    fn test_candidate_text() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "Part one, "}, {"text": "part two."}]}}]
        });
        assert_eq!(candidate_text(&body), "Part one, part two.");
        assert_eq!(candidate_text(&json!({"candidates": []})), "");
    }

    #[test]
    fn test_extract_frame() {
        let chunk = SseFrame {
            event: None,
            data: r#"{"candidates":[{"content":{"parts":[{"text":"Hi"}]}}]}"#.to_string(),
        };
        assert_eq!(extract_frame(&chunk).unwrap(), FrameContent::Text("Hi".to_string()));

        let usage_only = SseFrame {
            event: None,
            data: r#"{"usageMetadata":{"totalTokenCount":12}}"#.to_string(),
        };
        assert_eq!(extract_frame(&usage_only).unwrap(), FrameContent::Skip);
    }
}
