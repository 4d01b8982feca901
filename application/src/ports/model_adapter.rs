//! Model adapter port
//!
//! Defines the interface for sending prompts to one LLM vendor, and the
//! registry through which use cases find the adapter for a participant.

use crate::error::SessionError;
use arena_domain::Participant;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Classified failure of a single model request
///
/// Classification from HTTP status codes happens in the infrastructure
/// layer; this type only carries the result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Provider overloaded: {0}")]
    Overloaded(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
}

/// Reject empty prompts before any request is made.
pub fn ensure_prompt(prompt: &str) -> Result<(), ProviderError> {
    if prompt.trim().is_empty() {
        return Err(ProviderError::InvalidRequest(
            "prompt must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// One item read from a vendor's streaming response
///
/// A well-formed stream is any number of `Delta`s followed by exactly one
/// `Completed` carrying the assembled text, or by an `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Delta(String),
    /// Full response text; ends the stream
    Completed(String),
    /// Classified vendor or transport failure; ends the stream
    Error(ProviderError),
}

/// Fragments of one streaming model response.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. The stream is finite and cannot
/// be restarted; dropping it releases the underlying connection.
pub struct FragmentStream {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl FragmentStream {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// A stream that yields `text` as a single `Completed` event.
    pub fn completed(text: String) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 and a fresh channel: this cannot fail
        let _ = tx.try_send(StreamEvent::Completed(text));
        Self::new(rx)
    }

    /// Next event, or `None` once the sender side is gone.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// A single LLM vendor
///
/// Temperature, token limits and the default model belong to the adapter's
/// configuration, not to individual calls. Implementations live in the
/// infrastructure layer.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// The participant this adapter speaks for
    fn participant(&self) -> Participant;

    /// Send a prompt and wait for the full response text.
    async fn invoke(&self, prompt: &str, model_override: Option<&str>)
    -> Result<String, ProviderError>;

    /// Send a prompt and receive the response as it is generated.
    ///
    /// Default implementation calls `invoke()` and wraps the result in a
    /// single `Completed` event.
    async fn invoke_streaming(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<FragmentStream, ProviderError> {
        let text = self.invoke(prompt, model_override).await?;
        Ok(FragmentStream::completed(text))
    }
}

/// Participant → adapter map, built once per process and injected into use cases
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<Participant, Arc<dyn ModelAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own participant, replacing any previous one
    pub fn register(&mut self, adapter: Arc<dyn ModelAdapter>) {
        self.adapters.insert(adapter.participant(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn ModelAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, participant: Participant) -> Result<Arc<dyn ModelAdapter>, SessionError> {
        self.adapters
            .get(&participant)
            .cloned()
            .ok_or(SessionError::AdapterMissing(participant))
    }

    pub fn contains(&self, participant: Participant) -> bool {
        self.adapters.contains_key(&participant)
    }

    /// Registered participants in canonical order
    pub fn participants(&self) -> Vec<Participant> {
        Participant::ALL
            .into_iter()
            .filter(|p| self.contains(*p))
            .collect()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("participants", &self.participants())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoAdapter(Participant);

    #[async_trait]
    impl ModelAdapter for EchoAdapter {
        fn participant(&self) -> Participant {
            self.0
        }

        async fn invoke(
            &self,
            prompt: &str,
            _model_override: Option<&str>,
        ) -> Result<String, ProviderError> {
            ensure_prompt(prompt)?;
            Ok(format!("echo: {}", prompt))
        }
    }

    #[tokio::test]
    async fn test_default_streaming_yields_single_completed() {
        let adapter = EchoAdapter(Participant::OpenAi);
        let mut stream = adapter.invoke_streaming("hi", None).await.unwrap();
        assert_eq!(
            stream.next().await,
            Some(StreamEvent::Completed("echo: hi".to_string()))
        );
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_invalid_request() {
        let adapter = EchoAdapter(Participant::OpenAi);
        let err = adapter.invoke("   ", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_stream_carries_classified_error() {
        let (tx, rx) = mpsc::channel(2);
        tx.send(StreamEvent::Delta("x".to_string())).await.unwrap();
        tx.send(StreamEvent::Error(ProviderError::Overloaded("busy".to_string())))
            .await
            .unwrap();
        drop(tx);

        let mut stream = FragmentStream::new(rx);
        assert_eq!(stream.next().await, Some(StreamEvent::Delta("x".to_string())));
        assert_eq!(
            stream.next().await,
            Some(StreamEvent::Error(ProviderError::Overloaded("busy".to_string())))
        );
        assert_eq!(stream.next().await, None);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = AdapterRegistry::new()
            .with(Arc::new(EchoAdapter(Participant::Gemini)))
            .with(Arc::new(EchoAdapter(Participant::OpenAi)));
        assert_eq!(
            registry.participants(),
            vec![Participant::OpenAi, Participant::Gemini]
        );
        assert!(registry.get(Participant::Gemini).is_ok());
        assert!(matches!(
            registry.get(Participant::Anthropic),
            Err(SessionError::AdapterMissing(Participant::Anthropic))
        ));
    }
}
