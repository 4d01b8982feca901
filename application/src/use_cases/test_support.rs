//! Scripted adapters and recording sinks for use case tests

use crate::ports::event_sink::EventSink;
use crate::ports::model_adapter::{
    AdapterRegistry, FragmentStream, ModelAdapter, ProviderError, StreamEvent, ensure_prompt,
};
use arena_domain::{Participant, SessionEvent};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

type Responder = Box<dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync>;

/// Adapter answering from a script first, then from a prompt-based responder
pub(crate) struct MockAdapter {
    participant: Participant,
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    responder: Responder,
    delay: Option<Duration>,
    stream_failure: Option<ProviderError>,
    prompts: Mutex<Vec<String>>,
}

impl MockAdapter {
    pub(crate) fn new(participant: Participant) -> Self {
        Self {
            participant,
            script: Mutex::new(VecDeque::new()),
            responder: Box::new(move |_: &str| Ok(format!("{} says something.", participant))),
            delay: None,
            stream_failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn responding(
        mut self,
        responder: impl Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
    ) -> Self {
        self.responder = Box::new(responder);
        self
    }

    pub(crate) fn with_script(self, responses: Vec<Result<String, ProviderError>>) -> Self {
        self.script.lock().unwrap().extend(responses);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Streams end in `error` instead of `Completed`
    pub(crate) fn failing_mid_stream(mut self, error: ProviderError) -> Self {
        self.stream_failure = Some(error);
        self
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    async fn respond(&self, prompt: &str) -> Result<String, ProviderError> {
        ensure_prompt(prompt)?;
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(response) => response,
            None => (self.responder)(prompt),
        }
    }
}

#[async_trait]
impl ModelAdapter for MockAdapter {
    fn participant(&self) -> Participant {
        self.participant
    }

    async fn invoke(
        &self,
        prompt: &str,
        _model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.respond(prompt).await
    }

    /// Streams the response word by word
    async fn invoke_streaming(
        &self,
        prompt: &str,
        _model_override: Option<&str>,
    ) -> Result<FragmentStream, ProviderError> {
        let text = self.respond(prompt).await?;
        let pieces: Vec<String> = text.split_inclusive(' ').map(str::to_string).collect();
        let (tx, rx) = mpsc::channel(pieces.len() + 1);
        for piece in pieces {
            let _ = tx.send(StreamEvent::Delta(piece)).await;
        }
        let last = match &self.stream_failure {
            Some(error) => StreamEvent::Error(error.clone()),
            None => StreamEvent::Completed(text),
        };
        let _ = tx.send(last).await;
        Ok(FragmentStream::new(rx))
    }
}

/// Registry over the given mocks, keeping handles for assertions
pub(crate) fn registry(mocks: &[Arc<MockAdapter>]) -> Arc<AdapterRegistry> {
    let mut registry = AdapterRegistry::new();
    for mock in mocks {
        registry.register(mock.clone());
    }
    Arc::new(registry)
}

/// Sink that keeps every event
#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.kind()).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Judge answer in the JSON shape judges are asked for
pub(crate) fn verdict_json(winner: &str) -> String {
    format!(
        r#"{{"winner": "{}", "reasoning": "Weighed the arguments carefully."}}"#,
        winner
    )
}
