//! Session runner
//!
//! Single entry point used by both the CLI and the HTTP server. Wraps the
//! debate and discussion orchestrators so that every session ends with
//! exactly one terminal event, unless it was cancelled.

use crate::config::ArenaConfig;
use crate::error::SessionError;
use crate::ports::event_sink::EventSink;
use crate::ports::model_adapter::AdapterRegistry;
use crate::use_cases::run_debate::{RunDebateInput, RunDebateUseCase};
use crate::use_cases::run_discussion::{RunDiscussionInput, RunDiscussionUseCase};
use crate::use_cases::run_judges::JudgePanel;
use arena_domain::{SessionEvent, SessionResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runs debates and discussions against a shared adapter registry
#[derive(Clone)]
pub struct SessionRunner {
    debate: RunDebateUseCase,
    discussion: RunDiscussionUseCase,
}

impl SessionRunner {
    pub fn new(registry: Arc<AdapterRegistry>, config: &ArenaConfig) -> Self {
        let judges = JudgePanel::new(registry.clone(), config.judges().clone());
        Self {
            debate: RunDebateUseCase::new(
                registry.clone(),
                config.debate().clone(),
                judges.clone(),
            ),
            discussion: RunDiscussionUseCase::new(registry, config.discussion().clone(), judges),
        }
    }

    pub async fn run_debate(
        &self,
        input: RunDebateInput,
        sink: &dyn EventSink,
        token: &CancellationToken,
    ) -> Result<SessionResult, SessionError> {
        let outcome = self.debate.execute(input, sink, token).await;
        finish(outcome.map(SessionResult::from), sink)
    }

    pub async fn run_discussion(
        &self,
        input: RunDiscussionInput,
        sink: &dyn EventSink,
        token: &CancellationToken,
    ) -> Result<SessionResult, SessionError> {
        let outcome = self.discussion.execute(input, sink, token).await;
        finish(outcome.map(SessionResult::from), sink)
    }
}

/// Emit the terminal event for a finished session.
///
/// Cancelled sessions end silently: nobody is listening any more.
fn finish(
    outcome: Result<SessionResult, SessionError>,
    sink: &dyn EventSink,
) -> Result<SessionResult, SessionError> {
    match &outcome {
        Ok(result) => {
            info!(
                "{} complete: {} messages, {} verdicts",
                result.mode(),
                result.message_count(),
                result.verdicts().len()
            );
            sink.emit(SessionEvent::complete(result.clone()));
        }
        Err(e) if e.is_cancelled() => info!("Session cancelled"),
        Err(e) => {
            error!("Session failed: {}", e);
            sink.emit(SessionEvent::error(e.to_string()));
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_adapter::ProviderError;
    use crate::use_cases::test_support::{MockAdapter, RecordingSink, registry, verdict_json};
    use arena_domain::{Participant, SessionMode, Topic};

    fn mocks() -> Vec<Arc<MockAdapter>> {
        Participant::ALL
            .into_iter()
            .map(|p| {
                Arc::new(MockAdapter::new(p).responding(|prompt| {
                    if prompt.starts_with("You are judging") {
                        Ok(verdict_json("tie"))
                    } else {
                        Ok("A measured point about costs.".to_string())
                    }
                }))
            })
            .collect()
    }

    fn topic() -> Topic {
        Topic::new("Is remote work here to stay?").unwrap()
    }

    #[tokio::test]
    async fn test_debate_ends_with_complete() {
        let mocks = mocks();
        let runner = SessionRunner::new(registry(&mocks), &ArenaConfig::default());
        let sink = RecordingSink::default();

        let input = RunDebateInput::new(topic(), Participant::OpenAi, Participant::Gemini)
            .with_rounds(1);
        let result = runner
            .run_debate(input, &sink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.mode(), SessionMode::Debate);
        let kinds = sink.kinds();
        assert_eq!(kinds.last(), Some(&"complete"));
        assert_eq!(kinds.iter().filter(|k| **k == "complete").count(), 1);
        assert!(!kinds.contains(&"error"));
    }

    #[tokio::test]
    async fn test_discussion_ends_with_complete() {
        let mocks = mocks();
        let config = ArenaConfig::default().without_streaming();
        let runner = SessionRunner::new(registry(&mocks), &config);
        let sink = RecordingSink::default();

        let result = runner
            .run_discussion(
                RunDiscussionInput::new(topic()),
                &sink,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.mode(), SessionMode::Discussion);
        assert_eq!(result.verdicts().len(), 3);
        assert_eq!(sink.kinds().last(), Some(&"complete"));
        assert!(!sink.kinds().contains(&"chunk"));
    }

    #[tokio::test]
    async fn test_failure_ends_with_error() {
        let mut mocks = mocks();
        mocks[0] = Arc::new(
            MockAdapter::new(Participant::OpenAi)
                .with_script(vec![Err(ProviderError::Authentication("bad key".to_string()))]),
        );
        let runner = SessionRunner::new(registry(&mocks), &ArenaConfig::default());
        let sink = RecordingSink::default();

        let input = RunDebateInput::new(topic(), Participant::OpenAi, Participant::Gemini);
        let err = runner
            .run_debate(input, &sink, &CancellationToken::new())
            .await
            .unwrap_err();

        let events = sink.events();
        match events.last() {
            Some(SessionEvent::Error { message }) => assert_eq!(message, &err.to_string()),
            other => panic!("expected error event, got {:?}", other),
        }
        assert!(!sink.kinds().contains(&"complete"));
    }

    #[tokio::test]
    async fn test_cancelled_session_emits_no_terminal_event() {
        let mocks = mocks();
        let runner = SessionRunner::new(registry(&mocks), &ArenaConfig::default());
        let sink = RecordingSink::default();
        let token = CancellationToken::new();
        token.cancel();

        let err = runner
            .run_discussion(RunDiscussionInput::new(topic()), &sink, &token)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        let kinds = sink.kinds();
        assert!(!kinds.contains(&"complete"));
        assert!(!kinds.contains(&"error"));
    }
}
