//! Run Discussion use case
//!
//! Participants take turns until consensus is detected or every participant
//! has used its message cap; without consensus the judges decide.

use crate::config::DiscussionSettings;
use crate::error::SessionError;
use crate::ports::event_sink::EventSink;
use crate::ports::model_adapter::{AdapterRegistry, ModelAdapter};
use crate::use_cases::run_judges::{JudgePanel, JudgeRequest};
use crate::use_cases::shared::{check_cancelled, invoke_model};
use arena_domain::discussion::{contributions, render_context};
use arena_domain::{
    DiscussionMessage, DiscussionPromptTemplate, DiscussionResult, Participant, SessionEvent,
    Topic, TurnScheduler, check_consensus,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Input for the RunDiscussion use case
///
/// Seats come from [`DiscussionSettings`].
#[derive(Debug, Clone)]
pub struct RunDiscussionInput {
    pub topic: Topic,
}

impl RunDiscussionInput {
    pub fn new(topic: Topic) -> Self {
        Self { topic }
    }
}

/// Use case for running a discussion
#[derive(Clone)]
pub struct RunDiscussionUseCase {
    registry: Arc<AdapterRegistry>,
    settings: DiscussionSettings,
    judges: JudgePanel,
}

impl RunDiscussionUseCase {
    pub fn new(
        registry: Arc<AdapterRegistry>,
        settings: DiscussionSettings,
        judges: JudgePanel,
    ) -> Self {
        Self {
            registry,
            settings,
            judges,
        }
    }

    pub fn settings(&self) -> &DiscussionSettings {
        &self.settings
    }

    /// Run the discussion to completion.
    ///
    /// Every turn and the consensus summary are mandatory: any failure ends
    /// the discussion.
    pub async fn execute(
        &self,
        input: RunDiscussionInput,
        sink: &dyn EventSink,
        token: &CancellationToken,
    ) -> Result<DiscussionResult, SessionError> {
        let mut scheduler = TurnScheduler::new(
            self.settings.participants.clone(),
            self.settings.max_messages_per_model,
        )?;
        let rule = self.settings.consensus_rule();

        let seats = scheduler
            .participants()
            .iter()
            .map(|p| Ok((*p, self.registry.get(*p)?)))
            .collect::<Result<HashMap<Participant, Arc<dyn ModelAdapter>>, SessionError>>()?;
        let summarizer = self.registry.get(self.settings.summarizer)?;

        let topic = input.topic.content();
        info!(
            "Starting discussion: {} ({} participants, up to {} messages)",
            topic,
            scheduler.participants().len(),
            scheduler.ceiling()
        );
        sink.emit(SessionEvent::progress(
            "Starting discussion",
            json!({ "topic": topic }),
        ));

        let mut messages: Vec<DiscussionMessage> = Vec::new();

        while let Some(speaker) = scheduler.next_turn() {
            check_cancelled(token)?;
            let message_number = messages.len() + 1;
            sink.emit(SessionEvent::progress(
                format!("{} responding", speaker.display_name()),
                json!({ "messageNumber": message_number }),
            ));

            let prompt = if messages.is_empty() {
                let others: Vec<Participant> = scheduler
                    .participants()
                    .iter()
                    .copied()
                    .filter(|p| *p != speaker)
                    .collect();
                DiscussionPromptTemplate::opening(speaker, &others, topic)
            } else {
                DiscussionPromptTemplate::response(speaker, topic, &render_context(&messages))
            };

            let adapter = seats
                .get(&speaker)
                .ok_or(SessionError::AdapterMissing(speaker))?;
            let stream_as = self.settings.streaming.then_some(messages.len());
            let text = invoke_model(adapter.as_ref(), &prompt, stream_as, sink, token).await?;

            let message = DiscussionMessage::new(speaker, text, message_number);
            messages.push(message.clone());
            sink.emit(SessionEvent::message(message));

            if check_consensus(&messages, &rule) {
                info!("Consensus reached after {} messages", messages.len());
                sink.emit(SessionEvent::progress(
                    "Consensus reached - generating summary",
                    json!({}),
                ));

                let final_statements = render_context(&messages[messages.len() - rule.window..]);
                let prompt = DiscussionPromptTemplate::consensus_summary(topic, &final_statements);
                let summary =
                    invoke_model(summarizer.as_ref(), &prompt, None, sink, token).await?;

                sink.emit(SessionEvent::progress(
                    "Discussion complete - consensus reached",
                    json!({}),
                ));
                return Ok(DiscussionResult::with_consensus(topic, messages, summary));
            }
        }

        check_cancelled(token)?;
        info!("No consensus after {} messages - bringing in judges", messages.len());
        sink.emit(SessionEvent::progress(
            "No consensus - judges voting",
            json!({ "stage": "judging" }),
        ));

        let request = JudgeRequest::Discussion {
            topic: topic.to_string(),
            contributions: contributions(&messages, scheduler.participants()),
        };
        let verdicts = self.judges.run(&request, token).await?;

        Ok(DiscussionResult::judged(topic, messages, verdicts))
    }
}
