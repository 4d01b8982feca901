//! Run Debate use case
//!
//! Drives a fixed-shape debate between two participants, then hands the
//! two sides to the judge panel.

use crate::config::DebateSettings;
use crate::error::SessionError;
use crate::ports::event_sink::EventSink;
use crate::ports::model_adapter::{AdapterRegistry, ModelAdapter};
use crate::use_cases::run_judges::{JudgePanel, JudgeRequest};
use crate::use_cases::shared::{check_cancelled, invoke_model};
use arena_domain::debate::{intervention_text, parse_intervention, render_transcript, side_text};
use arena_domain::{
    DebateMessage, DebatePhase, DebatePlan, DebatePromptTemplate, DebateResult, DebateRole,
    DebateStep, Participant, SessionEvent, Topic,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub topic: Topic,
    pub affirmative: Participant,
    pub negative: Participant,
    pub rounds: usize,
}

impl RunDebateInput {
    pub fn new(topic: Topic, affirmative: Participant, negative: Participant) -> Self {
        Self {
            topic,
            affirmative,
            negative,
            rounds: DebatePlan::DEFAULT_ROUNDS,
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }
}

/// Use case for running a debate
#[derive(Clone)]
pub struct RunDebateUseCase {
    registry: Arc<AdapterRegistry>,
    settings: DebateSettings,
    judges: JudgePanel,
}

/// Adapters resolved for one run
struct Seats {
    affirmative: Arc<dyn ModelAdapter>,
    negative: Arc<dyn ModelAdapter>,
    moderator: Arc<dyn ModelAdapter>,
}

impl Seats {
    fn for_role(&self, role: DebateRole) -> &dyn ModelAdapter {
        match role {
            DebateRole::Affirmative => self.affirmative.as_ref(),
            DebateRole::Negative => self.negative.as_ref(),
            DebateRole::Moderator => self.moderator.as_ref(),
        }
    }
}

impl RunDebateUseCase {
    pub fn new(registry: Arc<AdapterRegistry>, settings: DebateSettings, judges: JudgePanel) -> Self {
        Self {
            registry,
            settings,
            judges,
        }
    }

    pub fn settings(&self) -> &DebateSettings {
        &self.settings
    }

    /// Run the debate to completion.
    ///
    /// Emits `progress`, `chunk` and `message` events; the caller reports
    /// completion. A failure in an opening, rebuttal or closing ends the
    /// debate; a failed moderator step is logged and skipped.
    pub async fn execute(
        &self,
        input: RunDebateInput,
        sink: &dyn EventSink,
        token: &CancellationToken,
    ) -> Result<DebateResult, SessionError> {
        let plan = DebatePlan::new(input.rounds)?.with_interventions(self.settings.interventions);
        let moderator = self.settings.moderator;

        let seats = Seats {
            affirmative: self.registry.get(input.affirmative)?,
            negative: self.registry.get(input.negative)?,
            moderator: self.registry.get(moderator)?,
        };

        if moderator == input.affirmative || moderator == input.negative {
            warn!(
                "Moderator {} is also debating; its checks and summary may favor its own side",
                moderator
            );
        }

        let topic = input.topic.content();
        info!(
            "Starting debate: {} ({} vs {}, {} rounds)",
            topic,
            input.affirmative,
            input.negative,
            plan.rounds()
        );
        sink.emit(SessionEvent::progress(
            "Starting debate",
            json!({ "topic": topic, "rounds": plan.rounds() }),
        ));

        let mut messages: Vec<DebateMessage> = Vec::new();

        for step in plan.steps() {
            check_cancelled(token)?;
            sink.emit(SessionEvent::progress(
                step.status(),
                json!({ "round": step.round, "stage": step.stage() }),
            ));

            let prompt = Self::prompt_for(&step, topic, &messages);
            let adapter = seats.for_role(step.role);
            // Checks may not become messages, so they are never streamed
            let stream_as = match step.phase {
                DebatePhase::InterventionCheck(_) => None,
                _ if self.settings.streaming => Some(messages.len()),
                _ => None,
            };

            let text = match invoke_model(adapter, &prompt, stream_as, sink, token).await {
                Ok(text) => text,
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) if step.is_degradable() => {
                    warn!("{} failed, continuing without it: {}", step.status(), e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let message = match step.phase {
                DebatePhase::InterventionCheck(side) => match parse_intervention(&text) {
                    Some(explanation) => {
                        info!("Moderator intervened on {} in round {}", side, step.round);
                        sink.emit(SessionEvent::progress(
                            "Moderator intervening",
                            json!({ "round": step.round, "stage": "moderator" }),
                        ));
                        DebateMessage::new(
                            DebateRole::Moderator,
                            moderator,
                            intervention_text(&explanation),
                            step.round,
                        )
                    }
                    None => {
                        debug!("No intervention on {} in round {}", side, step.round);
                        continue;
                    }
                },
                _ => DebateMessage::new(step.role, adapter.participant(), text, step.round),
            };

            messages.push(message.clone());
            sink.emit(SessionEvent::message(message));
        }

        check_cancelled(token)?;
        sink.emit(SessionEvent::progress(
            "Judges deliberating",
            json!({ "stage": "judging" }),
        ));
        let request = JudgeRequest::Debate {
            topic: topic.to_string(),
            affirmative_text: side_text(&messages, DebateRole::Affirmative),
            negative_text: side_text(&messages, DebateRole::Negative),
        };
        let verdicts = self.judges.run(&request, token).await?;

        info!("Debate finished with {} messages", messages.len());
        Ok(DebateResult {
            topic: topic.to_string(),
            affirmative_model: input.affirmative,
            negative_model: input.negative,
            rounds: plan.rounds(),
            messages,
            verdicts,
        })
    }

    fn prompt_for(step: &DebateStep, topic: &str, messages: &[DebateMessage]) -> String {
        let latest_by = |role: DebateRole| {
            messages
                .iter()
                .rev()
                .find(|m| m.role == role)
                .map(|m| m.text.as_str())
                .unwrap_or_default()
        };

        match step.phase {
            DebatePhase::Opening => {
                let previous = match step.role {
                    DebateRole::Negative => Some(latest_by(DebateRole::Affirmative)),
                    _ => None,
                };
                DebatePromptTemplate::opening(topic, step.role, previous)
            }
            DebatePhase::Rebuttal => {
                let opponent = step.role.opponent().unwrap_or(DebateRole::Moderator);
                DebatePromptTemplate::rebuttal(topic, step.role, latest_by(opponent))
            }
            DebatePhase::InterventionCheck(side) => {
                DebatePromptTemplate::intervention_check(latest_by(side))
            }
            DebatePhase::Closing => DebatePromptTemplate::closing(topic, step.role),
            DebatePhase::ModeratorSummary => {
                DebatePromptTemplate::moderator_summary(topic, &render_transcript(messages))
            }
        }
    }
}
