//! Judge panel use case
//!
//! Sends one prompt to every configured judge, parses each answer into a
//! verdict and returns the verdicts in panel order.

use crate::config::{FailurePolicy, JudgeSettings};
use crate::error::SessionError;
use crate::ports::model_adapter::{AdapterRegistry, ModelAdapter};
use arena_domain::{
    JudgePromptTemplate, Participant, Verdict, VerdictDomain, WinnerLabel, parse_verdict,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What the judges are asked to decide
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JudgeRequest {
    Debate {
        topic: String,
        affirmative_text: String,
        negative_text: String,
    },
    Discussion {
        topic: String,
        /// Everything each participant said, in seat order
        contributions: Vec<(Participant, String)>,
    },
}

impl JudgeRequest {
    pub fn prompt(&self) -> String {
        match self {
            JudgeRequest::Debate {
                topic,
                affirmative_text,
                negative_text,
            } => JudgePromptTemplate::debate(topic, affirmative_text, negative_text),
            JudgeRequest::Discussion {
                topic,
                contributions,
            } => JudgePromptTemplate::discussion(topic, contributions),
        }
    }

    /// Labels a verdict on this request may name
    pub fn domain(&self) -> VerdictDomain {
        match self {
            JudgeRequest::Debate { .. } => VerdictDomain::Debate,
            JudgeRequest::Discussion { contributions, .. } => {
                VerdictDomain::Discussion(contributions.iter().map(|(p, _)| *p).collect())
            }
        }
    }
}

/// The panel of judges
#[derive(Clone)]
pub struct JudgePanel {
    registry: Arc<AdapterRegistry>,
    settings: JudgeSettings,
}

impl JudgePanel {
    pub fn new(registry: Arc<AdapterRegistry>, settings: JudgeSettings) -> Self {
        Self { registry, settings }
    }

    pub fn settings(&self) -> &JudgeSettings {
        &self.settings
    }

    /// Ask every judge and wait for all of them.
    ///
    /// At most `max_concurrency` requests are in flight at once. The result
    /// has one verdict per judge, in panel order, whatever order the judges
    /// answer in.
    pub async fn run(
        &self,
        request: &JudgeRequest,
        token: &CancellationToken,
    ) -> Result<Vec<Verdict>, SessionError> {
        let judges = self
            .settings
            .panel
            .iter()
            .map(|judge| Ok((*judge, self.registry.get(*judge)?)))
            .collect::<Result<Vec<(Participant, Arc<dyn ModelAdapter>)>, SessionError>>()?;

        if token.is_cancelled() {
            return Err(SessionError::Cancelled);
        }

        let prompt = request.prompt();
        let domain = request.domain();
        let policy = self.settings.on_failure;
        info!(
            "Judging with {} judges (max {} concurrent, on failure: {})",
            judges.len(),
            self.settings.max_concurrency,
            policy
        );

        let prompt = prompt.as_str();
        let domain = &domain;
        let judge_calls = judges
            .into_iter()
            .map(|(judge, adapter)| async move {
                match adapter.invoke(prompt, None).await {
                    Ok(raw) => {
                        let parsed = parse_verdict(&raw, domain);
                        debug!(
                            "Judge {} → {} (parsed from {:?})",
                            judge, parsed.winner, parsed.source
                        );
                        Ok(Verdict::new(judge, parsed.winner, parsed.reasoning))
                    }
                    Err(e) if policy == FailurePolicy::Degrade => {
                        warn!("Judge {} failed, recording a tie: {}", judge, e);
                        Ok(Verdict::new(
                            judge,
                            WinnerLabel::Tie,
                            format!("Judge unavailable: {}", e),
                        ))
                    }
                    Err(e) => Err(SessionError::provider(judge, e)),
                }
            })
            .collect::<Vec<_>>();
        let collecting = stream::iter(judge_calls)
            .buffered(self.settings.max_concurrency.max(1))
            .try_collect::<Vec<_>>();

        let verdicts = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(SessionError::Cancelled),
            verdicts = collecting => verdicts?,
        };

        for verdict in &verdicts {
            info!("Judge {} voted {}", verdict.judge, verdict.winner);
        }
        Ok(verdicts)
    }
}
