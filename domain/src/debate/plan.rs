//! The step sequence of a debate.
//!
//! A debate has no early exit, so its whole shape is known up front:
//!
//! ```text
//! OPENING(aff) → OPENING(neg)
//!   → [REBUTTAL(aff) → CHECK → REBUTTAL(neg) → CHECK] × (rounds - 1)
//!   → CLOSING(aff) → CLOSING(neg) → MODERATOR_SUMMARY
//! ```
//!
//! Judging follows the plan and is not part of it.

use super::entities::DebateRole;
use crate::core::error::DomainError;

/// What a step asks a model to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebatePhase {
    Opening,
    Rebuttal,
    /// Moderator reviews the most recent message of the given side
    InterventionCheck(DebateRole),
    Closing,
    ModeratorSummary,
}

/// One model call in a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebateStep {
    pub phase: DebatePhase,
    /// Who speaks: a side, or the moderator for checks and the summary
    pub role: DebateRole,
    /// Round number recorded on the resulting message
    pub round: usize,
}

impl DebateStep {
    /// Whether a failure of this step may be skipped instead of aborting.
    ///
    /// Moderator steps are commentary; the debate is complete without them.
    pub fn is_degradable(&self) -> bool {
        self.role == DebateRole::Moderator
    }

    /// Progress narration for this step
    pub fn status(&self) -> String {
        match self.phase {
            DebatePhase::Opening => format!("Round {}: {} opening", self.round, self.role.title()),
            DebatePhase::Rebuttal => {
                format!("Round {}: {} rebuttal", self.round, self.role.title())
            }
            DebatePhase::InterventionCheck(side) => format!(
                "Round {}: Moderator reviewing {} rebuttal",
                self.round,
                side.title()
            ),
            DebatePhase::Closing => format!("Closing: {} final statement", self.role.title()),
            DebatePhase::ModeratorSummary => "Moderator analyzing debate".to_string(),
        }
    }

    /// Stage tag attached to progress events
    pub fn stage(&self) -> &'static str {
        match self.phase {
            DebatePhase::Opening | DebatePhase::Rebuttal => self.role.as_str(),
            DebatePhase::InterventionCheck(_) | DebatePhase::ModeratorSummary => "moderator",
            DebatePhase::Closing => "closing",
        }
    }
}

/// Validated debate shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebatePlan {
    rounds: usize,
    interventions: bool,
}

impl DebatePlan {
    pub const DEFAULT_ROUNDS: usize = 3;

    /// Create a plan with intervention checks enabled. `rounds` must be at least 1.
    pub fn new(rounds: usize) -> Result<Self, DomainError> {
        if rounds == 0 {
            return Err(DomainError::InvalidRounds(rounds));
        }
        Ok(Self {
            rounds,
            interventions: true,
        })
    }

    pub fn with_interventions(mut self, enabled: bool) -> Self {
        self.interventions = enabled;
        self
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn interventions(&self) -> bool {
        self.interventions
    }

    /// Round number used by closings and the summary
    pub fn final_round(&self) -> usize {
        self.rounds + 1
    }

    /// Every step in execution order
    pub fn steps(&self) -> Vec<DebateStep> {
        let side = |phase, role, round| DebateStep { phase, role, round };
        let check = |target, round| DebateStep {
            phase: DebatePhase::InterventionCheck(target),
            role: DebateRole::Moderator,
            round,
        };

        let mut steps = vec![
            side(DebatePhase::Opening, DebateRole::Affirmative, 1),
            side(DebatePhase::Opening, DebateRole::Negative, 1),
        ];

        for round in 2..=self.rounds {
            for role in [DebateRole::Affirmative, DebateRole::Negative] {
                steps.push(side(DebatePhase::Rebuttal, role, round));
                if self.interventions {
                    steps.push(check(role, round));
                }
            }
        }

        let last = self.final_round();
        steps.push(side(DebatePhase::Closing, DebateRole::Affirmative, last));
        steps.push(side(DebatePhase::Closing, DebateRole::Negative, last));
        steps.push(DebateStep {
            phase: DebatePhase::ModeratorSummary,
            role: DebateRole::Moderator,
            round: last,
        });
        steps
    }
}

impl Default for DebatePlan {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            interventions: true,
        }
    }
}
