//! Debate subdomain.
//!
//! - [`entities`]: roles, transcript messages and the final result
//! - [`plan::DebatePlan`]: the fixed step sequence for a given round count
//! - [`moderation`]: interpreting the moderator's intervention check

pub mod entities;
pub mod moderation;
pub mod plan;

pub use entities::{DebateMessage, DebateResult, DebateRole, render_transcript, side_text};
pub use moderation::{INTERVENTION_PREFIX, INTERVENTION_SENTINEL, intervention_text, parse_intervention};
pub use plan::{DebatePhase, DebatePlan, DebateStep};
