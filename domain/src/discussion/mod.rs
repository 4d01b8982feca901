//! Discussion subdomain.
//!
//! - [`entities`]: transcript messages and the final result
//! - [`scheduler::TurnScheduler`]: round-robin turn order with per-model caps
//! - [`consensus`]: keyword heuristic for detecting agreement

pub mod consensus;
pub mod entities;
pub mod scheduler;

pub use consensus::{
    AGREEMENT_KEYWORDS, ConsensusRule, DISAGREEMENT_KEYWORDS, check_consensus, message_agrees,
};
pub use entities::{DiscussionMessage, DiscussionResult, contributions, render_context};
pub use scheduler::TurnScheduler;
