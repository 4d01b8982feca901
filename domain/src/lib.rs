//! Domain layer for llm-arena
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Two participants argue opposite sides of a resolution over a fixed number
//! of rounds, with a moderator checking rebuttals for fallacies and
//! summarizing at the end. A panel of judges then picks a side.
//!
//! ## Discussion
//!
//! Participants take turns in rotation until a keyword heuristic detects
//! consensus or every participant has used its message cap. Without
//! consensus the judges pick the most convincing participant.
//!
//! ## Verdict
//!
//! Judges answer in free form; [`parse_verdict`] turns any response into a
//! winner within the session's [`VerdictDomain`] without ever failing.

pub mod config;
pub mod core;
pub mod debate;
pub mod discussion;
pub mod prompt;
pub mod session;
pub mod verdict;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity, has_errors};
pub use core::{
    error::DomainError,
    participant::Participant,
    string::{take_chars, truncate},
    topic::Topic,
};
pub use debate::{DebateMessage, DebatePhase, DebatePlan, DebateResult, DebateRole, DebateStep};
pub use discussion::{
    ConsensusRule, DiscussionMessage, DiscussionResult, TurnScheduler, check_consensus,
};
pub use prompt::{DebatePromptTemplate, DiscussionPromptTemplate, JudgePromptTemplate};
pub use session::{SessionEvent, SessionMode, SessionResult, TranscriptMessage};
pub use verdict::{
    ParsedVerdict, Verdict, VerdictDomain, VerdictTally, WinnerLabel, parse_verdict,
};
