//! Application-level configuration.
//!
//! This module provides the settings that control how use cases behave:
//!
//! - [`DebateSettings`]: moderator, interventions, streaming
//! - [`DiscussionSettings`]: seats, caps, consensus rule, summarizer
//! - [`JudgeSettings`]: panel, concurrency, failure policy
//! - [`ArenaConfig`]: container handed to the session runner

pub mod arena_config;
pub mod judge_settings;
pub mod session_settings;

pub use arena_config::ArenaConfig;
pub use judge_settings::{FailurePolicy, JudgeSettings};
pub use session_settings::{DebateSettings, DiscussionSettings};
