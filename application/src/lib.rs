//! Application layer for llm-arena
//!
//! This crate contains the session orchestrators, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ArenaConfig, DebateSettings, DiscussionSettings, FailurePolicy, JudgeSettings};
pub use error::SessionError;
pub use ports::{
    event_sink::{ChannelEventSink, EventSink, FanoutEventSink, NoEvents},
    model_adapter::{
        AdapterRegistry, FragmentStream, ModelAdapter, ProviderError, StreamEvent, ensure_prompt,
    },
};
pub use use_cases::run_debate::{RunDebateInput, RunDebateUseCase};
pub use use_cases::run_discussion::{RunDiscussionInput, RunDiscussionUseCase};
pub use use_cases::run_judges::{JudgePanel, JudgeRequest};
pub use use_cases::session_runner::SessionRunner;
