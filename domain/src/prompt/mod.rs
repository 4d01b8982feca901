//! Prompt templates for every model call the orchestrators make

mod debate;
mod discussion;
mod judge;

pub use debate::DebatePromptTemplate;
pub use discussion::DiscussionPromptTemplate;
pub use judge::JudgePromptTemplate;
