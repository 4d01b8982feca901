//! Arena configuration container.
//!
//! [`ArenaConfig`] groups the per-use-case settings. Use cases receive only
//! the slice they need; the session runner holds the whole container.

use super::{DebateSettings, DiscussionSettings, JudgeSettings};
use arena_domain::Participant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArenaConfig {
    debate: DebateSettings,
    discussion: DiscussionSettings,
    judges: JudgeSettings,
}

impl ArenaConfig {
    pub fn new(debate: DebateSettings, discussion: DiscussionSettings, judges: JudgeSettings) -> Self {
        Self {
            debate,
            discussion,
            judges,
        }
    }

    // ==================== Accessors ====================

    pub fn debate(&self) -> &DebateSettings {
        &self.debate
    }

    pub fn discussion(&self) -> &DiscussionSettings {
        &self.discussion
    }

    pub fn judges(&self) -> &JudgeSettings {
        &self.judges
    }

    // ==================== Builder Methods ====================

    pub fn with_debate(mut self, debate: DebateSettings) -> Self {
        self.debate = debate;
        self
    }

    pub fn with_discussion(mut self, discussion: DiscussionSettings) -> Self {
        self.discussion = discussion;
        self
    }

    pub fn with_judges(mut self, judges: JudgeSettings) -> Self {
        self.judges = judges;
        self
    }

    /// Disable fragment streaming for both session kinds
    pub fn without_streaming(mut self) -> Self {
        self.debate.streaming = false;
        self.discussion.streaming = false;
        self
    }

    // ==================== Requirements ====================

    /// Participants that need an adapter regardless of the debaters chosen
    /// per session: the judge panel, the discussion seats, the moderator and
    /// the summarizer. Canonical order, no duplicates.
    pub fn required_participants(&self) -> Vec<Participant> {
        Participant::ALL
            .into_iter()
            .filter(|p| {
                self.judges.panel.contains(p)
                    || self.discussion.participants.contains(p)
                    || self.debate.moderator == *p
                    || self.discussion.summarizer == *p
            })
            .collect()
    }
}
