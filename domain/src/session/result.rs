//! Final session outcome

use crate::debate::entities::DebateResult;
use crate::discussion::entities::DiscussionResult;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Which orchestrator produced a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Debate,
    Discussion,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Debate => "debate",
            SessionMode::Discussion => "discussion",
        }
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of either kind of session, serialized with a `mode` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SessionResult {
    Debate(DebateResult),
    Discussion(DiscussionResult),
}

impl SessionResult {
    pub fn mode(&self) -> SessionMode {
        match self {
            SessionResult::Debate(_) => SessionMode::Debate,
            SessionResult::Discussion(_) => SessionMode::Discussion,
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            SessionResult::Debate(r) => &r.topic,
            SessionResult::Discussion(r) => &r.topic,
        }
    }

    /// Verdicts, empty for a discussion that reached consensus
    pub fn verdicts(&self) -> &[Verdict] {
        match self {
            SessionResult::Debate(r) => &r.verdicts,
            SessionResult::Discussion(r) => r.verdicts.as_deref().unwrap_or(&[]),
        }
    }

    pub fn message_count(&self) -> usize {
        match self {
            SessionResult::Debate(r) => r.messages.len(),
            SessionResult::Discussion(r) => r.messages.len(),
        }
    }
}

impl From<DebateResult> for SessionResult {
    fn from(r: DebateResult) -> Self {
        SessionResult::Debate(r)
    }
}

impl From<DiscussionResult> for SessionResult {
    fn from(r: DiscussionResult) -> Self {
        SessionResult::Discussion(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discussion::entities::DiscussionMessage;
    use crate::core::participant::Participant;

    #[test]
    fn test_mode_tag_is_flattened_into_result() {
        let result: SessionResult = DiscussionResult::with_consensus(
            "T",
            vec![DiscussionMessage::new(Participant::OpenAi, "Yes.", 1)],
            "Agreed.",
        )
        .into();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "discussion");
        assert_eq!(json["topic"], "T");
        assert_eq!(json["consensus"], "Agreed.");
        assert!(result.verdicts().is_empty());
        assert_eq!(result.message_count(), 1);
    }

    #[test]
    fn test_tagged_result_round_trips() {
        let json = r#"{"mode":"debate","topic":"T","affirmativeModel":"openai","negativeModel":"gemini","rounds":1,"messages":[],"verdicts":[]}"#;
        let result: SessionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.mode(), SessionMode::Debate);
        assert_eq!(result.topic(), "T");
    }
}
