//! Debate transcript entities

use crate::core::participant::Participant;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Who a debate message speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebateRole {
    Affirmative,
    Negative,
    Moderator,
}

impl DebateRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateRole::Affirmative => "affirmative",
            DebateRole::Negative => "negative",
            DebateRole::Moderator => "moderator",
        }
    }

    /// Capitalized label used in progress narration
    pub fn title(&self) -> &'static str {
        match self {
            DebateRole::Affirmative => "Affirmative",
            DebateRole::Negative => "Negative",
            DebateRole::Moderator => "Moderator",
        }
    }

    /// The other debating side. The moderator has no opponent.
    pub fn opponent(&self) -> Option<DebateRole> {
        match self {
            DebateRole::Affirmative => Some(DebateRole::Negative),
            DebateRole::Negative => Some(DebateRole::Affirmative),
            DebateRole::Moderator => None,
        }
    }
}

impl std::fmt::Display for DebateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a debate transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateMessage {
    pub role: DebateRole,
    pub model: Participant,
    pub text: String,
    pub round: usize,
}

impl DebateMessage {
    pub fn new(role: DebateRole, model: Participant, text: impl Into<String>, round: usize) -> Self {
        Self {
            role,
            model,
            text: text.into(),
            round,
        }
    }

    /// `[ROLE - Round n]: text`
    pub fn transcript_line(&self) -> String {
        format!(
            "[{} - Round {}]: {}",
            self.role.as_str().to_uppercase(),
            self.round,
            self.text
        )
    }
}

/// Render a full transcript, one block per message separated by blank lines
pub fn render_transcript(messages: &[DebateMessage]) -> String {
    messages
        .iter()
        .map(DebateMessage::transcript_line)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Outcome of a completed debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateResult {
    pub topic: String,
    pub affirmative_model: Participant,
    pub negative_model: Participant,
    pub rounds: usize,
    pub messages: Vec<DebateMessage>,
    pub verdicts: Vec<Verdict>,
}

impl DebateResult {
    /// Messages spoken by `role`, in transcript order
    pub fn messages_by(&self, role: DebateRole) -> impl Iterator<Item = &DebateMessage> {
        self.messages.iter().filter(move |m| m.role == role)
    }

    /// Moderator messages that are interventions rather than the closing summary
    pub fn interventions(&self) -> impl Iterator<Item = &DebateMessage> {
        self.messages_by(DebateRole::Moderator)
            .filter(|m| m.text.starts_with(super::moderation::INTERVENTION_PREFIX))
    }
}

/// Concatenate everything `role` said, separated by blank lines
pub fn side_text(messages: &[DebateMessage], role: DebateRole) -> String {
    messages
        .iter()
        .filter(|m| m.role == role)
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::WinnerLabel;

    fn sample() -> Vec<DebateMessage> {
        vec![
            DebateMessage::new(DebateRole::Affirmative, Participant::OpenAi, "A1", 1),
            DebateMessage::new(DebateRole::Negative, Participant::Gemini, "N1", 1),
            DebateMessage::new(DebateRole::Affirmative, Participant::OpenAi, "A2", 2),
        ]
    }

    #[test]
    fn test_transcript_rendering() {
        assert_eq!(
            render_transcript(&sample()),
            "[AFFIRMATIVE - Round 1]: A1\n\n[NEGATIVE - Round 1]: N1\n\n[AFFIRMATIVE - Round 2]: A2"
        );
    }

    #[test]
    fn test_side_text_joins_with_blank_lines() {
        assert_eq!(side_text(&sample(), DebateRole::Affirmative), "A1\n\nA2");
        assert_eq!(side_text(&sample(), DebateRole::Moderator), "");
    }

    #[test]
    fn test_opponent() {
        assert_eq!(DebateRole::Affirmative.opponent(), Some(DebateRole::Negative));
        assert_eq!(DebateRole::Moderator.opponent(), None);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = DebateResult {
            topic: "T".to_string(),
            affirmative_model: Participant::OpenAi,
            negative_model: Participant::Anthropic,
            rounds: 1,
            messages: sample(),
            verdicts: vec![Verdict::new(Participant::Gemini, WinnerLabel::Tie, "Even.")],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["affirmativeModel"], "openai");
        assert_eq!(json["negativeModel"], "anthropic");
        assert_eq!(json["messages"][1]["role"], "negative");
        assert_eq!(json["messages"][1]["round"], 1);
        assert_eq!(json["verdicts"][0]["winner"], "tie");
    }
}
