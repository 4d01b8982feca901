//! Participant value object identifying one LLM vendor

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A participant in a debate or discussion (Value Object)
///
/// Each participant is backed by exactly one model adapter. The key doubles
/// as the routing key into the adapter registry and as the display key in
/// transcripts and verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Gemini,
}

impl Participant {
    /// All participants in their canonical rotation order
    pub const ALL: [Participant; 3] = [
        Participant::OpenAi,
        Participant::Anthropic,
        Participant::Gemini,
    ];

    /// Get the string key for this participant
    pub fn as_str(&self) -> &'static str {
        match self {
            Participant::OpenAi => "openai",
            Participant::Anthropic => "anthropic",
            Participant::Gemini => "gemini",
        }
    }

    /// Human-readable name used inside prompts and transcripts
    pub fn display_name(&self) -> &'static str {
        match self {
            Participant::OpenAi => "ChatGPT-5",
            Participant::Anthropic => "Claude 4.5 Sonnet",
            Participant::Gemini => "Gemini 2.5",
        }
    }

    /// Get the default participant list (discussion seats and judge panel)
    pub fn default_panel() -> Vec<Participant> {
        Self::ALL.to_vec()
    }

    /// Substrings that identify this participant in free-form model output
    ///
    /// Used by the verdict parser when inferring a winner from prose.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Participant::OpenAi => &["openai", "chatgpt", "gpt"],
            Participant::Anthropic => &["anthropic", "claude"],
            Participant::Gemini => &["gemini"],
        }
    }
}

impl Default for Participant {
    /// Returns the default participant (Anthropic, the default referee)
    fn default() -> Self {
        Participant::Anthropic
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Participant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Participant::OpenAi),
            "anthropic" => Ok(Participant::Anthropic),
            "gemini" => Ok(Participant::Gemini),
            other => Err(DomainError::InvalidParticipant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_roundtrip() {
        for participant in Participant::ALL {
            let parsed: Participant = participant.to_string().parse().unwrap();
            assert_eq!(participant, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("OpenAI".parse::<Participant>().unwrap(), Participant::OpenAi);
        assert_eq!(" gemini ".parse::<Participant>().unwrap(), Participant::Gemini);
    }

    #[test]
    fn test_unknown_participant_is_rejected() {
        let err = "mistral".parse::<Participant>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidParticipant(ref s) if s == "mistral"));
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Participant::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let parsed: Participant = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(parsed, Participant::Anthropic);
    }

    #[test]
    fn test_default_panel_order() {
        assert_eq!(
            Participant::default_panel(),
            vec![Participant::OpenAi, Participant::Anthropic, Participant::Gemini]
        );
    }
}
