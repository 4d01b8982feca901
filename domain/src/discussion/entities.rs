//! Discussion transcript entities

use crate::core::participant::Participant;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// One contribution to a discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionMessage {
    pub model: Participant,
    pub text: String,
    /// 1-based position in the transcript
    pub message_number: usize,
}

impl DiscussionMessage {
    pub fn new(model: Participant, text: impl Into<String>, message_number: usize) -> Self {
        Self {
            model,
            text: text.into(),
            message_number,
        }
    }
}

/// Render messages as `<display name>: text` blocks separated by blank lines
pub fn render_context(messages: &[DiscussionMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.model.display_name(), m.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Outcome of a completed discussion
///
/// Exactly one of `consensus` and `verdicts` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionResult {
    pub topic: String,
    pub messages: Vec<DiscussionMessage>,
    pub consensus: Option<String>,
    pub required_judging: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdicts: Option<Vec<Verdict>>,
}

impl DiscussionResult {
    pub fn with_consensus(
        topic: impl Into<String>,
        messages: Vec<DiscussionMessage>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            messages,
            consensus: Some(summary.into()),
            required_judging: false,
            verdicts: None,
        }
    }

    pub fn judged(
        topic: impl Into<String>,
        messages: Vec<DiscussionMessage>,
        verdicts: Vec<Verdict>,
    ) -> Self {
        Self {
            topic: topic.into(),
            messages,
            consensus: None,
            required_judging: true,
            verdicts: Some(verdicts),
        }
    }

    /// Number of messages contributed by `participant`
    pub fn message_count(&self, participant: Participant) -> usize {
        self.messages.iter().filter(|m| m.model == participant).count()
    }
}

/// Everything each participant said, joined by blank lines, in `participants` order
pub fn contributions(
    messages: &[DiscussionMessage],
    participants: &[Participant],
) -> Vec<(Participant, String)> {
    participants
        .iter()
        .map(|p| {
            let text = messages
                .iter()
                .filter(|m| m.model == *p)
                .map(|m| m.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            (*p, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::WinnerLabel;

    fn sample() -> Vec<DiscussionMessage> {
        vec![
            DiscussionMessage::new(Participant::OpenAi, "First.", 1),
            DiscussionMessage::new(Participant::Anthropic, "Second.", 2),
            DiscussionMessage::new(Participant::OpenAi, "Third.", 3),
        ]
    }

    #[test]
    fn test_render_context_uses_display_names() {
        assert_eq!(
            render_context(&sample()[..2]),
            "ChatGPT-5: First.\n\nClaude 4.5 Sonnet: Second."
        );
        assert_eq!(render_context(&[]), "");
    }

    #[test]
    fn test_contributions_grouped_in_panel_order() {
        let grouped = contributions(&sample(), &Participant::default_panel());
        assert_eq!(grouped[0], (Participant::OpenAi, "First.\n\nThird.".to_string()));
        assert_eq!(grouped[1], (Participant::Anthropic, "Second.".to_string()));
        assert_eq!(grouped[2], (Participant::Gemini, String::new()));
    }

    #[test]
    fn test_consensus_result_omits_verdicts() {
        let result = DiscussionResult::with_consensus("T", sample(), "They agree.");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["consensus"], "They agree.");
        assert_eq!(json["requiredJudging"], false);
        assert!(json.get("verdicts").is_none());
        assert_eq!(json["messages"][2]["messageNumber"], 3);
    }

    #[test]
    fn test_judged_result() {
        let verdicts = vec![Verdict::new(
            Participant::OpenAi,
            WinnerLabel::Participant(Participant::Anthropic),
            "Best argued.",
        )];
        let result = DiscussionResult::judged("T", sample(), verdicts);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["consensus"].is_null());
        assert_eq!(json["requiredJudging"], true);
        assert_eq!(json["verdicts"][0]["winner"], "anthropic");
        assert_eq!(result.message_count(Participant::OpenAi), 2);
    }
}
