//! Debate and discussion settings

use arena_domain::{ConsensusRule, DebatePlan, Participant, TurnScheduler};

/// How debates run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateSettings {
    /// Rounds used when the caller does not choose
    pub default_rounds: usize,
    /// Model behind intervention checks and the closing summary
    pub moderator: Participant,
    /// Ask the moderator to check every rebuttal
    pub interventions: bool,
    /// Request responses as fragment streams and emit chunk events
    pub streaming: bool,
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self {
            default_rounds: DebatePlan::DEFAULT_ROUNDS,
            moderator: Participant::Anthropic,
            interventions: true,
            streaming: true,
        }
    }
}

/// How discussions run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionSettings {
    /// Speakers in rotation order
    pub participants: Vec<Participant>,
    pub max_messages_per_model: usize,
    pub consensus_min_messages: usize,
    /// Agreeing messages needed; `None` means ⌈2N/3⌉
    pub consensus_threshold: Option<usize>,
    /// Model that writes the consensus summary
    pub summarizer: Participant,
    pub streaming: bool,
}

impl DiscussionSettings {
    pub fn consensus_rule(&self) -> ConsensusRule {
        let rule = ConsensusRule::for_participants(self.participants.len())
            .with_min_messages(self.consensus_min_messages);
        match self.consensus_threshold {
            Some(threshold) => rule.with_threshold(threshold),
            None => rule,
        }
    }
}

impl Default for DiscussionSettings {
    fn default() -> Self {
        Self {
            participants: Participant::default_panel(),
            max_messages_per_model: TurnScheduler::DEFAULT_CAP,
            consensus_min_messages: ConsensusRule::DEFAULT_MIN_MESSAGES,
            consensus_threshold: None,
            summarizer: Participant::Anthropic,
            streaming: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_consensus_rule() {
        let rule = DiscussionSettings::default().consensus_rule();
        assert_eq!(rule.window, 3);
        assert_eq!(rule.min_messages, 6);
        assert_eq!(rule.threshold, 2);
    }

    #[test]
    fn test_threshold_override() {
        let settings = DiscussionSettings {
            consensus_threshold: Some(3),
            ..Default::default()
        };
        assert_eq!(settings.consensus_rule().threshold, 3);
    }
}
