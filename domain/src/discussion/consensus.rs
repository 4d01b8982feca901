//! Consensus detection for discussions.
//!
//! A keyword heuristic over the most recent window of messages. Matching is
//! plain lowercase substring search, so `"no"` also matches `"know"`.

use super::entities::DiscussionMessage;

pub const AGREEMENT_KEYWORDS: &[&str] = &[
    "agree",
    "consensus",
    "correct",
    "right",
    "exactly",
    "yes",
    "concur",
];

pub const DISAGREEMENT_KEYWORDS: &[&str] = &[
    "disagree",
    "however",
    "but",
    "no",
    "incorrect",
    "wrong",
    "different",
];

/// When and how consensus is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusRule {
    /// Window size, one message per participant
    pub window: usize,
    /// No check before the transcript has this many messages
    pub min_messages: usize,
    /// Agreeing messages in the window needed for consensus
    pub threshold: usize,
}

impl ConsensusRule {
    pub const DEFAULT_MIN_MESSAGES: usize = 6;

    /// Rule for `participants` speakers: threshold ⌈2N/3⌉, checked from message 6
    pub fn for_participants(participants: usize) -> Self {
        Self {
            window: participants,
            min_messages: Self::DEFAULT_MIN_MESSAGES,
            threshold: Self::default_threshold(participants),
        }
    }

    pub fn default_threshold(participants: usize) -> usize {
        (2 * participants).div_ceil(3)
    }

    pub fn with_min_messages(mut self, min_messages: usize) -> Self {
        self.min_messages = min_messages;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Whether a transcript of `len` messages is due for a check
    pub fn is_due(&self, len: usize) -> bool {
        self.window > 0 && len >= self.min_messages && len % self.window == 0
    }
}

/// A message agrees when it has an agreement keyword and no disagreement keyword
pub fn message_agrees(text: &str) -> bool {
    let lower = text.to_lowercase();
    let agrees = AGREEMENT_KEYWORDS.iter().any(|kw| lower.contains(kw));
    let disagrees = DISAGREEMENT_KEYWORDS.iter().any(|kw| lower.contains(kw));
    agrees && !disagrees
}

/// Check whether the transcript has reached consensus under `rule`.
///
/// Pure: the same transcript always yields the same answer.
pub fn check_consensus(messages: &[DiscussionMessage], rule: &ConsensusRule) -> bool {
    if !rule.is_due(messages.len()) {
        return false;
    }
    let window = &messages[messages.len() - rule.window..];
    let agreeing = window.iter().filter(|m| message_agrees(&m.text)).count();
    agreeing >= rule.threshold
}
