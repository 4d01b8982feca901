//! Judge verdicts and their aggregation

use super::label::WinnerLabel;
use crate::core::participant::Participant;
use serde::{Deserialize, Serialize};

/// A single judge's decision
///
/// # Example
///
/// ```
/// use arena_domain::{Participant, Verdict, WinnerLabel};
///
/// let verdict = Verdict::new(Participant::Gemini, WinnerLabel::Negative, "Stronger clash.");
/// assert_eq!(verdict.judge, Participant::Gemini);
/// assert!(!verdict.winner.is_tie());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The judging participant
    pub judge: Participant,
    /// Winner within the session's verdict domain
    pub winner: WinnerLabel,
    /// Justification text
    pub reasoning: String,
}

impl Verdict {
    pub fn new(judge: Participant, winner: WinnerLabel, reasoning: impl Into<String>) -> Self {
        Self {
            judge,
            winner,
            reasoning: reasoning.into(),
        }
    }
}

/// Aggregated view over a verdict list
///
/// Counts are kept in first-seen order so that display is stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictTally {
    /// (label, count) pairs in first-seen order
    pub counts: Vec<(WinnerLabel, usize)>,
    /// Total verdicts counted
    pub total: usize,
}

impl VerdictTally {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut counts: Vec<(WinnerLabel, usize)> = Vec::new();
        for verdict in verdicts {
            match counts.iter_mut().find(|(label, _)| *label == verdict.winner) {
                Some((_, count)) => *count += 1,
                None => counts.push((verdict.winner, 1)),
            }
        }
        Self {
            counts,
            total: verdicts.len(),
        }
    }

    /// Number of verdicts naming `label`
    pub fn count(&self, label: WinnerLabel) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// The label with a strict plurality, or `Tie` if the top is shared
    /// (or if no verdicts were counted).
    pub fn leader(&self) -> WinnerLabel {
        let Some(max) = self.counts.iter().map(|(_, c)| *c).max() else {
            return WinnerLabel::Tie;
        };
        let mut top = self.counts.iter().filter(|(_, c)| *c == max);
        match (top.next(), top.next()) {
            (Some((label, _)), None) => *label,
            _ => WinnerLabel::Tie,
        }
    }

    /// Whether every verdict named the same label
    pub fn is_unanimous(&self) -> bool {
        self.total > 0 && self.counts.len() == 1
    }

    /// Visual summary, e.g. "affirmative 2 · negative 1"
    pub fn summary(&self) -> String {
        self.counts
            .iter()
            .map(|(label, count)| format!("{} {}", label, count))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}
