//! Winner labels and the verdict domains they range over

use crate::core::participant::Participant;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The winner named by a judge
///
/// Which labels are valid depends on the [`VerdictDomain`]: debates are won
/// by a side, discussions by a participant. `Tie` is valid in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinnerLabel {
    Affirmative,
    Negative,
    Participant(Participant),
    Tie,
}

impl WinnerLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WinnerLabel::Affirmative => "affirmative",
            WinnerLabel::Negative => "negative",
            WinnerLabel::Participant(p) => p.as_str(),
            WinnerLabel::Tie => "tie",
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, WinnerLabel::Tie)
    }

    /// Parse any known label, independent of domain
    fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "affirmative" => Some(WinnerLabel::Affirmative),
            "negative" => Some(WinnerLabel::Negative),
            "tie" => Some(WinnerLabel::Tie),
            other => other.parse().ok().map(WinnerLabel::Participant),
        }
    }
}

impl std::fmt::Display for WinnerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for WinnerLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WinnerLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WinnerLabel::from_key(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown winner label: {}", s)))
    }
}

/// The set of labels a judge may choose from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerdictDomain {
    /// Two-party debate: affirmative, negative or tie
    Debate,
    /// N-party discussion: one of the participants or tie
    Discussion(Vec<Participant>),
}

impl VerdictDomain {
    /// Labels a judge may name as winner, excluding `Tie`
    pub fn candidates(&self) -> Vec<WinnerLabel> {
        match self {
            VerdictDomain::Debate => vec![WinnerLabel::Affirmative, WinnerLabel::Negative],
            VerdictDomain::Discussion(participants) => participants
                .iter()
                .copied()
                .map(WinnerLabel::Participant)
                .collect(),
        }
    }

    /// Whether `label` is valid in this domain
    pub fn contains(&self, label: WinnerLabel) -> bool {
        label.is_tie() || self.candidates().contains(&label)
    }

    /// Recognize an exact label string (case-insensitive) within this domain
    pub fn recognize(&self, s: &str) -> Option<WinnerLabel> {
        WinnerLabel::from_key(s).filter(|label| self.contains(*label))
    }

    /// Infer a winner from keyword presence in free text.
    ///
    /// Returns the single candidate whose keywords appear in the text, or
    /// `Tie` when no candidate or more than one candidate is mentioned.
    pub fn infer_from_text(&self, text: &str) -> WinnerLabel {
        let lower = text.to_lowercase();
        let mentioned: Vec<WinnerLabel> = self
            .candidates()
            .into_iter()
            .filter(|label| Self::keywords(label).iter().any(|kw| lower.contains(kw)))
            .collect();

        match mentioned.as_slice() {
            [only] => *only,
            _ => WinnerLabel::Tie,
        }
    }

    fn keywords(label: &WinnerLabel) -> Vec<String> {
        match label {
            WinnerLabel::Affirmative => vec!["affirmative".to_string()],
            WinnerLabel::Negative => vec!["negative".to_string()],
            WinnerLabel::Participant(p) => {
                let mut kws: Vec<String> = p.keywords().iter().map(|k| k.to_string()).collect();
                kws.push(p.display_name().to_lowercase());
                kws
            }
            WinnerLabel::Tie => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_as_string() {
        assert_eq!(
            serde_json::to_string(&WinnerLabel::Affirmative).unwrap(),
            "\"affirmative\""
        );
        assert_eq!(
            serde_json::to_string(&WinnerLabel::Participant(Participant::Gemini)).unwrap(),
            "\"gemini\""
        );
        let parsed: WinnerLabel = serde_json::from_str("\"tie\"").unwrap();
        assert_eq!(parsed, WinnerLabel::Tie);
    }

    #[test]
    fn test_recognize_respects_domain() {
        let debate = VerdictDomain::Debate;
        assert_eq!(debate.recognize("Negative"), Some(WinnerLabel::Negative));
        assert_eq!(debate.recognize("openai"), None);

        let discussion = VerdictDomain::Discussion(Participant::default_panel());
        assert_eq!(
            discussion.recognize("openai"),
            Some(WinnerLabel::Participant(Participant::OpenAi))
        );
        assert_eq!(discussion.recognize("affirmative"), None);
        assert_eq!(discussion.recognize("tie"), Some(WinnerLabel::Tie));
    }

    #[test]
    fn test_infer_single_mention() {
        let debate = VerdictDomain::Debate;
        assert_eq!(
            debate.infer_from_text("The Affirmative clearly carried the round."),
            WinnerLabel::Affirmative
        );
    }

    #[test]
    fn test_infer_ambiguous_is_tie() {
        let debate = VerdictDomain::Debate;
        assert_eq!(
            debate.infer_from_text("Both the affirmative and negative were strong."),
            WinnerLabel::Tie
        );
        assert_eq!(debate.infer_from_text("No names here."), WinnerLabel::Tie);
    }

    #[test]
    fn test_infer_uses_display_names() {
        let discussion = VerdictDomain::Discussion(Participant::default_panel());
        assert_eq!(
            discussion.infer_from_text("Claude made the most convincing case."),
            WinnerLabel::Participant(Participant::Anthropic)
        );
    }
}
