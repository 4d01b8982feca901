//! Debate prompts

use crate::debate::entities::DebateRole;

/// Templates for the debaters and the moderator
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    fn intro(topic: &str, side: DebateRole) -> String {
        format!("You are debating the {} side of: \"{}\"", side.as_str(), topic)
    }

    /// Affirmative opening, or the negative opening answering it
    pub fn opening(topic: &str, side: DebateRole, affirmative_opening: Option<&str>) -> String {
        match affirmative_opening {
            Some(previous) => format!(
                r#"{}

The affirmative just said:
"{}"

Write a brief opening (100-150 words) with 2-3 counter-arguments."#,
                Self::intro(topic, side),
                previous
            ),
            None => format!(
                r#"{}

Write a brief opening statement (100-150 words) presenting your 2-3 strongest arguments.
Be clear and persuasive."#,
                Self::intro(topic, side)
            ),
        }
    }

    /// Rebuttal against the opponent's most recent message
    pub fn rebuttal(topic: &str, side: DebateRole, opponent_text: &str) -> String {
        let opponent = side.opponent().unwrap_or(DebateRole::Moderator);
        format!(
            r#"{}

The {} just argued:
"{}"

Write a quick rebuttal (75-100 words). Address their key point and strengthen your case."#,
            Self::intro(topic, side),
            opponent.as_str(),
            opponent_text
        )
    }

    pub fn closing(topic: &str, side: DebateRole) -> String {
        format!(
            r#"{}

Final statement in 75-100 words: summarize your strongest point and why you win."#,
            Self::intro(topic, side)
        )
    }

    /// Fallacy check for a single argument; answered with `INTERVENE: ...` or `OK`
    pub fn intervention_check(argument: &str) -> String {
        format!(
            r#"You are a debate moderator. Analyze this argument for logical fallacies, bias, or misleading claims.

Argument: "{}"

If you detect ANY of these issues, respond with "INTERVENE: [brief 30-50 word explanation]"
If the argument is sound, respond with "OK""#,
            argument
        )
    }

    /// Neutral analysis of the rendered transcript
    pub fn moderator_summary(topic: &str, transcript: &str) -> String {
        format!(
            r#"You are a neutral debate moderator analyzing this debate on: "{}"

Full transcript:
{}

Provide a brief analysis (150-200 words):
1. Key clash points
2. Strongest arguments from each side
3. Any logical gaps
DO NOT pick a winner."#,
            topic, transcript
        )
    }
}
