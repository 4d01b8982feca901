//! Judge prompts

use crate::core::participant::Participant;

/// Templates for the judging panel
pub struct JudgePromptTemplate;

impl JudgePromptTemplate {
    /// Debate judging over each side's concatenated text
    pub fn debate(topic: &str, affirmative: &str, negative: &str) -> String {
        format!(
            r#"You are a debate judge.
Resolution: {}

Affirmative:
---
{}
---

Negative:
---
{}
---

Judge using the following criteria, weighing each equally:
- Use of evidence and warrants
- Responsiveness and clash
- Impact analysis and comparative reasoning
- Clarity and structure

Return ONLY a JSON object with:
{{
  "winner": "affirmative" | "negative" | "tie",
  "reasoning": "one concise paragraph (80-150 words) explaining your decision"
}}"#,
            topic, affirmative, negative
        )
    }

    /// Discussion judging with one labeled block per participant
    pub fn discussion(topic: &str, contributions: &[(Participant, String)]) -> String {
        let mut prompt = format!(
            "You are judging a discussion between {} AI models on: \"{}\"\n",
            contributions.len(),
            topic
        );

        for (participant, text) in contributions {
            prompt.push_str(&format!(
                "\n{} perspective:\n---\n{}\n---\n",
                participant.display_name(),
                text
            ));
        }

        let options = contributions
            .iter()
            .map(|(p, _)| format!("\"{}\"", p.as_str()))
            .chain(std::iter::once("\"tie\"".to_string()))
            .collect::<Vec<_>>()
            .join(" | ");

        prompt.push_str(&format!(
            r#"
Judge which model's overall stance and reasoning is most convincing.

Return ONLY a JSON object with:
{{
  "winner": {},
  "reasoning": "one concise paragraph (80-150 words) explaining your decision"
}}"#,
            options
        ));

        prompt
    }
}
