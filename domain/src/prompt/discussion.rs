//! Discussion prompts

use crate::core::participant::Participant;

/// Templates for discussion turns and the consensus summary
pub struct DiscussionPromptTemplate;

impl DiscussionPromptTemplate {
    /// First message of the discussion
    pub fn opening(speaker: Participant, others: &[Participant], topic: &str) -> String {
        format!(
            r#"You are {} participating in a collaborative discussion with {}.

Topic: "{}"

Provide your initial answer or perspective on this topic in 100-150 words. Be clear and thoughtful."#,
            speaker.display_name(),
            join_names(others),
            topic
        )
    }

    /// Any later message, given the rendered discussion so far
    pub fn response(speaker: Participant, topic: &str, context: &str) -> String {
        format!(
            r#"You are {} participating in a collaborative discussion with other AI models.

Topic: "{}"

Discussion so far:
{}

Respond to the discussion above (100-150 words). If you agree with the previous points, say so explicitly. If you disagree or have a different perspective, explain your reasoning clearly."#,
            speaker.display_name(),
            topic,
            context
        )
    }

    /// Summary of the position the final statements agree on
    pub fn consensus_summary(topic: &str, final_statements: &str) -> String {
        format!(
            r#"The following AI models have reached consensus on the topic: "{}"

Final statements:
{}

Provide a brief summary (50-100 words) of the consensus position they've agreed upon."#,
            topic, final_statements
        )
    }
}

/// "A", "A and B", "A, B and C"
fn join_names(participants: &[Participant]) -> String {
    let names: Vec<&str> = participants.iter().map(|p| p.display_name()).collect();
    match names.split_last() {
        None => "other AI models".to_string(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
