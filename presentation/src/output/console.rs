//! Console output formatter for debate and discussion results

use crate::output::formatter::OutputFormatter;
use arena_domain::{
    DebateResult, DebateRole, DiscussionResult, SessionResult, Verdict, VerdictTally, WinnerLabel,
};
use colored::Colorize;

/// Formats session results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete session result
    pub fn format(result: &SessionResult) -> String {
        match result {
            SessionResult::Debate(debate) => Self::format_debate(debate),
            SessionResult::Discussion(discussion) => Self::format_discussion(discussion),
        }
    }

    /// Format as JSON
    pub fn format_json(result: &SessionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Verdicts only (concise output)
    pub fn format_verdict_only(result: &SessionResult) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Topic:".bold(), result.topic()));

        match result {
            SessionResult::Debate(debate) => {
                output.push_str(&Self::verdicts(&debate.verdicts, |label| {
                    Self::debate_label(debate, label)
                }));
            }
            SessionResult::Discussion(discussion) => match &discussion.consensus {
                Some(summary) => {
                    output.push_str(&format!("\n{}\n{}\n", "Consensus:".green().bold(), summary));
                }
                None => {
                    output.push_str(&Self::verdicts(result.verdicts(), |label| {
                        Self::discussion_label(label)
                    }));
                }
            },
        }
        output
    }

    fn format_debate(debate: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Arena Debate"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), debate.topic));
        output.push_str(&format!(
            "{} {}\n",
            "Affirmative:".cyan().bold(),
            debate.affirmative_model.display_name()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Negative:".cyan().bold(),
            debate.negative_model.display_name()
        ));
        output.push_str(&format!("{} {}\n", "Rounds:".cyan().bold(), debate.rounds));

        output.push_str(&Self::section_header("Transcript"));
        for message in &debate.messages {
            let title = format!(
                "── {} · Round {} · {} ──",
                message.role.title(),
                message.round,
                message.model.display_name()
            );
            let title = match message.role {
                DebateRole::Moderator => title.magenta().bold(),
                _ => title.yellow().bold(),
            };
            output.push_str(&format!("\n{}\n{}\n", title, message.text));
        }

        output.push_str(&Self::section_header("Judges"));
        output.push_str(&Self::verdicts(&debate.verdicts, |label| {
            Self::debate_label(debate, label)
        }));

        output.push_str(&Self::footer());
        output
    }

    fn format_discussion(discussion: &DiscussionResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Arena Discussion"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), discussion.topic));

        output.push_str(&Self::section_header("Transcript"));
        for message in &discussion.messages {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!(
                    "── #{} {} ──",
                    message.message_number,
                    message.model.display_name()
                )
                .yellow()
                .bold(),
                message.text
            ));
        }

        match (&discussion.consensus, &discussion.verdicts) {
            (Some(summary), _) => {
                output.push_str(&Self::section_header("Consensus"));
                output.push_str(&format!("\n{}\n", summary));
            }
            (None, Some(verdicts)) => {
                output.push_str(&Self::section_header("No consensus - Judges"));
                output.push_str(&Self::verdicts(verdicts, Self::discussion_label));
            }
            (None, None) => {}
        }

        output.push_str(&Self::footer());
        output
    }

    /// One block per verdict, then the tally
    fn verdicts(verdicts: &[Verdict], label: impl Fn(WinnerLabel) -> String) -> String {
        let mut output = String::new();
        for verdict in verdicts {
            output.push_str(&format!(
                "\n{} {}\n{}\n",
                format!("{}:", verdict.judge.display_name()).cyan().bold(),
                label(verdict.winner).bold(),
                Self::indent(&verdict.reasoning, "  ")
            ));
        }

        let tally = VerdictTally::from_verdicts(verdicts);
        if tally.total > 0 {
            let leader = tally.leader();
            let outcome = if leader.is_tie() {
                "No clear winner".yellow().bold()
            } else {
                format!("Winner: {}", label(leader)).green().bold()
            };
            output.push_str(&format!(
                "\n{} {}  {}\n",
                "Tally:".bold(),
                tally.summary(),
                outcome
            ));
        }
        output
    }

    /// Debate labels name the model behind each side
    fn debate_label(debate: &DebateResult, label: WinnerLabel) -> String {
        match label {
            WinnerLabel::Affirmative => format!(
                "Affirmative ({})",
                debate.affirmative_model.display_name()
            ),
            WinnerLabel::Negative => {
                format!("Negative ({})", debate.negative_model.display_name())
            }
            other => Self::discussion_label(other),
        }
    }

    fn discussion_label(label: WinnerLabel) -> String {
        match label {
            WinnerLabel::Participant(p) => p.display_name().to_string(),
            WinnerLabel::Tie => "Tie".to_string(),
            other => other.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &SessionResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &SessionResult) -> String {
        Self::format_json(result)
    }

    fn format_verdict_only(&self, result: &SessionResult) -> String {
        Self::format_verdict_only(result)
    }
}
