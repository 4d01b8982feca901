//! Output formatter trait

use arena_domain::{OutputFormat, SessionResult};

/// Trait for formatting session results
pub trait OutputFormatter {
    /// Transcript, verdicts and tally
    fn format(&self, result: &SessionResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &SessionResult) -> String;

    /// Verdicts and tally only, or the consensus summary
    fn format_verdict_only(&self, result: &SessionResult) -> String;

    /// Dispatch on the selected output format
    fn render(&self, result: &SessionResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Verdict => self.format_verdict_only(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
