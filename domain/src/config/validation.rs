//! Structured configuration issues.
//!
//! Configuration loaders report problems as [`ConfigIssue`]s instead of
//! failing on the first one, so every problem can be shown at once.
//!
//! # Examples
//!
//! ```
//! use arena_domain::config::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
//!
//! let issues = vec![ConfigIssue::warning(
//!     ConfigIssueCode::ModeratorIsDebater,
//!     "moderator also debates",
//! )];
//! assert!(!has_errors(&issues));
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A participant key that names no known vendor.
    UnknownParticipant,
    /// `[debate] rounds = 0`.
    ZeroRounds,
    /// `[discussion] max_messages_per_model = 0`.
    ZeroMessageCap,
    /// Fewer than two discussion participants, or a participant listed twice.
    InvalidParticipantList,
    /// `[judges] panel` is empty.
    EmptyJudgePanel,
    /// `[judges] max_concurrency = 0`.
    ZeroConcurrency,
    /// `[judges] on_failure` is neither `abort` nor `degrade`.
    UnknownFailurePolicy,
    /// Consensus threshold larger than the window: consensus can never be reached.
    UnreachableConsensus,
    /// The debate moderator is configured as one of the default debaters.
    ModeratorIsDebater,
    /// A timeout of zero seconds.
    ZeroTimeout,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Returns true if any issue is fatal.
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_errors_returns_true_for_errors() {
        let issues = vec![
            ConfigIssue::warning(ConfigIssueCode::ModeratorIsDebater, "w"),
            ConfigIssue::error(ConfigIssueCode::ZeroRounds, "e"),
        ];
        assert!(has_errors(&issues));
    }

    #[test]
    fn has_errors_returns_false_for_warnings_only() {
        let issues = vec![ConfigIssue::warning(
            ConfigIssueCode::UnreachableConsensus,
            "w",
        )];
        assert!(!has_errors(&issues));
        assert!(!has_errors(&[]));
    }
}
