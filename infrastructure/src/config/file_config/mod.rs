//! Raw TOML configuration data types
//!
//! These structs mirror the TOML file. Conversion into application settings
//! reports bad values as [`ConfigIssue`]s and falls back to defaults, so one
//! typo never hides the rest of the file.

mod output;
mod providers;
mod server;
mod sessions;

pub use output::FileOutputConfig;
pub use providers::{FileProvidersConfig, FileVendorConfig};
pub use server::{FileLoggingConfig, FileServerConfig};
pub use sessions::{FileDebateConfig, FileDiscussionConfig, FileJudgesConfig};

use arena_application::ArenaConfig;
use arena_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Vendor credentials and model settings
    pub providers: FileProvidersConfig,
    pub debate: FileDebateConfig,
    pub discussion: FileDiscussionConfig,
    pub judges: FileJudgesConfig,
    pub output: FileOutputConfig,
    pub server: FileServerConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.debate.to_settings().1);
        issues.extend(self.discussion.to_settings().1);
        issues.extend(self.judges.to_settings().1);
        issues.extend(self.server.validate());
        issues
    }

    /// Application settings, with invalid values replaced by defaults.
    ///
    /// Call [`validate`](Self::validate) first to surface what was replaced.
    pub fn to_arena_config(&self) -> ArenaConfig {
        ArenaConfig::new(
            self.debate.to_settings().0,
            self.discussion.to_settings().0,
            self.judges.to_settings().0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_application::FailurePolicy;
    use arena_domain::{ConfigIssueCode, OutputFormat, Participant, has_errors};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers.openai]
model = "gpt-5-mini"

[debate]
rounds = 2
moderator = "gemini"
affirmative = "openai"
negative = "anthropic"
interventions = false

[discussion]
participants = ["anthropic", "gemini"]
max_messages_per_model = 4
summarizer = "gemini"

[judges]
panel = ["openai", "anthropic"]
on_failure = "degrade"

[output]
format = "json"

[server]
addr = "0.0.0.0:8080"

[logging]
dir = "/tmp/arena-logs"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());

        let arena = config.to_arena_config();
        assert_eq!(arena.debate().default_rounds, 2);
        assert_eq!(arena.debate().moderator, Participant::Gemini);
        assert!(!arena.debate().interventions);
        assert_eq!(
            arena.discussion().participants,
            vec![Participant::Anthropic, Participant::Gemini]
        );
        assert_eq!(arena.discussion().max_messages_per_model, 4);
        assert_eq!(arena.judges().panel.len(), 2);
        assert_eq!(arena.judges().on_failure, FailurePolicy::Degrade);

        assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-5-mini"));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert!(config.logging.dir.is_some());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.to_arena_config(), ArenaConfig::default());
        assert!(config.output.color);
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn test_validate_collects_across_sections() {
        let toml_str = r#"
[debate]
rounds = 0

[judges]
panel = []

[server]
chunk_timeout_secs = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::ZeroRounds,
                ConfigIssueCode::EmptyJudgePanel,
                ConfigIssueCode::ZeroTimeout
            ]
        );
        assert!(has_errors(&issues));
    }
}
