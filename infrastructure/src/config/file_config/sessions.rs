//! Session configuration from TOML (`[debate]`, `[discussion]`, `[judges]`)
//!
//! Participant keys and the failure policy stay strings here so that an
//! unknown value becomes a [`ConfigIssue`] instead of a parse failure of the
//! whole file.

use arena_application::{DebateSettings, DiscussionSettings, FailurePolicy, JudgeSettings};
use arena_domain::{ConfigIssue, ConfigIssueCode, ConsensusRule, Participant};
use serde::{Deserialize, Serialize};

/// Parse one participant key, reporting unknown keys for `field`.
fn parse_participant(field: &str, value: &str, issues: &mut Vec<ConfigIssue>) -> Option<Participant> {
    match value.parse::<Participant>() {
        Ok(p) => Some(p),
        Err(_) => {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownParticipant,
                format!(
                    "{}: unknown participant '{}' (expected openai, anthropic or gemini)",
                    field, value
                ),
            ));
            None
        }
    }
}

/// Parse a participant list, dropping unknown keys and duplicates.
fn parse_participants(
    field: &str,
    values: &[String],
    issues: &mut Vec<ConfigIssue>,
) -> (Vec<Participant>, bool) {
    let mut parsed = Vec::new();
    let mut duplicated = false;
    for value in values {
        if let Some(p) = parse_participant(field, value, issues) {
            if parsed.contains(&p) {
                duplicated = true;
            } else {
                parsed.push(p);
            }
        }
    }
    (parsed, duplicated)
}

// ==================== [debate] ====================

/// Raw debate configuration
///
/// # Example
///
/// ```toml
/// [debate]
/// rounds = 3
/// affirmative = "openai"
/// negative = "gemini"
/// moderator = "anthropic"
/// interventions = true
/// streaming = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub rounds: usize,
    /// Debater used when the CLI does not name one
    pub affirmative: String,
    pub negative: String,
    pub moderator: String,
    pub interventions: bool,
    pub streaming: bool,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            affirmative: "openai".to_string(),
            negative: "gemini".to_string(),
            moderator: "anthropic".to_string(),
            interventions: true,
            streaming: true,
        }
    }
}

impl FileDebateConfig {
    /// Convert to [`DebateSettings`], falling back to defaults on bad values.
    pub fn to_settings(&self) -> (DebateSettings, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = DebateSettings::default();

        if self.rounds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRounds,
                "debate.rounds: must be at least 1",
            ));
        }

        let moderator = parse_participant("debate.moderator", &self.moderator, &mut issues)
            .unwrap_or(defaults.moderator);

        let (affirmative, negative) = self.default_debaters_with(&mut issues);
        if [affirmative, negative].contains(&Some(moderator)) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ModeratorIsDebater,
                format!(
                    "debate.moderator: '{}' also debates by default; it will referee its own side",
                    moderator
                ),
            ));
        }

        let settings = DebateSettings {
            default_rounds: if self.rounds == 0 {
                defaults.default_rounds
            } else {
                self.rounds
            },
            moderator,
            interventions: self.interventions,
            streaming: self.streaming,
        };
        (settings, issues)
    }

    /// Default affirmative and negative debaters, when both keys are valid
    pub fn default_debaters(&self) -> Option<(Participant, Participant)> {
        match self.default_debaters_with(&mut Vec::new()) {
            (Some(a), Some(n)) => Some((a, n)),
            _ => None,
        }
    }

    fn default_debaters_with(
        &self,
        issues: &mut Vec<ConfigIssue>,
    ) -> (Option<Participant>, Option<Participant>) {
        (
            parse_participant("debate.affirmative", &self.affirmative, issues),
            parse_participant("debate.negative", &self.negative, issues),
        )
    }
}

// ==================== [discussion] ====================

/// Raw discussion configuration
///
/// # Example
///
/// ```toml
/// [discussion]
/// participants = ["openai", "anthropic", "gemini"]
/// max_messages_per_model = 5
/// consensus_min_messages = 6
/// # consensus_threshold = 2   # default: two thirds of the participants
/// summarizer = "anthropic"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    pub participants: Vec<String>,
    pub max_messages_per_model: usize,
    pub consensus_min_messages: usize,
    pub consensus_threshold: Option<usize>,
    pub summarizer: String,
    pub streaming: bool,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        let defaults = DiscussionSettings::default();
        Self {
            participants: defaults
                .participants
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            max_messages_per_model: defaults.max_messages_per_model,
            consensus_min_messages: defaults.consensus_min_messages,
            consensus_threshold: None,
            summarizer: defaults.summarizer.as_str().to_string(),
            streaming: true,
        }
    }
}

impl FileDiscussionConfig {
    pub fn to_settings(&self) -> (DiscussionSettings, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = DiscussionSettings::default();

        let (participants, duplicated) =
            parse_participants("discussion.participants", &self.participants, &mut issues);
        if duplicated {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidParticipantList,
                "discussion.participants: each participant may be listed only once",
            ));
        }
        if participants.len() < 2 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidParticipantList,
                "discussion.participants: at least two participants are required",
            ));
        }

        if self.max_messages_per_model == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMessageCap,
                "discussion.max_messages_per_model: must be at least 1",
            ));
        }

        if let Some(threshold) = self.consensus_threshold {
            let window = ConsensusRule::for_participants(participants.len()).window;
            if threshold == 0 || threshold > window {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnreachableConsensus,
                    format!(
                        "discussion.consensus_threshold: {} outside 1..={}; consensus detection is effectively {}",
                        threshold,
                        window,
                        if threshold == 0 { "always on" } else { "disabled" }
                    ),
                ));
            }
        }

        let summarizer = parse_participant("discussion.summarizer", &self.summarizer, &mut issues)
            .unwrap_or(defaults.summarizer);

        let settings = DiscussionSettings {
            participants: if participants.len() < 2 {
                defaults.participants
            } else {
                participants
            },
            max_messages_per_model: if self.max_messages_per_model == 0 {
                defaults.max_messages_per_model
            } else {
                self.max_messages_per_model
            },
            consensus_min_messages: self.consensus_min_messages,
            consensus_threshold: self.consensus_threshold,
            summarizer,
            streaming: self.streaming,
        };
        (settings, issues)
    }
}

// ==================== [judges] ====================

/// Raw judge panel configuration
///
/// # Example
///
/// ```toml
/// [judges]
/// panel = ["openai", "anthropic", "gemini"]
/// max_concurrency = 3
/// on_failure = "abort"   # or "degrade"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgesConfig {
    pub panel: Vec<String>,
    pub max_concurrency: usize,
    pub on_failure: String,
}

impl Default for FileJudgesConfig {
    fn default() -> Self {
        let defaults = JudgeSettings::default();
        Self {
            panel: defaults
                .panel
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            max_concurrency: defaults.max_concurrency,
            on_failure: defaults.on_failure.as_str().to_string(),
        }
    }
}

impl FileJudgesConfig {
    pub fn to_settings(&self) -> (JudgeSettings, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = JudgeSettings::default();

        let (panel, duplicated) = parse_participants("judges.panel", &self.panel, &mut issues);
        if duplicated {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidParticipantList,
                "judges.panel: duplicate judges are ignored",
            ));
        }
        if panel.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyJudgePanel,
                "judges.panel: at least one judge is required",
            ));
        }

        if self.max_concurrency == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroConcurrency,
                "judges.max_concurrency: must be at least 1",
            ));
        }

        let on_failure = match self.on_failure.parse::<FailurePolicy>() {
            Ok(policy) => policy,
            Err(_) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownFailurePolicy,
                    format!(
                        "judges.on_failure: unknown value '{}' (expected abort or degrade)",
                        self.on_failure
                    ),
                ));
                defaults.on_failure
            }
        };

        let settings = JudgeSettings {
            panel: if panel.is_empty() { defaults.panel } else { panel },
            max_concurrency: self.max_concurrency.max(1),
            on_failure,
        };
        (settings, issues)
    }
}
