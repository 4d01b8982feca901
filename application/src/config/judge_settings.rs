//! Judge panel settings

use arena_domain::Participant;
use serde::{Deserialize, Serialize};

/// What the panel does when a judge's request fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// The whole panel fails with the judge's error
    #[default]
    Abort,
    /// The failed judge contributes a tie verdict naming the failure
    Degrade,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Abort => "abort",
            FailurePolicy::Degrade => "degrade",
        }
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "degrade" => Ok(FailurePolicy::Degrade),
            other => Err(format!("unknown failure policy: {}", other)),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who judges and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeSettings {
    /// Judges in output order
    pub panel: Vec<Participant>,
    /// Judges queried at the same time
    pub max_concurrency: usize,
    pub on_failure: FailurePolicy,
}

impl JudgeSettings {
    pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

    pub fn with_panel(mut self, panel: Vec<Participant>) -> Self {
        self.panel = panel;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }
}

impl Default for JudgeSettings {
    fn default() -> Self {
        Self {
            panel: Participant::default_panel(),
            max_concurrency: Self::DEFAULT_MAX_CONCURRENCY,
            on_failure: FailurePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = JudgeSettings::default();
        assert_eq!(settings.panel.len(), 3);
        assert_eq!(settings.max_concurrency, 3);
        assert_eq!(settings.on_failure, FailurePolicy::Abort);
    }

    #[test]
    fn test_failure_policy_parsing() {
        assert_eq!("Degrade".parse::<FailurePolicy>(), Ok(FailurePolicy::Degrade));
        assert!("retry".parse::<FailurePolicy>().is_err());
    }
}
