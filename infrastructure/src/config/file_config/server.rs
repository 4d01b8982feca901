//! HTTP server and logging configuration (`[server]`, `[logging]`)

use arena_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw HTTP server configuration
///
/// # Example
///
/// ```toml
/// [server]
/// addr = "127.0.0.1:5050"
/// session_timeout_secs = 900
/// chunk_timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub addr: String,
    /// Upper bound for a whole session
    pub session_timeout_secs: u64,
    /// Longest silence tolerated between two events of a streamed session
    pub chunk_timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5050".to_string(),
            session_timeout_secs: 900,
            chunk_timeout_secs: 120,
        }
    }
}

impl FileServerConfig {
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    pub fn chunk_timeout(&self) -> Duration {
        Duration::from_secs(self.chunk_timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("server.session_timeout_secs", self.session_timeout_secs),
            ("server.chunk_timeout_secs", self.chunk_timeout_secs),
        ]
        .into_iter()
        .filter(|(_, secs)| *secs == 0)
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                format!("{}: must be at least 1 second", field),
            )
        })
        .collect()
    }
}

/// Raw logging configuration
///
/// # Example
///
/// ```toml
/// [logging]
/// dir = "/var/log/llm-arena"
/// chunks = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily rolling log files; console only when unset
    pub dir: Option<PathBuf>,
    /// Record streamed `chunk` events in the JSONL event log
    pub chunks: bool,
}
