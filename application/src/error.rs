//! Session-level errors

use crate::ports::model_adapter::ProviderError;
use arena_domain::{DomainError, Participant};
use thiserror::Error;

/// Errors that end a debate or discussion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{participant} request failed: {source}")]
    Provider {
        participant: Participant,
        #[source]
        source: ProviderError,
    },

    #[error("No model adapter registered for {0}")]
    AdapterMissing(Participant),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session cancelled")]
    Cancelled,
}

impl SessionError {
    pub fn provider(participant: Participant, source: ProviderError) -> Self {
        SessionError::Provider {
            participant,
            source,
        }
    }

    /// Cancellation is not a failure and is reported separately.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionError::Cancelled)
    }
}

impl From<DomainError> for SessionError {
    fn from(e: DomainError) -> Self {
        SessionError::InvalidInput(e.to_string())
    }
}
