//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown participant: {0}")]
    InvalidParticipant(String),

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Invalid round count: {0} (must be at least 1)")]
    InvalidRounds(usize),

    #[error("At least {required} participants are required, got {actual}")]
    NotEnoughParticipants { required: usize, actual: usize },

    #[error("Participant listed twice: {0}")]
    DuplicateParticipant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::InvalidRounds(0).to_string(),
            "Invalid round count: 0 (must be at least 1)"
        );
        assert_eq!(
            DomainError::InvalidParticipant("mistral".to_string()).to_string(),
            "Unknown participant: mistral"
        );
    }
}
