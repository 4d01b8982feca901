//! Human-readable text for session failures

use arena_application::{ProviderError, SessionError};

/// Turn a session error into a message for the terminal or an HTTP client
pub fn user_message(error: &SessionError) -> String {
    match error {
        SessionError::Provider {
            participant,
            source,
        } => {
            let name = participant.display_name();
            match source {
                ProviderError::Authentication(_) => format!(
                    "{} rejected the API key. Check the credentials for {}.",
                    name, participant
                ),
                ProviderError::RateLimited(_) => {
                    format!("{} is rate limiting requests. Wait a moment and retry.", name)
                }
                ProviderError::QuotaExceeded(_) => {
                    format!("{} quota is exhausted. Check the account's billing.", name)
                }
                ProviderError::Overloaded(_) => {
                    format!("{} is overloaded right now. Try again later.", name)
                }
                ProviderError::InvalidRequest(detail) => {
                    format!("Request to {} was invalid: {}", name, detail)
                }
                ProviderError::Transport(detail) => {
                    format!("Could not reach {}: {}", name, detail)
                }
                ProviderError::Decode(detail) => {
                    format!("Unexpected response from {}: {}", name, detail)
                }
                ProviderError::Status { code, body } if body.is_empty() => {
                    format!("{} returned HTTP {}", name, code)
                }
                ProviderError::Status { code, body } => {
                    format!("{} returned HTTP {}: {}", name, code, body)
                }
            }
        }
        SessionError::AdapterMissing(participant) => format!(
            "{} is not configured. Set {} or providers.{}.api_key.",
            participant.display_name(),
            env_hint(participant.as_str()),
            participant
        ),
        SessionError::InvalidInput(detail) => detail.clone(),
        SessionError::Cancelled => "Session cancelled".to_string(),
    }
}

fn env_hint(key: &str) -> &'static str {
    match key {
        "openai" => "OPENAI_API_KEY",
        "anthropic" => "ANTHROPIC_API_KEY",
        _ => "GOOGLE_API_KEY",
    }
}
