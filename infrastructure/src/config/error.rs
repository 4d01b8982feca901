//! Configuration errors

use arena_domain::Participant;
use thiserror::Error;

/// Fatal problems found while loading configuration or assembling adapters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing API key for {participant}: set {env} or providers.{participant}.api_key")]
    MissingCredential { participant: Participant, env: String },

    #[error("failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
