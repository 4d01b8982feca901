//! Vendor adapters and registry assembly
//!
//! One [`ModelAdapter`](arena_application::ModelAdapter) per vendor, each
//! speaking the vendor's HTTP API through `reqwest`. [`build_registry`] wires
//! them into the [`AdapterRegistry`] handed to the use cases.

pub mod anthropic;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod sse;

pub use anthropic::AnthropicAdapter;
pub use error::classify_status;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;

use crate::config::{ConfigError, FileProvidersConfig, FileVendorConfig};
use arena_application::AdapterRegistry;
use arena_domain::Participant;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Connect timeout shared by every vendor client
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fully resolved settings for one vendor
#[derive(Debug, Clone, PartialEq)]
pub struct VendorSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

/// Per-vendor defaults, overridable field by field from `[providers.*]`
struct VendorDefaults {
    api_key_env: &'static str,
    base_url: &'static str,
    model: &'static str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

const DEFAULT_TIMEOUT_SECS: u64 = 120;

fn defaults_for(participant: Participant) -> VendorDefaults {
    match participant {
        Participant::OpenAi => VendorDefaults {
            api_key_env: "OPENAI_API_KEY",
            base_url: "https://api.openai.com",
            model: OpenAiAdapter::DEFAULT_MODEL,
            temperature: None,
            max_tokens: None,
        },
        Participant::Anthropic => VendorDefaults {
            api_key_env: "ANTHROPIC_API_KEY",
            base_url: "https://api.anthropic.com",
            model: AnthropicAdapter::DEFAULT_MODEL,
            temperature: None,
            max_tokens: Some(1024),
        },
        Participant::Gemini => VendorDefaults {
            api_key_env: "GOOGLE_API_KEY",
            base_url: "https://generativelanguage.googleapis.com",
            model: GeminiAdapter::DEFAULT_MODEL,
            temperature: Some(0.7),
            max_tokens: Some(4096),
        },
    }
}

impl VendorSettings {
    /// Resolve a vendor's settings, reading the API key from `lookup_env`.
    ///
    /// An inline `api_key` wins over the environment variable.
    pub fn resolve(
        participant: Participant,
        file: &FileVendorConfig,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = defaults_for(participant);
        let key_env = file
            .api_key_env
            .clone()
            .unwrap_or_else(|| defaults.api_key_env.to_string());

        let api_key = file
            .api_key
            .clone()
            .or_else(|| lookup_env(&key_env))
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                participant,
                env: key_env.clone(),
            })?;

        Ok(Self {
            api_key,
            base_url: file
                .base_url
                .clone()
                .unwrap_or_else(|| defaults.base_url.to_string()),
            model: file
                .model
                .clone()
                .unwrap_or_else(|| defaults.model.to_string()),
            temperature: file.temperature.or(defaults.temperature),
            max_tokens: file.max_tokens.or(defaults.max_tokens),
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// `base_url` joined with `path`
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// HTTP client shared by one adapter's requests
pub(crate) fn http_client(settings: &VendorSettings) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(settings.timeout)
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Build the adapter for one participant.
pub fn build_adapter(
    participant: Participant,
    settings: VendorSettings,
) -> Result<Arc<dyn arena_application::ModelAdapter>, ConfigError> {
    Ok(match participant {
        Participant::OpenAi => Arc::new(OpenAiAdapter::new(settings)?),
        Participant::Anthropic => Arc::new(AnthropicAdapter::new(settings)?),
        Participant::Gemini => Arc::new(GeminiAdapter::new(settings)?),
    })
}

/// Assemble the adapter registry from configuration.
///
/// Every participant whose credentials resolve is registered. A participant
/// listed in `required` without credentials is a fatal configuration error;
/// any other one is skipped with a warning.
pub fn build_registry(
    providers: &FileProvidersConfig,
    required: &[Participant],
) -> Result<AdapterRegistry, ConfigError> {
    build_registry_with_env(providers, required, |name| std::env::var(name).ok())
}

/// [`build_registry`] with an explicit environment lookup
pub fn build_registry_with_env(
    providers: &FileProvidersConfig,
    required: &[Participant],
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Result<AdapterRegistry, ConfigError> {
    let mut registry = AdapterRegistry::new();

    for participant in Participant::ALL {
        match VendorSettings::resolve(participant, providers.get(participant), &lookup_env) {
            Ok(settings) => {
                info!(
                    participant = %participant,
                    model = %settings.model,
                    "Vendor adapter initialized"
                );
                registry.register(build_adapter(participant, settings)?);
            }
            Err(e) if required.contains(&participant) => return Err(e),
            Err(e) => warn!("{} adapter not available: {}", participant, e),
        }
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_resolve_uses_vendor_defaults() {
        let settings = VendorSettings::resolve(
            Participant::Gemini,
            &FileVendorConfig::default(),
            env(&[("GOOGLE_API_KEY", "g-key")]),
        )
        .unwrap();
        assert_eq!(settings.api_key, "g-key");
        assert_eq!(settings.model, "gemini-2.5-pro");
        assert_eq!(settings.temperature, Some(0.7));
        assert_eq!(settings.max_tokens, Some(4096));
        assert_eq!(settings.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_resolve_overrides() {
        let file = FileVendorConfig {
            api_key_env: Some("MY_CLAUDE_KEY".to_string()),
            model: Some("claude-opus-4-1".to_string()),
            max_tokens: Some(2048),
            base_url: Some("http://localhost:9999/".to_string()),
            ..Default::default()
        };
        let settings =
            VendorSettings::resolve(Participant::Anthropic, &file, env(&[("MY_CLAUDE_KEY", "k")]))
                .unwrap();
        assert_eq!(settings.model, "claude-opus-4-1");
        assert_eq!(settings.max_tokens, Some(2048));
        assert_eq!(settings.endpoint("/v1/messages"), "http://localhost:9999/v1/messages");
    }

    #[test]
    fn test_inline_key_wins() {
        let file = FileVendorConfig {
            api_key: Some("inline".to_string()),
            ..Default::default()
        };
        let settings =
            VendorSettings::resolve(Participant::OpenAi, &file, env(&[("OPENAI_API_KEY", "env")]))
                .unwrap();
        assert_eq!(settings.api_key, "inline");
    }

    #[test]
    fn test_missing_key_names_env_var() {
        let err = VendorSettings::resolve(
            Participant::OpenAi,
            &FileVendorConfig::default(),
            env(&[("OPENAI_API_KEY", "  ")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential { participant: Participant::OpenAi, ref env }
                if env == "OPENAI_API_KEY"
        ));
    }

    #[test]
    fn test_registry_skips_optional_participants() {
        let registry = build_registry_with_env(
            &FileProvidersConfig::default(),
            &[Participant::OpenAi],
            env(&[("OPENAI_API_KEY", "o"), ("ANTHROPIC_API_KEY", "a")]),
        )
        .unwrap();
        assert!(registry.contains(Participant::OpenAi));
        assert!(registry.contains(Participant::Anthropic));
        assert!(!registry.contains(Participant::Gemini));
    }

    #[test]
    fn test_registry_fails_on_missing_required() {
        let err = build_registry_with_env(
            &FileProvidersConfig::default(),
            &Participant::ALL,
            env(&[("OPENAI_API_KEY", "o"), ("ANTHROPIC_API_KEY", "a")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential {
                participant: Participant::Gemini,
                ..
            }
        ));
    }
}
