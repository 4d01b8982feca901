//! Provider configuration from TOML (`[providers.*]` sections)

use arena_domain::Participant;
use serde::{Deserialize, Serialize};

/// One vendor's settings.
///
/// Every field is optional; unset fields fall back to the vendor's defaults
/// when the adapter is built.
///
/// # Example
///
/// ```toml
/// [providers.gemini]
/// model = "gemini-2.5-flash"
/// temperature = 0.4
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVendorConfig {
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Inline API key (prefer the environment variable)
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileVendorConfig,
    pub anthropic: FileVendorConfig,
    pub gemini: FileVendorConfig,
}

impl FileProvidersConfig {
    pub fn get(&self, participant: Participant) -> &FileVendorConfig {
        match participant {
            Participant::OpenAi => &self.openai,
            Participant::Anthropic => &self.anthropic,
            Participant::Gemini => &self.gemini,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_vendor_section() {
        let toml_str = r#"
[providers.anthropic]
model = "claude-opus-4-1"
max_tokens = 2048
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let anthropic = config.providers.get(Participant::Anthropic);
        assert_eq!(anthropic.model.as_deref(), Some("claude-opus-4-1"));
        assert_eq!(anthropic.max_tokens, Some(2048));
        assert!(anthropic.api_key_env.is_none());
        assert_eq!(config.providers.openai, FileVendorConfig::default());
    }
}
