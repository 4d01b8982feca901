//! Configuration file loading for llm-arena
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `ARENA_*` (nested keys split on `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./arena.toml` or `./.arena.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/llm-arena/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileConfig, FileDebateConfig, FileDiscussionConfig, FileJudgesConfig, FileLoggingConfig,
    FileOutputConfig, FileProvidersConfig, FileServerConfig, FileVendorConfig,
};
pub use loader::ConfigLoader;
