//! Infrastructure layer for llm-arena
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the vendor model adapters, configuration file
//! loading, and the JSONL event logger.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::JsonlEventLogger;
pub use providers::{
    AnthropicAdapter, GeminiAdapter, OpenAiAdapter, VendorSettings, build_registry,
    classify_status,
};
