//! Presentation layer for llm-arena
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the HTTP/SSE transport.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::errors::user_message;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use server::{AppState, ServerTimeouts, serve};
