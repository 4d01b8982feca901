//! Event logging to files

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;
