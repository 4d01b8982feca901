//! Result formatting and user-facing error text

pub mod console;
pub mod errors;
pub mod formatter;
