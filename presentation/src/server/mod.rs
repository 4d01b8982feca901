//! HTTP and SSE transport

pub mod http;

pub use http::{AppState, ServerTimeouts, router, serve};
