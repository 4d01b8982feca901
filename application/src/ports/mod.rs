//! Port definitions (interfaces for external adapters)

pub mod event_sink;
pub mod model_adapter;
