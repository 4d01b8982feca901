//! Session-level payloads shared by the orchestrators and their observers.
//!
//! - [`event::SessionEvent`]: application-level events emitted during a run
//! - [`result::SessionResult`]: the final outcome, tagged by mode

pub mod event;
pub mod result;

pub use event::{SessionEvent, TranscriptMessage};
pub use result::{SessionMode, SessionResult};
