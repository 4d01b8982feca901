//! Application-level session events.
//!
//! Each event has a wire kind and a JSON payload:
//!
//! | Kind | Payload |
//! |------|---------|
//! | `progress` | `{status, ...context}` |
//! | `chunk` | `{text, msgIndex}` |
//! | `message` | a debate or discussion message |
//! | `complete` | the session result |
//! | `error` | `{message}` |

use super::result::SessionResult;
use crate::debate::entities::DebateMessage;
use crate::discussion::entities::DiscussionMessage;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// A transcript entry from either kind of session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranscriptMessage {
    Debate(DebateMessage),
    Discussion(DiscussionMessage),
}

impl TranscriptMessage {
    pub fn text(&self) -> &str {
        match self {
            TranscriptMessage::Debate(m) => &m.text,
            TranscriptMessage::Discussion(m) => &m.text,
        }
    }
}

impl From<DebateMessage> for TranscriptMessage {
    fn from(m: DebateMessage) -> Self {
        TranscriptMessage::Debate(m)
    }
}

impl From<DiscussionMessage> for TranscriptMessage {
    fn from(m: DiscussionMessage) -> Self {
        TranscriptMessage::Discussion(m)
    }
}

/// Something observable that happened during a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Narration of the current phase
    Progress {
        status: String,
        context: Map<String, Value>,
    },
    /// A streamed fragment of the message that will sit at `msg_index`
    Chunk { text: String, msg_index: usize },
    /// A message appended to the transcript
    Message(TranscriptMessage),
    /// The session finished
    Complete(Box<SessionResult>),
    /// The session failed
    Error { message: String },
}

impl SessionEvent {
    /// Progress event; `context` fields are merged into the payload when it is an object
    pub fn progress(status: impl Into<String>, context: Value) -> Self {
        let context = match context {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        SessionEvent::Progress {
            status: status.into(),
            context,
        }
    }

    pub fn chunk(text: impl Into<String>, msg_index: usize) -> Self {
        SessionEvent::Chunk {
            text: text.into(),
            msg_index,
        }
    }

    pub fn message(message: impl Into<TranscriptMessage>) -> Self {
        SessionEvent::Message(message.into())
    }

    pub fn complete(result: SessionResult) -> Self {
        SessionEvent::Complete(Box::new(result))
    }

    pub fn error(message: impl Into<String>) -> Self {
        SessionEvent::Error {
            message: message.into(),
        }
    }

    /// Wire kind, used as the SSE event name
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::Progress { .. } => "progress",
            SessionEvent::Chunk { .. } => "chunk",
            SessionEvent::Message(_) => "message",
            SessionEvent::Complete(_) => "complete",
            SessionEvent::Error { .. } => "error",
        }
    }

    /// Whether no further events follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionEvent::Complete(_) | SessionEvent::Error { .. })
    }

    /// JSON payload, used as the SSE data line
    pub fn payload(&self) -> Value {
        match self {
            SessionEvent::Progress { status, context } => {
                let mut map = Map::new();
                map.insert("status".to_string(), Value::String(status.clone()));
                map.extend(context.iter().map(|(k, v)| (k.clone(), v.clone())));
                Value::Object(map)
            }
            SessionEvent::Chunk { text, msg_index } => json!({
                "text": text,
                "msgIndex": msg_index,
            }),
            SessionEvent::Message(message) => {
                serde_json::to_value(message).unwrap_or(Value::Null)
            }
            SessionEvent::Complete(result) => {
                serde_json::to_value(result.as_ref()).unwrap_or(Value::Null)
            }
            SessionEvent::Error { message } => json!({ "message": message }),
        }
    }
}
