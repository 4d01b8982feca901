//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the cancellable model invocation
//! used by both orchestrators.

use crate::error::SessionError;
use crate::ports::event_sink::EventSink;
use crate::ports::model_adapter::{ModelAdapter, StreamEvent};
use arena_domain::SessionEvent;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Check if cancellation has been requested.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<(), SessionError> {
    if token.is_cancelled() {
        return Err(SessionError::Cancelled);
    }
    Ok(())
}

/// Send a prompt to one model, racing every await against cancellation.
///
/// With `stream_as = Some(index)` the response is requested as a fragment
/// stream and every fragment is emitted as a `chunk` event for the message
/// that will sit at `index`. With `None` the full text is awaited and
/// nothing is emitted.
pub(crate) async fn invoke_model(
    adapter: &dyn ModelAdapter,
    prompt: &str,
    stream_as: Option<usize>,
    sink: &dyn EventSink,
    token: &CancellationToken,
) -> Result<String, SessionError> {
    check_cancelled(token)?;
    let participant = adapter.participant();

    let Some(msg_index) = stream_as else {
        return tokio::select! {
            biased;
            _ = token.cancelled() => Err(SessionError::Cancelled),
            result = adapter.invoke(prompt, None) => {
                result.map_err(|e| SessionError::provider(participant, e))
            }
        };
    };

    let mut stream = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(SessionError::Cancelled),
        result = adapter.invoke_streaming(prompt, None) => {
            result.map_err(|e| SessionError::provider(participant, e))?
        }
    };

    let mut full_text = String::new();
    loop {
        let event = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(SessionError::Cancelled),
            event = stream.next() => event,
        };

        match event {
            Some(StreamEvent::Delta(chunk)) => {
                if !chunk.is_empty() {
                    sink.emit(SessionEvent::chunk(chunk.as_str(), msg_index));
                    full_text.push_str(&chunk);
                }
            }
            Some(StreamEvent::Completed(text)) => {
                if full_text.is_empty() && !text.is_empty() {
                    sink.emit(SessionEvent::chunk(text.as_str(), msg_index));
                    full_text = text;
                }
                break;
            }
            Some(StreamEvent::Error(e)) => return Err(SessionError::provider(participant, e)),
            None => break, // channel closed
        }
    }

    debug!(
        "{} streamed {} chars for message {}",
        participant,
        full_text.len(),
        msg_index
    );
    Ok(full_text)
}
