//! Server-sent events decoding for vendor streaming endpoints
//!
//! Vendors stream responses as `text/event-stream`. [`SseDecoder`] turns raw
//! body chunks (which may split lines, or UTF-8 sequences, anywhere) into
//! complete [`SseFrame`]s; [`spawn_fragment_stream`] pumps a response body
//! through a vendor-specific extractor into a [`FragmentStream`].

use super::error::transport_error;
use arena_application::{FragmentStream, ProviderError, StreamEvent};
use arena_domain::Participant;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Buffered fragments between the HTTP reader and the orchestrator
const FRAGMENT_BUFFER: usize = 64;

/// One dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// `event:` field, if the server sent one
    pub event: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
}

/// Incremental `text/event-stream` decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a body chunk, returning every frame it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if let Some(frame) = self.process_line(line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flush a trailing frame when the body ends without a blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest).into_owned();
            if let Some(frame) = self.process_line(line.trim_end_matches('\r')) {
                return Some(frame);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        if self.data.is_empty() {
            self.event = None;
            return None;
        }
        Some(SseFrame {
            event: self.event.take(),
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}

/// What a vendor extractor found in one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameContent {
    /// A text fragment
    Text(String),
    /// Nothing user-visible (pings, metadata, empty deltas)
    Skip,
    /// The vendor signalled the end of the response
    Done,
}

/// Vendor-specific decoding of one frame
pub type FrameExtractor = fn(&SseFrame) -> Result<FrameContent, ProviderError>;

/// Pump a streaming response body into a [`FragmentStream`].
///
/// Emits a `Delta` per text fragment and a final `Completed` with the full
/// text, or an `Error` carrying the extractor's classification. Stops
/// reading as soon as the receiver is dropped, even while the upstream is
/// silent, which releases the connection.
pub fn spawn_fragment_stream(
    participant: Participant,
    response: reqwest::Response,
    extract: FrameExtractor,
) -> FragmentStream {
    let (tx, rx) = mpsc::channel(FRAGMENT_BUFFER);

    tokio::spawn(async move {
        let mut body = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut full_text = String::new();

        'read: loop {
            let chunk = tokio::select! {
                _ = tx.closed() => {
                    debug!("{} stream receiver dropped", participant);
                    return;
                }
                chunk = body.next() => chunk,
            };
            let chunk = match chunk {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => {
                    let err = transport_error(e);
                    warn!("{} stream failed: {}", participant, err);
                    let _ = tx.send(StreamEvent::Error(err)).await;
                    return;
                }
                None => break,
            };

            for frame in decoder.push(&chunk) {
                match extract(&frame) {
                    Ok(FrameContent::Text(text)) => {
                        full_text.push_str(&text);
                        if tx.send(StreamEvent::Delta(text)).await.is_err() {
                            debug!("{} stream receiver dropped", participant);
                            return;
                        }
                    }
                    Ok(FrameContent::Skip) => {}
                    Ok(FrameContent::Done) => break 'read,
                    Err(err) => {
                        warn!("{} stream error: {}", participant, err);
                        let _ = tx.send(StreamEvent::Error(err)).await;
                        return;
                    }
                }
            }
        }

        if let Some(frame) = decoder.finish()
            && let Ok(FrameContent::Text(text)) = extract(&frame)
        {
            full_text.push_str(&text);
            let _ = tx.send(StreamEvent::Delta(text)).await;
        }

        debug!("{} stream complete ({} chars)", participant, full_text.len());
        let _ = tx.send(StreamEvent::Completed(full_text)).await;
    });

    FragmentStream::new(rx)
}

/// Decode a frame's JSON payload.
pub(crate) fn frame_json(frame: &SseFrame) -> Result<serde_json::Value, ProviderError> {
    serde_json::from_str(&frame.data)
        .map_err(|e| ProviderError::Decode(format!("invalid stream payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: ping\ndata: {\"a\":1}\n\n");
        assert_eq!(
            frames,
            vec![SseFrame {
                event: Some("ping".to_string()),
                data: "{\"a\":1}".to_string()
            }]
        );
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: hel").is_empty());
        assert!(decoder.push(b"lo\r\n").is_empty());
        let frames = decoder.push(b"\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "hello");
        assert_eq!(frames[0].event, None);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let bytes = "data: café\n\n".as_bytes();
        let split = bytes.iter().position(|b| *b == 0xC3).unwrap() + 1;
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(&bytes[..split]).is_empty());
        let frames = decoder.push(&bytes[split..]);
        assert_eq!(frames[0].data, "café");
    }

    #[test]
    fn test_multiline_data_and_comments() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b": keep-alive\ndata: one\ndata: two\n\ndata: three\n\n");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data, "one\ntwo");
        assert_eq!(frames[1].data, "three");
    }

    #[test]
    fn test_event_without_data_is_dropped() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: orphan\n\ndata: x\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, None);
    }

    #[test]
    fn test_finish_flushes_trailing_frame() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: tail").is_empty());
        let frame = decoder.finish().unwrap();
        assert_eq!(frame.data, "tail");
        assert!(decoder.finish().is_none());
    }
}
