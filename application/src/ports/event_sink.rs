//! Event sink port
//!
//! Defines where session events go while a debate or discussion runs.

use arena_domain::SessionEvent;
use tokio::sync::mpsc;

/// Receiver of session events
///
/// Implementations live in the presentation and infrastructure layers
/// (console progress, JSONL log, HTTP/SSE channel). `emit` must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SessionEvent);
}

/// No-op sink for when nobody is listening
pub struct NoEvents;

impl EventSink for NoEvents {
    fn emit(&self, _event: SessionEvent) {}
}

/// Forwards events into an unbounded channel
///
/// Events emitted after the receiver is dropped are discarded.
#[derive(Clone)]
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { sender }
    }

    /// Create a sink together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }
}

/// A sink that delegates to multiple inner sinks, in order.
///
/// Uses borrowed references so both owned and borrowed sinks can be
/// composed without wrapper types.
pub struct FanoutEventSink<'a> {
    delegates: Vec<&'a dyn EventSink>,
}

impl<'a> FanoutEventSink<'a> {
    pub fn new(delegates: Vec<&'a dyn EventSink>) -> Self {
        Self { delegates }
    }
}

impl EventSink for FanoutEventSink<'_> {
    fn emit(&self, event: SessionEvent) {
        if let Some((last, rest)) = self.delegates.split_last() {
            for d in rest {
                d.emit(event.clone());
            }
            last.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_channel_sink_forwards() {
        let (sink, mut rx) = ChannelEventSink::channel();
        sink.emit(SessionEvent::chunk("a", 0));
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::chunk("a", 0));
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (sink, rx) = ChannelEventSink::channel();
        drop(rx);
        sink.emit(SessionEvent::error("nobody listening"));
    }

    #[test]
    fn test_fanout_reaches_every_delegate() {
        let (first, mut rx1) = ChannelEventSink::channel();
        let (second, mut rx2) = ChannelEventSink::channel();
        let fanout = FanoutEventSink::new(vec![&first, &NoEvents, &second]);
        fanout.emit(SessionEvent::progress("Starting", Value::Null));
        assert_eq!(rx1.try_recv().unwrap().kind(), "progress");
        assert_eq!(rx2.try_recv().unwrap().kind(), "progress");
    }
}
