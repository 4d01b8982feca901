//! JSONL file writer for session events.
//!
//! Each [`SessionEvent`] is serialized as a single JSON line carrying its
//! wire payload plus `type` and `timestamp`, appended via a buffered writer.

use arena_application::EventSink;
use arena_domain::SessionEvent;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL event logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    /// Chunk events are high-volume; skipped unless enabled
    include_chunks: bool,
}

impl JsonlEventLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            include_chunks: false,
        })
    }

    /// Whether to also record `chunk` events
    pub fn with_chunks(mut self, include: bool) -> Self {
        self.include_chunks = include;
        self
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &SessionEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let kind = Value::String(event.kind().to_string());

        match event.payload() {
            Value::Object(mut map) => {
                map.insert("type".to_string(), kind);
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => serde_json::json!({
                "type": kind,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

impl EventSink for JsonlEventLogger {
    fn emit(&self, event: SessionEvent) {
        if matches!(event, SessionEvent::Chunk { .. }) && !self.include_chunks {
            return;
        }

        let Ok(line) = serde_json::to_string(&Self::record(&event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush at the end of each session
            if event.is_terminal() {
                let _ = writer.flush();
            }
        }
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
