//! Progress reporting for debates and discussions
//!
//! Both reporters are [`EventSink`]s and write to stderr, so stdout only
//! carries the final result.

use arena_application::EventSink;
use arena_domain::{SessionEvent, TranscriptMessage};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Header line announcing a transcript message
fn message_header(message: &TranscriptMessage) -> String {
    match message {
        TranscriptMessage::Debate(m) => format!(
            "[{} - Round {}] {}",
            m.role.title(),
            m.round,
            m.model.display_name()
        ),
        TranscriptMessage::Discussion(m) => {
            format!("#{} {}", m.message_number, m.model.display_name())
        }
    }
}

/// Reports progress with a spinner and live-streamed model output
pub struct ProgressReporter {
    spinner: ProgressBar,
    /// Print fragments as they arrive
    show_chunks: bool,
    /// Index of the message currently being streamed
    streaming: Mutex<Option<usize>>,
}

impl ProgressReporter {
    pub fn new(show_chunks: bool) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self {
            spinner,
            show_chunks,
            streaming: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn on_chunk(&self, text: &str, msg_index: usize) {
        if !self.show_chunks {
            return;
        }
        let Ok(mut streaming) = self.streaming.lock() else {
            return;
        };
        let starts_message = *streaming != Some(msg_index);
        *streaming = Some(msg_index);

        self.spinner.suspend(|| {
            let mut stderr = std::io::stderr().lock();
            if starts_message {
                let _ = writeln!(stderr, "\n{}", "──".dimmed());
            }
            let _ = write!(stderr, "{}", text);
            let _ = stderr.flush();
        });
    }

    fn on_message(&self, message: &TranscriptMessage) {
        let was_streamed = self
            .streaming
            .lock()
            .map(|mut s| s.take().is_some())
            .unwrap_or(false);

        let header = message_header(message);
        if was_streamed {
            // Text is already on screen; close it with the header
            self.spinner
                .println(format!("\n{} {}", "v".green(), header.yellow().bold()));
        } else {
            self.spinner.println(format!(
                "\n{}\n{}",
                header.yellow().bold(),
                message.text()
            ));
        }
    }
}

impl EventSink for ProgressReporter {
    fn emit(&self, event: SessionEvent) {
        match event {
            SessionEvent::Progress { status, .. } => self.spinner.set_message(status),
            SessionEvent::Chunk { text, msg_index } => self.on_chunk(&text, msg_index),
            SessionEvent::Message(message) => self.on_message(&message),
            SessionEvent::Complete(_) => self
                .spinner
                .finish_with_message(format!("{}", "Session complete".green())),
            SessionEvent::Error { message } => self
                .spinner
                .abandon_with_message(format!("{} {}", "x".red(), message)),
        }
    }
}

/// Simple line-based progress (no fancy UI)
///
/// Used when stderr is not a terminal. Fragments are not shown.
pub struct SimpleProgress;

impl SimpleProgress {
    fn line(event: &SessionEvent) -> Option<String> {
        match event {
            SessionEvent::Progress { status, .. } => Some(format!("{} {}", "->".cyan(), status)),
            SessionEvent::Chunk { .. } => None,
            SessionEvent::Message(message) => Some(format!(
                "  {} {}",
                "v".green(),
                message_header(message)
            )),
            SessionEvent::Complete(_) => Some(format!("{} Session complete", "v".green())),
            SessionEvent::Error { message } => Some(format!("{} {}", "x".red(), message)),
        }
    }
}

impl EventSink for SimpleProgress {
    fn emit(&self, event: SessionEvent) {
        if let Some(line) = Self::line(&event) {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::{DebateMessage, DebateRole, DiscussionMessage, Participant};

    #[test]
    fn test_message_headers() {
        let debate = TranscriptMessage::Debate(DebateMessage::new(
            DebateRole::Negative,
            Participant::Gemini,
            "No.",
            2,
        ));
        assert_eq!(message_header(&debate), "[Negative - Round 2] Gemini 2.5");

        let discussion = TranscriptMessage::Discussion(DiscussionMessage::new(
            Participant::OpenAi,
            "Hi.",
            4,
        ));
        assert_eq!(message_header(&discussion), "#4 ChatGPT-5");
    }

    #[test]
    fn test_simple_progress_lines() {
        colored::control::set_override(false);
        assert_eq!(
            SimpleProgress::line(&SessionEvent::progress(
                "Judges deliberating",
                serde_json::json!({})
            )),
            Some("-> Judges deliberating".to_string())
        );
        assert_eq!(SimpleProgress::line(&SessionEvent::chunk("Hel", 0)), None);
        assert_eq!(
            SimpleProgress::line(&SessionEvent::error("boom")),
            Some("x boom".to_string())
        );
    }

    #[test]
    fn test_reporter_tracks_streamed_message() {
        let reporter = ProgressReporter::new(true);
        reporter.emit(SessionEvent::chunk("Hel", 3));
        assert_eq!(*reporter.streaming.lock().unwrap(), Some(3));

        reporter.emit(SessionEvent::message(DiscussionMessage::new(
            Participant::Anthropic,
            "Hello.",
            4,
        )));
        assert_eq!(*reporter.streaming.lock().unwrap(), None);
    }

    #[test]
    fn test_reporter_ignores_chunks_when_hidden() {
        let reporter = ProgressReporter::new(false);
        reporter.emit(SessionEvent::chunk("Hel", 0));
        assert_eq!(*reporter.streaming.lock().unwrap(), None);
    }
}
