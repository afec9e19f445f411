//! User-visible notices
//!
//! Workflows report transient, non-blocking notices ("Image not selected",
//! "Permission Denied") through [`OutputWriter`]. The console host writes
//! them to stderr; tests and embedding hosts buffer them with
//! [`StatusBarWriter`].

use colored::Colorize;
use std::sync::{Arc, Mutex, PoisonError};

/// Sink for user-visible notices
///
/// # Examples
///
/// ```no_run
/// use mediapick::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("3 items selected");
/// output.warning("Image not selected");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Clear all messages (for buffered writers)
    fn clear(&self);
}

/// Console writer
///
/// Normal messages go to stdout; notices go to stderr so that formatted
/// selection output stays machine-readable. In quiet mode only warnings and
/// errors are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Writer that suppresses normal, success and info messages
    #[must_use]
    pub const fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠️".yellow(), message);
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message.dimmed());
        }
    }

    fn clear(&self) {}
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
}

/// Buffered notice writer
///
/// Clones share the same buffer, so a host can hand one clone to the
/// controller and read notices back through another.
///
/// # Examples
///
/// ```
/// use mediapick::ui::output::{MessageLevel, OutputWriter, StatusBarWriter};
///
/// let writer = StatusBarWriter::new();
/// writer.warning("Image not selected");
///
/// let latest = writer.latest_message().unwrap();
/// assert_eq!(latest, (MessageLevel::Warning, "Image not selected".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct StatusBarWriter {
    messages: Arc<Mutex<Vec<(MessageLevel, String)>>>,
}

impl StatusBarWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the most recent message, if any
    #[must_use]
    pub fn latest_message(&self) -> Option<(MessageLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn add_message(&self, level: MessageLevel, message: String) {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.push((level, message));

        // Keep only last 100 messages
        if messages.len() > 100 {
            messages.drain(0..50);
        }
    }
}

impl Default for StatusBarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StatusBarWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message.to_string());
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message.to_string());
    }

    fn success(&self, message: &str) {
        self.add_message(MessageLevel::Success, message.to_string());
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message.to_string());
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message.to_string());
    }

    fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
