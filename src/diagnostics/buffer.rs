use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// One captured log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
    /// Time since the buffer was created
    pub elapsed: Duration,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>9.3}s {:<5} {}: {}",
            self.elapsed.as_secs_f64(),
            self.level.as_str(),
            self.target,
            self.message
        )
    }
}

#[derive(Debug)]
struct Ring {
    capacity: usize,
    records: VecDeque<LogRecord>,
}

/// Bounded ring of recent log records
///
/// Installed as a `tracing_subscriber` layer. Keeps records at WARN and
/// above from every target, and records at any level from the verbose
/// targets (and their submodules). Once full, the oldest record is dropped.
///
/// Clones share the same ring.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    ring: Arc<Mutex<Ring>>,
    verbose_targets: Arc<[String]>,
    started: Instant,
}

impl LogBuffer {
    #[must_use]
    pub fn new(capacity: usize, verbose_targets: Vec<String>) -> Self {
        Self {
            ring: Arc::new(Mutex::new(Ring {
                capacity,
                records: VecDeque::with_capacity(capacity),
            })),
            verbose_targets: verbose_targets.into(),
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a record with this level and target is kept
    #[must_use]
    pub fn accepts(&self, level: Level, target: &str) -> bool {
        level <= Level::WARN
            || self.verbose_targets.iter().any(|t| {
                target == t
                    || target
                        .strip_prefix(t.as_str())
                        .is_some_and(|rest| rest.starts_with("::"))
            })
    }

    /// Captured records, oldest first
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().records.iter().cloned().collect()
    }

    /// Captured records as text, one per line
    #[must_use]
    pub fn snapshot(&self) -> String {
        let ring = self.lock();
        let mut out = String::new();
        for record in &ring.records {
            let _ = writeln!(out, "{record}");
        }
        out
    }

    pub fn clear(&self) {
        self.lock().records.clear();
    }

    pub fn push(&self, record: LogRecord) {
        let mut ring = self.lock();
        if ring.capacity == 0 {
            return;
        }
        while ring.records.len() >= ring.capacity {
            ring.records.pop_front();
        }
        ring.records.push_back(record);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Subscriber> Layer<S> for LogBuffer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.accepts(*metadata.level(), metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.push(LogRecord {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.finish(),
            elapsed: self.started.elapsed(),
        });
    }
}

/// Collects the `message` field plus `key=value` pairs for the rest
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
