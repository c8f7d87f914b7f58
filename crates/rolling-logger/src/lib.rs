//! Rolling Logger
//!
//! A `tracing` layer that keeps the most recent records in a bounded in-memory buffer and
//! forwards each one to an optional sink. The buffer is what error reports attach as breadcrumbs.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// One formatted tracing event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// RFC 3339, millisecond precision
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:>5} {}: {}", self.timestamp, self.level, self.target, self.message)
    }
}

/// Shared circular buffer; clones point at the same records
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    inner: Arc<Mutex<VecDeque<LogRecord>>>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogRecord>> {
        // A panic while logging must not disable logging for good
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Oldest record is dropped once full
    pub fn push(&self, record: LogRecord) {
        let mut records = self.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

pub type Sink = Box<dyn Fn(&LogRecord) + Send + Sync>;

pub struct RollingLayer {
    buffer: RollingBuffer,
    max_level: Level,
    sink: Option<Sink>,
}

impl RollingLayer {
    pub fn new(buffer: RollingBuffer) -> Self {
        Self {
            buffer,
            max_level: Level::INFO,
            sink: None,
        }
    }

    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    pub fn with_sink(mut self, sink: impl Fn(&LogRecord) + Send + Sync + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.max_level {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            level: metadata.level().to_string(),
            target: metadata.target().to_string(),
            message: visitor.finish(),
        };

        if let Some(sink) = &self.sink {
            sink(&record);
        }
        self.buffer.push(record);
    }
}

/// Install `registry() + RollingLayer` as the global subscriber and hand back the buffer
pub fn init_with_sink(
    capacity: usize,
    max_level: Level,
    sink: impl Fn(&LogRecord) + Send + Sync + 'static,
) -> Result<RollingBuffer, LoggerError> {
    let buffer = RollingBuffer::new(capacity);
    let layer = RollingLayer::new(buffer.clone())
        .with_max_level(max_level)
        .with_sink(sink);
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::set_global_default(subscriber).map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(buffer)
}

/// Buffer-only logger
pub fn init_logger(capacity: usize) -> Result<RollingBuffer, LoggerError> {
    init_with_sink(capacity, Level::INFO, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> LogRecord {
        LogRecord {
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            level: "INFO".to_string(),
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let buffer = RollingBuffer::new(2);
        buffer.push(record("one"));
        buffer.push(record("two"));
        buffer.push(record("three"));

        let messages: Vec<_> = buffer.snapshot().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(buffer.len(), 2);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let buffer = RollingBuffer::new(0);
        buffer.push(record("a"));
        buffer.push(record("b"));
        assert_eq!(buffer.snapshot(), vec![record("b")]);
    }

    #[test]
    fn test_layer_records_and_filters() {
        let buffer = RollingBuffer::new(10);
        let forwarded = Arc::new(Mutex::new(Vec::new()));
        let sink_copy = forwarded.clone();
        let layer = RollingLayer::new(buffer.clone())
            .with_max_level(Level::INFO)
            .with_sink(move |r| sink_copy.lock().unwrap().push(r.message.clone()));
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::info!(page = 2, "[Clients] Loaded");
            tracing::error!("[API] 500 from /x");
        });

        let records = buffer.snapshot();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "[Clients] Loaded page=2");
        assert_eq!(records[0].level, "INFO");
        assert_eq!(records[1].level, "ERROR");
        assert_eq!(forwarded.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_second_install_fails() {
        // Both installs race other tests for the global slot; at most one can win
        let first = init_logger(10);
        let second = init_logger(10);
        assert!(matches!(second, Err(LoggerError::AlreadyInitialized)));
        let _ = first;
    }
}
