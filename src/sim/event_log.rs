//! Operator-facing event log.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

/// Default number of retained log entries.
pub const DEFAULT_EVENT_LOG_LEN: usize = 50;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    /// Routine information.
    Info,
    /// Degraded operation.
    Warning,
    /// Loss of supply.
    Critical,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventLevel::Info => "INFO",
            EventLevel::Warning => "WARN",
            EventLevel::Critical => "CRIT",
        })
    }
}

/// One log line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    /// Simulated time of the event (ms).
    pub timestamp_ms: u64,
    /// Severity.
    pub level: EventLevel,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for EventLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>7.1}s] {} {}",
            self.timestamp_ms as f64 / 1000.0,
            self.level,
            self.message
        )
    }
}

/// Bounded log, newest entries retained.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
    capacity: usize,
}

impl EventLog {
    /// Creates an empty log holding at most `capacity` entries (min 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Appends an entry, evicting the oldest past the bound.
    pub fn record(&mut self, timestamp_ms: u64, level: EventLevel, message: impl Into<String>) {
        self.entries.push_back(EventLogEntry {
            timestamp_ms,
            level,
            message: message.into(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries oldest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_LOG_LEN)
    }
}
