//! Structured JSONL logging for dispatch events.
//!
//! Each record is one JSON object per line with required fields `ts_ms`,
//! `level` and `event`, plus optional entry-point context. Records go to
//! stderr unless a writer is installed with [`set_writer`]. Nothing is
//! serialized unless [`crate::config::log_enabled`] passes for the level.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config;

/// Severity, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// One log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch.
    pub ts_ms: u64,
    pub level: LogLevel,
    pub event: String,

    /// Exported entry point, e.g. `rrl_get_stats`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Which tier served the call (`runtime`, `static`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Status code returned to the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Record with required fields only, stamped now.
    #[must_use]
    pub fn new(level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            ts_ms: now_ms(),
            level,
            event: event.into(),
            symbol: None,
            source: None,
            code: None,
            message: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

static WRITER: Mutex<Option<Box<dyn Write + Send>>> = parking_lot::const_mutex(None);

/// Route records to `writer` instead of stderr.
pub fn set_writer(writer: Box<dyn Write + Send>) {
    *WRITER.lock() = Some(writer);
}

/// Route records back to stderr, returning the previous writer.
pub fn reset_writer() -> Option<Box<dyn Write + Send>> {
    WRITER.lock().take()
}

/// Write `entry` if its level passes the configured threshold.
///
/// Logging never fails the caller: serialization and I/O errors are dropped.
pub fn emit(entry: &LogEntry) {
    if !config::log_enabled(entry.level) {
        return;
    }
    let Ok(line) = entry.to_jsonl() else {
        return;
    };
    let mut guard = WRITER.lock();
    let _ = match guard.as_mut() {
        Some(w) => writeln!(w, "{line}"),
        None => writeln!(std::io::stderr().lock(), "{line}"),
    };
}

/// Build and emit lazily: `build` only runs when `level` is enabled.
pub fn emit_with(level: LogLevel, build: impl FnOnce() -> LogEntry) {
    if config::log_enabled(level) {
        emit(&build());
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
