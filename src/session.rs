//! Diagnostics session.
//!
//! A small, explicitly constructed record of what happened during one
//! process run: counters and a bounded log buffer under a session id. It
//! is created once in `main`, handed to whoever needs it, and dropped on
//! shutdown; the debug export serializes it. Diagnostic only - never a
//! restore format.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Oldest entries are dropped beyond this many.
const MAX_LOG_ENTRIES: usize = 200;

/// One buffered diagnostic entry.
#[derive(Clone, Debug, Serialize)]
pub struct LogEntry {
    /// When it was recorded
    pub at: DateTime<Utc>,
    /// Severity label, e.g. "warn"
    pub level: String,
    /// What happened
    pub message: String,
}

/// Per-run diagnostics state.
#[derive(Debug)]
pub struct DiagnosticsSession {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    counters: BTreeMap<String, u64>,
    entries: Vec<LogEntry>,
}

/// Serialized shape of the debug export.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    /// Session identifier
    pub session_id: Uuid,
    /// When the session started
    pub session_start: DateTime<Utc>,
    /// Named event counters
    pub counters: BTreeMap<String, u64>,
    /// Buffered log entries, oldest first
    pub log_entries: Vec<LogEntry>,
}

impl DiagnosticsSession {
    /// Starts a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            counters: BTreeMap::new(),
            entries: Vec::new(),
        }
    }

    /// Increments a named counter.
    pub fn count(&mut self, name: &str) {
        *self.counters.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Buffers a diagnostic entry, dropping the oldest beyond the cap.
    pub fn note(&mut self, level: &str, message: impl Into<String>) {
        self.entries.push(LogEntry {
            at: Utc::now(),
            level: level.to_string(),
            message: message.into(),
        });
        if self.entries.len() > MAX_LOG_ENTRIES {
            let excess = self.entries.len() - MAX_LOG_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    /// Snapshot for the debug export.
    #[must_use]
    pub fn report(&self) -> DebugReport {
        DebugReport {
            session_id: self.session_id,
            session_start: self.started_at,
            counters: self.counters.clone(),
            log_entries: self.entries.clone(),
        }
    }
}

impl Default for DiagnosticsSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn counters_accumulate_by_name() {
        let mut session = DiagnosticsSession::new();
        session.count("command.status");
        session.count("command.status");
        session.count("command.import");

        let report = session.report();
        assert_eq!(report.counters["command.status"], 2);
        assert_eq!(report.counters["command.import"], 1);
    }

    #[test]
    fn log_buffer_is_bounded() {
        let mut session = DiagnosticsSession::new();
        for i in 0..(MAX_LOG_ENTRIES + 25) {
            session.note("info", format!("entry {i}"));
        }

        let report = session.report();
        assert_eq!(report.log_entries.len(), MAX_LOG_ENTRIES);
        assert_eq!(report.log_entries[0].message, "entry 25");
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let session = DiagnosticsSession::new();
        let raw = serde_json::to_string(&session.report()).unwrap();
        assert!(raw.contains("\"sessionId\""));
        assert!(raw.contains("\"sessionStart\""));
        assert!(raw.contains("\"logEntries\""));
    }
}
