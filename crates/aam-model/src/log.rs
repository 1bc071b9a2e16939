//! User-visible session log.
//!
//! Every entry is also mirrored to `tracing` at the matching level so the
//! same events show up in the process log.

use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogClass {
    Info,
    Success,
    Warning,
    Error,
}

impl LogClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogClass::Info => "info",
            LogClass::Success => "success",
            LogClass::Warning => "warning",
            LogClass::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub message: String,
    pub class: LogClass,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, class: LogClass) -> &LogEntry {
        let message = message.into();
        match class {
            LogClass::Error => tracing::error!(class = class.as_str(), "{message}"),
            LogClass::Warning => tracing::warn!(class = class.as_str(), "{message}"),
            LogClass::Info | LogClass::Success => {
                tracing::info!(class = class.as_str(), "{message}")
            }
        }
        let entry = LogEntry {
            id: self.next_id,
            message,
            class,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        };
        self.next_id += 1;
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, LogClass::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, LogClass::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, LogClass::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, LogClass::Error);
    }

    /// Drop all entries. Ids keep increasing so they stay unique.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.class == LogClass::Error)
    }
}
