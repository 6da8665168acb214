//! Text sinks for the statement log.

use std::sync::Mutex;

/// A sink that accepts formatted log lines.
///
/// The [`Database`](crate::Database) only borrows the sink through a shared
/// pointer; creating, flushing and tearing it down is up to the caller.
pub trait Logger: Send + Sync {
    fn log(&self, line: &str);
}

/// Forwards every line to `tracing` as an INFO event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, line: &str) {
        tracing::info!(target: "pgwrap::database", "{line}");
    }
}

/// Keeps every line in memory, in the order it was logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the lines logged so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_owned());
    }
}
