//! Logging collaborator for configuration resolution.
//!
//! Resolution failures are reported, never raised. The resolver writes
//! through a [`Logger`] supplied by the caller and wraps every call in
//! [`log_carefully`], so a broken logger cannot break resolution.
//!
//! # Example
//!
//! ```
//! use appsignal_config::logging::{log_carefully, LogLevel, MemoryLogger};
//!
//! let logger = MemoryLogger::new();
//! log_carefully(&logger, LogLevel::Error, "Not loading: config for 'test' not found");
//!
//! assert_eq!(logger.errors(), vec!["Not loading: config for 'test' not found".to_string()]);
//! assert!(logger.infos().is_empty());
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

/// Severity of a resolution log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Info,
}

/// Destination for the log lines emitted while resolving configuration.
///
/// Implementations may fail by returning an error or by panicking. Both are
/// suppressed by [`log_carefully`].
pub trait Logger {
    /// Record an error-level line.
    fn error(&self, message: &str) -> anyhow::Result<()>;

    /// Record an info-level line.
    fn info(&self, message: &str) -> anyhow::Result<()>;
}

/// Attempt to log `message`, ignoring any failure of the logger itself.
///
/// Returns `true` when the logger accepted the line.
pub fn log_carefully(logger: &dyn Logger, level: LogLevel, message: &str) -> bool {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match level {
        LogLevel::Error => logger.error(message),
        LogLevel::Info => logger.info(message),
    }));

    matches!(outcome, Ok(Ok(())))
}

/// Default logger, forwarding to the `tracing` facade.
///
/// Lines only appear if the embedding application installed a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str) -> anyhow::Result<()> {
        tracing::error!(target: "appsignal_config", "{}", message);
        Ok(())
    }

    fn info(&self, message: &str) -> anyhow::Result<()> {
        tracing::info!(target: "appsignal_config", "{}", message);
        Ok(())
    }
}

/// Logger that keeps every line in memory.
///
/// Useful in tests and for callers that want to surface resolution
/// problems themselves.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// All error-level lines, oldest first.
    pub fn errors(&self) -> Vec<String> {
        self.lines_at(LogLevel::Error)
    }

    /// All info-level lines, oldest first.
    pub fn infos(&self) -> Vec<String> {
        self.lines_at(LogLevel::Info)
    }

    /// Total number of lines recorded.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lines_at(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogLevel, String)>> {
        // A panic while holding the lock leaves the data intact.
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, level: LogLevel, message: &str) {
        self.lock().push((level, message.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn error(&self, message: &str) -> anyhow::Result<()> {
        self.record(LogLevel::Error, message);
        Ok(())
    }

    fn info(&self, message: &str) -> anyhow::Result<()> {
        self.record(LogLevel::Info, message);
        Ok(())
    }
}
