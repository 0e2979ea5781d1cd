//! Injectable log sink for components that report recoverable misuse instead of failing.

use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Routine state changes.
    Debug,
    /// Ignored calls and other recoverable misuse.
    Warn,
}

/// Receives diagnostic messages.
pub trait Diagnostics: Send + Sync {
    /// Record one message.
    fn log(&self, level: DiagnosticLevel, message: &str);

    /// Shorthand for [`DiagnosticLevel::Debug`].
    fn debug(&self, message: &str) {
        self.log(DiagnosticLevel::Debug, message);
    }

    /// Shorthand for [`DiagnosticLevel::Warn`].
    fn warn(&self, message: &str) {
        self.log(DiagnosticLevel::Warn, message);
    }
}

/// Forwards messages to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Debug => tracing::debug!(target: "overlayfx", "{message}"),
            DiagnosticLevel::Warn => tracing::warn!(target: "overlayfx", "{message}"),
        }
    }
}

/// Keeps messages in memory for inspection.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<(DiagnosticLevel, String)>>,
}

impl RecordingDiagnostics {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<(DiagnosticLevel, String)> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: DiagnosticLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        let mut entries = match self.entries.lock() {
            Ok(e) => e,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((level, message.to_string()));
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for std::sync::Arc<D> {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        (**self).log(level, message);
    }
}

#[cfg(test)]
#[path = "../tests/unit/diagnostics.rs"]
mod tests;
