//! Line-oriented diagnostic output.
//!
//! Discovery and device selection report one human-readable line per event.
//! Hosts whose transport cannot carry free text install [`NullSink`].

/// Receives diagnostic lines.
pub trait DiagnosticSink: Send {
    /// Emit one line (without trailing newline).
    fn emit(&mut self, line: &str);
}

/// Discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _line: &str) {}
}

/// Forwards lines to the `log` facade under the `kit::diag` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, line: &str) {
        log::info!(target: "kit::diag", "{}", line);
    }
}

impl DiagnosticSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
