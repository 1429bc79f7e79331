//! User-facing diagnostic lines shared by concurrent file tasks.

use std::fmt::Display;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Destination for `"{name} {message}"` diagnostic lines.
///
/// Every line is written while holding a lock, so diagnostics from files
/// processed in parallel never interleave mid-line.
#[derive(Debug)]
pub struct Diagnostics {
    sink: Sink,
}

#[derive(Debug)]
enum Sink {
    Stderr,
    Buffer(Mutex<Vec<String>>),
}

impl Diagnostics {
    /// Diagnostics written to the process's standard error.
    pub const fn stderr() -> Self {
        Self { sink: Sink::Stderr }
    }

    /// Diagnostics kept in memory, for tests and embedding.
    pub fn buffered() -> Self {
        Self {
            sink: Sink::Buffer(Mutex::new(Vec::new())),
        }
    }

    /// Records one diagnostic line for `name`.
    pub fn report(&self, name: &str, message: impl Display) {
        let line = format!("{name} {message}");
        match &self.sink {
            Sink::Stderr => {
                let mut stderr = std::io::stderr().lock();
                if let Err(e) = writeln!(stderr, "{line}") {
                    tracing::debug!(error = %e, "failed to write diagnostic");
                }
            }
            Sink::Buffer(lines) => lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line),
        }
    }

    /// Lines recorded so far. Always empty for the stderr sink.
    pub fn lines(&self) -> Vec<String> {
        match &self.sink {
            Sink::Stderr => Vec::new(),
            Sink::Buffer(lines) => lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}
