//! Lazy, single-pass reading of play logs.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::interval::{Interval, LineOutcome, parse_line};

/// Buffer size for `BufReader` (64KB; logs are read sequentially once).
const BUFFER_SIZE: usize = 64 * 1024;

/// Iterator over the intervals of one log.
///
/// Blank lines are skipped. The first malformed line is reported through
/// [`Diagnostics`] and ends the iteration; intervals yielded before it stay
/// valid. The underlying reader is owned, so dropping the iterator early
/// releases the file handle.
pub struct IntervalReader<'a, R> {
    name: String,
    lines: Lines<R>,
    diagnostics: &'a Diagnostics,
    line_no: usize,
    done: bool,
}

impl<'a, R: BufRead> IntervalReader<'a, R> {
    pub fn new(reader: R, name: impl Into<String>, diagnostics: &'a Diagnostics) -> Self {
        Self {
            name: name.into(),
            lines: reader.lines(),
            diagnostics,
            line_no: 0,
            done: false,
        }
    }

    fn abort(&mut self, message: impl std::fmt::Display) {
        tracing::debug!(file = %self.name, line = self.line_no, %message, "abandoning log");
        self.diagnostics.report(&self.name, message);
        self.done = true;
    }
}

impl<R: BufRead> Iterator for IntervalReader<'_, R> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        while !self.done {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.abort(e);
                    return None;
                }
            };
            self.line_no += 1;

            match parse_line(&line) {
                LineOutcome::Item(interval) => return Some(interval),
                LineOutcome::Skip => {}
                LineOutcome::Fatal(err) => self.abort(err),
            }
        }
        None
    }
}

impl<R: BufRead> std::iter::FusedIterator for IntervalReader<'_, R> {}

/// Opens `path` and returns a lazy interval iterator labelled `name`.
pub fn read_log<'a>(
    path: &Path,
    name: impl Into<String>,
    diagnostics: &'a Diagnostics,
) -> std::io::Result<IntervalReader<'a, BufReader<File>>> {
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(BUFFER_SIZE, file);
    Ok(IntervalReader::new(reader, name, diagnostics))
}
