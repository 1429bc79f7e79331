//! Playback intervals and the per-line parser for `.dat` logs.
//!
//! Each non-blank line of a log is `"<startMillis> <endMillis>"`, two
//! floating-point Unix-epoch millisecond values separated by whitespace.

use std::num::ParseFloatError;

use chrono::{DateTime, Local};
use thiserror::Error;

/// Microseconds per millisecond, the precision intervals are stored at.
const MICROS_PER_MILLI: f64 = 1000.0;

/// Reasons a log line cannot be turned into an [`Interval`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The line did not contain exactly two whitespace-separated tokens.
    #[error("line split does not yield 2 parts")]
    TokenCount,

    /// A token was not a floating-point number.
    #[error("invalid timestamp {token:?}: {source}")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseFloatError,
    },

    /// The start timestamp is after the end timestamp.
    #[error("bad time records")]
    Inverted,

    /// The value is `NaN`, infinite, or outside the representable date range.
    #[error("timestamp out of range: {0}")]
    OutOfRange(f64),
}

/// One playback segment. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl Interval {
    /// Builds an interval from two instants, rejecting inverted pairs.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, ParseError> {
        if start > end {
            return Err(ParseError::Inverted);
        }
        Ok(Self { start, end })
    }

    /// Builds an interval from Unix-epoch millisecond values.
    pub fn from_millis(start_ms: f64, end_ms: f64) -> Result<Self, ParseError> {
        if start_ms > end_ms {
            return Err(ParseError::Inverted);
        }
        Self::new(instant_from_millis(start_ms)?, instant_from_millis(end_ms)?)
    }

    pub const fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub const fn end(&self) -> DateTime<Local> {
        self.end
    }

    /// Length of the interval in seconds, fractional part included.
    #[expect(
        clippy::cast_precision_loss,
        reason = "whole seconds fit f64's mantissa for any chrono date"
    )]
    pub fn duration_secs(&self) -> f64 {
        let delta = self.end - self.start;
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
    }
}

/// Converts epoch milliseconds into a local instant.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "the value is rounded and range-checked before the cast"
)]
fn instant_from_millis(ms: f64) -> Result<DateTime<Local>, ParseError> {
    let micros = (ms * MICROS_PER_MILLI).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(ParseError::OutOfRange(ms));
    }
    DateTime::from_timestamp_micros(micros as i64)
        .map(|dt| dt.with_timezone(&Local))
        .ok_or(ParseError::OutOfRange(ms))
}

/// Result of parsing a single log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A valid interval.
    Item(Interval),
    /// A blank line; carry on with the next one.
    Skip,
    /// A malformed line; the rest of the file must be abandoned.
    Fatal(ParseError),
}

/// Parses one line of a play log.
pub fn parse_line(line: &str) -> LineOutcome {
    if line.trim().is_empty() {
        return LineOutcome::Skip;
    }
    match parse_pair(line) {
        Ok(interval) => LineOutcome::Item(interval),
        Err(err) => LineOutcome::Fatal(err),
    }
}

fn parse_pair(line: &str) -> Result<Interval, ParseError> {
    let mut tokens = line.split_whitespace();
    let (Some(first), Some(second), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ParseError::TokenCount);
    };
    Interval::from_millis(parse_millis(first)?, parse_millis(second)?)
}

fn parse_millis(token: &str) -> Result<f64, ParseError> {
    token.parse().map_err(|source| ParseError::InvalidNumber {
        token: token.to_string(),
        source,
    })
}
