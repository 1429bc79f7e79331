//! Core domain logic for the play-time log analyser.
//!
//! This crate contains:
//! - Interval parsing: one `"<startMillis> <endMillis>"` line at a time
//! - Log reading: lazy per-file interval iterators with early abort
//! - Aggregation: windowed per-file totals, computed in parallel
//! - Ranking and lookup of the resulting totals

mod aggregate;
pub mod diagnostics;
pub mod interval;
mod lookup;
mod rank;
pub mod reader;

pub use aggregate::{
    DEFAULT_EXTENSION, DateWindow, LogFile, PlayTotal, ScanError, aggregate, analyse, scan_logs,
};
pub use diagnostics::Diagnostics;
pub use interval::{Interval, LineOutcome, ParseError, parse_line};
pub use lookup::{LookupError, PlayIndex, lookup_key};
pub use rank::{SortOrder, rank};
pub use reader::{IntervalReader, read_log};
