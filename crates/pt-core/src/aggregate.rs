//! Per-file aggregation of play time and the parallel analyse pipeline.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::interval::Interval;
use crate::reader::read_log;

/// Default extension of play log files.
pub const DEFAULT_EXTENSION: &str = "dat";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read log directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Date range used to filter intervals.
///
/// The lower bound is compared with an interval's start and the upper bound
/// with its end. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl DateWindow {
    pub const fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end }
    }

    /// From the Unix epoch up to now, in local time.
    pub fn all_time() -> Self {
        Self {
            start: DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local),
            end: Local::now(),
        }
    }

    pub fn contains(&self, interval: &Interval) -> bool {
        interval.start() >= self.start && interval.end() <= self.end
    }
}

/// Total play time of one log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayTotal {
    pub name: String,
    pub total_seconds: f64,
}

/// Sums the seconds of every interval inside `window`.
///
/// Returns `None` when the sum is not positive, which includes the case where
/// no interval falls inside the window.
pub fn aggregate<I>(name: &str, intervals: I, window: &DateWindow) -> Option<PlayTotal>
where
    I: IntoIterator<Item = Interval>,
{
    let total_seconds: f64 = intervals
        .into_iter()
        .filter(|interval| window.contains(interval))
        .map(|interval| interval.duration_secs())
        .sum();

    (total_seconds > 0.0).then(|| PlayTotal {
        name: name.to_string(),
        total_seconds,
    })
}

/// A log discovered on disk, named by its file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub name: String,
    pub path: PathBuf,
}

/// Lists the logs directly inside `dir` whose extension is `extension`.
///
/// Subdirectories are not descended into. The result is sorted by path.
pub fn scan_logs(dir: &Path, extension: &str) -> Result<Vec<LogFile>, ScanError> {
    let read_dir_err = |source: std::io::Error| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut logs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if !path.is_file() || !path.extension().is_some_and(|e| e == extension) {
            continue;
        }

        let Some(name) = path.file_stem().and_then(|n| n.to_str()) else {
            tracing::warn!(path = ?path, "skipping log with non UTF-8 name");
            continue;
        };
        if name.is_empty() {
            tracing::warn!(path = ?path, "skipping log with empty name");
            continue;
        }

        logs.push(LogFile {
            name: name.to_string(),
            path,
        });
    }

    logs.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(logs)
}

/// Scans `dir` and aggregates every log in parallel.
///
/// Files that cannot be opened, or that contain a malformed line, are
/// reported through `diagnostics` and never abort the run. Only a failure to
/// list the directory is returned as an error.
pub fn analyse(
    dir: &Path,
    extension: &str,
    window: &DateWindow,
    diagnostics: &Diagnostics,
) -> Result<Vec<PlayTotal>, ScanError> {
    let logs = scan_logs(dir, extension)?;
    tracing::debug!(dir = ?dir, log_count = logs.len(), "scanned log directory");

    let totals: Vec<PlayTotal> = logs
        .par_iter()
        .filter_map(|log| match read_log(&log.path, log.name.as_str(), diagnostics) {
            Ok(intervals) => aggregate(&log.name, intervals, window),
            Err(e) => {
                tracing::warn!(path = ?log.path, error = %e, "skipping unreadable log");
                diagnostics.report(&log.name, e);
                None
            }
        })
        .collect();

    Ok(totals)
}
