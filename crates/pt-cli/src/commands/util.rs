//! Shared utilities for CLI commands.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::Config;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Local datetime layouts accepted besides RFC 3339.
const LOCAL_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Layout of the window bounds printed above the table.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a datetime string as RFC 3339, a local datetime, a local date, or relative time.
///
/// Supports:
/// - RFC 3339: "2026-01-15T10:30:00Z"
/// - Local: "2026-01-15 10:30:00", "2026-01-15T10:30:00"
/// - Local date at midnight: "2026-01-15"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return from_local(naive, s);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).context("invalid midnight")?;
        return from_local(midnight, s);
    }

    // Try relative time: "N hours/minutes/days/weeks ago"
    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use RFC 3339 (e.g., 2026-01-15T10:30:00Z), local (e.g., 2026-01-15 10:30:00) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = Duration::minutes(n * minutes_per_unit);
    Ok(Local::now() - duration)
}

/// Resolves a naive local datetime, picking the earlier instant when ambiguous.
fn from_local(naive: NaiveDateTime, input: &str) -> anyhow::Result<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("{input} does not exist in the local time zone"))
}

/// Picks the directory to scan: `--path`, then the configured `log_dir`,
/// then the current directory.
pub fn resolve_log_dir(path: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(path) = path.or(config.log_dir.as_deref()) {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir().context("failed to determine current directory")
}
