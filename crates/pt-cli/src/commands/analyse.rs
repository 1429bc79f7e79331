//! Analyse command: rank every log in a directory by play time.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Args;

use pt_core::{DateWindow, Diagnostics, PlayTotal, SortOrder};

use super::util::{DISPLAY_FORMAT, parse_datetime, resolve_log_dir};
use crate::Config;
use crate::table::TableLayout;

#[derive(Debug, Default, Args)]
pub struct AnalyseArgs {
    /// Directory containing the play logs (default: current directory).
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Only count intervals starting at or after this time (default: Unix epoch).
    #[arg(short, long)]
    pub start: Option<String>,

    /// Only count intervals ending at or before this time (default: now).
    #[arg(short, long)]
    pub end: Option<String>,

    /// Sort key, ascending: name or duration.
    #[arg(long, default_value_t = SortOrder::Duration)]
    pub order: SortOrder,

    /// Output the ranked totals as JSON.
    #[arg(long)]
    pub json: bool,
}

impl AnalyseArgs {
    /// Whether any analyse option differs from its default.
    pub fn is_set(&self) -> bool {
        self.path.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.order != SortOrder::default()
            || self.json
    }
}

/// Runs the analyse command, writing the window header and ranked table.
pub fn run<W: Write>(
    writer: &mut W,
    args: &AnalyseArgs,
    config: &Config,
    diagnostics: &Diagnostics,
) -> Result<()> {
    let dir = resolve_log_dir(args.path.as_deref(), config)?;
    let window = resolve_window(args.start.as_deref(), args.end.as_deref())?;
    if window.start > window.end {
        tracing::warn!(start = %window.start, end = %window.end, "window start is after its end");
    }

    let totals = pt_core::analyse(&dir, &config.extension, &window, diagnostics)
        .with_context(|| format!("failed to analyse {}", dir.display()))?;
    let ranked = pt_core::rank(totals, args.order);
    tracing::debug!(count = ranked.len(), order = %args.order, "ranked play totals");

    if args.json {
        write_json(writer, &ranked)
    } else {
        writeln!(
            writer,
            "{} - {}",
            window.start.format(DISPLAY_FORMAT),
            window.end.format(DISPLAY_FORMAT)
        )?;
        TableLayout::from_config(config).write_rows(writer, &ranked)?;
        Ok(())
    }
}

/// Builds the filter window, defaulting to the Unix epoch and now.
fn resolve_window(start: Option<&str>, end: Option<&str>) -> Result<DateWindow> {
    let all_time = DateWindow::all_time();
    let start = parse_bound(start, "start")?.unwrap_or(all_time.start);
    let end = parse_bound(end, "end")?.unwrap_or(all_time.end);
    Ok(DateWindow::new(start, end))
}

fn parse_bound(s: Option<&str>, name: &str) -> Result<Option<DateTime<Local>>> {
    s.map(|s| parse_datetime(s).with_context(|| format!("invalid --{name} value")))
        .transpose()
}

fn write_json<W: Write>(writer: &mut W, ranked: &[PlayTotal]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, ranked).context("failed to serialize totals")?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use insta::assert_snapshot;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.dat"), "0 5000\n").unwrap();
        std::fs::write(temp.path().join("b.dat"), "0 1000\n").unwrap();
        std::fs::write(temp.path().join("c.dat"), "2000 4000\n\n6000 7400\n").unwrap();
        temp
    }

    fn narrow_config() -> Config {
        Config {
            name_width: 6,
            total_width: 4,
            ..Config::default()
        }
    }

    fn args(path: &Path) -> AnalyseArgs {
        AnalyseArgs {
            path: Some(path.to_path_buf()),
            ..AnalyseArgs::default()
        }
    }

    /// Runs the command and returns (header, table) with the window header split off.
    fn run_to_string(args: &AnalyseArgs, config: &Config) -> (String, String) {
        let diagnostics = Diagnostics::buffered();
        let mut output = Vec::new();
        run(&mut output, args, config, &diagnostics).unwrap();

        let output = String::from_utf8(output).unwrap();
        let (header, table) = output.split_once('\n').unwrap();
        (header.to_string(), table.to_string())
    }

    #[test]
    fn ranks_by_duration_smallest_first() {
        let temp = fixture();
        let (header, table) = run_to_string(&args(temp.path()), &narrow_config());

        assert!(header.starts_with("1970-01-01") || header.starts_with("1969-12-31"));
        assert!(header.contains(" - "));
        assert_snapshot!(table, @r"
        b        1 s
        c        3 s
        a        5 s
        ");
    }

    #[test]
    fn ranks_by_name() {
        let temp = fixture();
        let args = AnalyseArgs {
            order: SortOrder::Name,
            ..args(temp.path())
        };
        let (_, table) = run_to_string(&args, &narrow_config());

        assert_snapshot!(table, @r"
        a        5 s
        b        1 s
        c        3 s
        ");
    }

    #[test]
    fn end_bound_applies_to_interval_end() {
        let temp = fixture();
        let args = AnalyseArgs {
            end: Some("1970-01-01T00:00:04Z".to_string()),
            ..args(temp.path())
        };
        let (_, table) = run_to_string(&args, &narrow_config());

        // a ends at 5s and c's second interval ends at 7.4s.
        assert_snapshot!(table, @r"
        b        1 s
        c        2 s
        ");
    }

    #[test]
    fn start_bound_applies_to_interval_start() {
        let temp = fixture();
        let args = AnalyseArgs {
            start: Some("1970-01-01T00:00:01Z".to_string()),
            ..args(temp.path())
        };
        let (_, table) = run_to_string(&args, &narrow_config());

        assert_snapshot!(table, @"c        3 s");
    }

    #[test]
    fn json_output_has_no_header() {
        let temp = fixture();
        let args = AnalyseArgs {
            json: true,
            ..args(temp.path())
        };
        let diagnostics = Diagnostics::buffered();
        let mut output = Vec::new();
        run(&mut output, &args, &Config::default(), &diagnostics).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let names: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(value[0]["total_seconds"], 1.0);
    }

    #[test]
    fn malformed_file_is_reported_but_run_continues() {
        let temp = fixture();
        std::fs::write(temp.path().join("d.dat"), "0 9000\n9000 0\n").unwrap();

        let diagnostics = Diagnostics::buffered();
        let mut output = Vec::new();
        run(
            &mut output,
            &args(temp.path()),
            &narrow_config(),
            &diagnostics,
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("d        9 s"));
        assert_eq!(diagnostics.lines(), vec!["d bad time records"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let diagnostics = Diagnostics::buffered();
        let err = run(
            &mut Vec::new(),
            &args(&temp.path().join("missing")),
            &Config::default(),
            &diagnostics,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read log directory"));
    }

    #[test]
    fn invalid_bound_is_an_error() {
        let temp = fixture();
        let args = AnalyseArgs {
            start: Some("not a date".to_string()),
            ..args(temp.path())
        };
        let diagnostics = Diagnostics::buffered();
        let err = run(&mut Vec::new(), &args, &Config::default(), &diagnostics).unwrap_err();
        assert!(err.to_string().contains("invalid --start value"));
    }
}
