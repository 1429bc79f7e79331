//! Compare command: look up all-time totals for names read from stdin.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pt_core::{DateWindow, Diagnostics, PlayIndex};

use super::util::resolve_log_dir;
use crate::Config;
use crate::table::TableLayout;

#[derive(Debug, Default, Args)]
pub struct CompareArgs {
    /// Directory containing the play logs (default: current directory).
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Runs the compare command.
///
/// Totals are computed once over all time, then every input line is answered
/// with a table row on `writer` or an error line on `errors`.
pub fn run<R: BufRead, W: Write, E: Write>(
    reader: R,
    writer: &mut W,
    errors: &mut E,
    args: &CompareArgs,
    config: &Config,
    diagnostics: &Diagnostics,
) -> Result<()> {
    let dir = resolve_log_dir(args.path.as_deref(), config)?;
    let index: PlayIndex =
        pt_core::analyse(&dir, &config.extension, &DateWindow::all_time(), diagnostics)
            .with_context(|| format!("failed to analyse {}", dir.display()))?
            .into_iter()
            .collect();
    if index.is_empty() {
        tracing::warn!(dir = ?dir, "no play time found; every query will miss");
    }
    tracing::debug!(entries = index.len(), "built play index");

    let misses = answer_queries(
        reader,
        writer,
        errors,
        &index,
        &TableLayout::from_config(config),
    )?;
    tracing::debug!(misses, "answered queries");
    Ok(())
}

/// Answers one query per input line until EOF. Returns the number of misses.
///
/// Lines are decoded lossily, so a line that is not UTF-8 becomes an ordinary
/// miss instead of ending the loop.
fn answer_queries<R: BufRead, W: Write, E: Write>(
    mut reader: R,
    writer: &mut W,
    errors: &mut E,
    index: &PlayIndex,
    layout: &TableLayout,
) -> Result<usize> {
    let mut misses = 0;
    let mut buf = Vec::new();
    for idx in 1_usize.. {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("failed to read query {idx}"))?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        match index.lookup(&line) {
            Ok(total) => writeln!(writer, "{}", layout.format_row(&total))?,
            Err(e) => {
                misses += 1;
                writeln!(errors, "{}: {e}", e.kind())?;
            }
        }
    }
    Ok(misses)
}
