//! Fixed-width rendering of play totals.

use std::io::{self, Write};

use pt_core::PlayTotal;

use crate::Config;

/// Column widths of the ranked table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub name_width: usize,
    pub total_width: usize,
}

impl TableLayout {
    pub const fn from_config(config: &Config) -> Self {
        Self {
            name_width: config.name_width,
            total_width: config.total_width,
        }
    }

    /// Formats one row: name left-aligned, whole seconds right-aligned, then `" s"`.
    ///
    /// Seconds are rounded half away from zero.
    pub fn format_row(&self, total: &PlayTotal) -> String {
        format!(
            "{name:<name_width$}{seconds:>total_width$.0} s",
            name = total.name,
            seconds = total.total_seconds.round(),
            name_width = self.name_width,
            total_width = self.total_width,
        )
    }

    pub fn write_rows<W: Write>(&self, writer: &mut W, totals: &[PlayTotal]) -> io::Result<()> {
        for total in totals {
            writeln!(writer, "{}", self.format_row(total))?;
        }
        Ok(())
    }
}
