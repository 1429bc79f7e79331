//! Ordering of aggregated play totals.

use std::fmt;

use crate::aggregate::PlayTotal;

/// Sort key for ranked output. Both orders are ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ordinal comparison of file stems.
    Name,
    /// Smallest total first.
    #[default]
    Duration,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "duration" => Ok(Self::Duration),
            _ => Err(format!("invalid sort order: {s} (expected name or duration)")),
        }
    }
}

/// Sorts `results` in place by `order` and returns them.
///
/// The sort is stable; durations are compared with [`f64::total_cmp`].
pub fn rank(mut results: Vec<PlayTotal>, order: SortOrder) -> Vec<PlayTotal> {
    match order {
        SortOrder::Name => results.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::Duration => {
            results.sort_by(|a, b| a.total_seconds.total_cmp(&b.total_seconds));
        }
    }
    results
}
