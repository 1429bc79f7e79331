//! Point lookups of precomputed play totals by file stem.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::aggregate::PlayTotal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The query had no usable file stem (e.g. an empty line).
    #[error("no file name in query {query:?}")]
    EmptyQuery { query: String },

    /// No log with that stem had play time in the window.
    #[error("the given key '{name}' was not present")]
    NotFound { name: String },
}

impl LookupError {
    /// Short name of the failure, printed before the message.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuery { .. } => "EmptyQuery",
            Self::NotFound { .. } => "KeyNotFound",
        }
    }
}

/// Strips directories and the extension from a query line.
///
/// `"a"`, `"a.dat"` and `"logs/a.dat"` all map to `"a"`. A dotfile name such
/// as `".dat"` is its own stem, so it never matches a scanned log.
pub fn lookup_key(query: &str) -> Option<&str> {
    Path::new(query.trim())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
}

/// Totals keyed by file stem.
#[derive(Debug, Clone, Default)]
pub struct PlayIndex {
    totals: HashMap<String, f64>,
}

impl PlayIndex {
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Resolves a query line, ignoring any extension it carries.
    pub fn lookup(&self, query: &str) -> Result<PlayTotal, LookupError> {
        let key = lookup_key(query).ok_or_else(|| LookupError::EmptyQuery {
            query: query.to_string(),
        })?;
        self.totals
            .get(key)
            .map(|&total_seconds| PlayTotal {
                name: key.to_string(),
                total_seconds,
            })
            .ok_or_else(|| LookupError::NotFound {
                name: key.to_string(),
            })
    }
}

impl FromIterator<PlayTotal> for PlayIndex {
    fn from_iter<I: IntoIterator<Item = PlayTotal>>(iter: I) -> Self {
        Self {
            totals: iter
                .into_iter()
                .map(|t| (t.name, t.total_seconds))
                .collect(),
        }
    }
}
