//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned when `--path` is not given. Falls back to the
    /// current directory when unset.
    pub log_dir: Option<PathBuf>,

    /// Extension of play log files, without the dot.
    pub extension: String,

    /// Width the log name column is padded to.
    pub name_width: usize,

    /// Width the total seconds column is right-aligned to.
    pub total_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: None,
            extension: pt_core::DEFAULT_EXTENSION.to_string(),
            name_width: 110,
            total_width: 6,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PT_*)
        figment = figment.merge(Env::prefixed("PT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for pt.
///
/// On Linux: `~/.config/pt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pt"))
}
