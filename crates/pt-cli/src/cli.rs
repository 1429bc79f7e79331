//! Command-line argument definitions.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use crate::commands::analyse::AnalyseArgs;
use crate::commands::compare::CompareArgs;

/// Play-time log analyser.
///
/// Sums the playback intervals recorded in a directory of `.dat` logs and
/// ranks the logs by total time played. Without a subcommand, analyses the
/// directory and prints the ranked table.
#[derive(Debug, Parser)]
#[command(name = "pt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub analyse: AnalyseArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parses the process arguments, exiting with a usage error when analyse
    /// options are combined with a subcommand.
    pub fn parse_args() -> Self {
        let cli = Self::parse();
        if let Err(e) = cli.check_subcommand_args() {
            e.exit();
        }
        cli
    }

    /// Analyse options belong to the default command only. Global options
    /// (`--verbose`, `--config`) may appear on either side of a subcommand.
    pub fn check_subcommand_args(&self) -> Result<(), clap::Error> {
        match &self.command {
            Some(_) if self.analyse.is_set() => Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "--start, --end, --order, --json and a leading --path cannot be combined with a subcommand",
            )),
            _ => Ok(()),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up all-time totals for log names read from stdin, one per line.
    Compare(CompareArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    use pt_core::SortOrder;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_analyse_with_defaults() {
        let cli = Cli::try_parse_from(["pt"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.analyse.order, SortOrder::Duration);
        assert!(cli.analyse.path.is_none());
        assert!(cli.analyse.start.is_none());
        assert!(cli.analyse.end.is_none());
    }

    #[test]
    fn analyse_options_parse() {
        let cli = Cli::try_parse_from([
            "pt", "--path", "/logs", "-s", "2025-01-01", "-e", "2025-02-01", "--order", "Name",
        ])
        .unwrap();
        assert_eq!(cli.analyse.path, Some(PathBuf::from("/logs")));
        assert_eq!(cli.analyse.start.as_deref(), Some("2025-01-01"));
        assert_eq!(cli.analyse.end.as_deref(), Some("2025-02-01"));
        assert_eq!(cli.analyse.order, SortOrder::Name);
    }

    #[test]
    fn compare_takes_a_path() {
        let cli = Cli::try_parse_from(["pt", "compare", "--path", "/logs"]).unwrap();
        let Some(Commands::Compare(args)) = cli.command else {
            panic!("expected compare subcommand");
        };
        assert_eq!(args.path, Some(PathBuf::from("/logs")));
    }

    #[test]
    fn global_args_may_precede_compare() {
        let cli = Cli::try_parse_from(["pt", "-c", "x.toml", "compare"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Commands::Compare(_))));
        cli.check_subcommand_args().unwrap();

        let cli = Cli::try_parse_from(["pt", "-v", "compare"]).unwrap();
        assert!(cli.verbose);
        cli.check_subcommand_args().unwrap();
    }

    #[test]
    fn global_args_may_follow_compare() {
        let cli = Cli::try_parse_from(["pt", "compare", "-v", "--config", "x.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn analyse_args_before_compare_are_rejected() {
        let cli = Cli::try_parse_from(["pt", "--order", "name", "compare"]).unwrap();
        let err = cli.check_subcommand_args().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["pt", "--path", "/logs", "compare"]).unwrap();
        assert!(cli.check_subcommand_args().is_err());
    }

    #[test]
    fn analyse_args_without_subcommand_pass_the_check() {
        let cli = Cli::try_parse_from(["pt", "--order", "name", "--json"]).unwrap();
        cli.check_subcommand_args().unwrap();
    }

    #[test]
    fn invalid_order_is_rejected() {
        assert!(Cli::try_parse_from(["pt", "--order", "size"]).is_err());
    }
}
