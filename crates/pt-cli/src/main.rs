use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use pt_cli::commands::{analyse, compare};
use pt_cli::{Cli, Commands, Config};
use pt_core::Diagnostics;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Initialize tracing with verbose flag support; stdout is reserved for the report
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let diagnostics = Diagnostics::stderr();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Compare(args)) => {
            compare::run(
                io::stdin().lock(),
                &mut stdout,
                &mut io::stderr(),
                args,
                &config,
                &diagnostics,
            )?;
        }
        None => analyse::run(&mut stdout, &cli.analyse, &config, &diagnostics)?,
    }

    Ok(())
}
