//! Play-time log analyser CLI library.
//!
//! This crate provides the CLI interface for the analyser.

mod cli;
pub mod commands;
mod config;
mod table;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use table::TableLayout;
