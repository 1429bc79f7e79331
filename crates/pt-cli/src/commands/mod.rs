//! CLI subcommand implementations.

pub mod analyse;
pub mod compare;
mod util;
