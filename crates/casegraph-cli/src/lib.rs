//! Casegraph CLI library.
//!
//! Command definitions, configuration, output formatting and the interactive
//! REPL for the `casegraph` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
