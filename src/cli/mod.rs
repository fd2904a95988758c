//! CLI module for mangalib
//!
//! Provides command-line interface for:
//! - init: Write a default config and an empty data bank
//! - serve: Open the data bank and serve the HTTP API
//! - list: Print every record and exit

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, list, run, run_command, serve, Config, DATA_BANK_ENV};
pub use errors::{CliError, CliErrorCode, CliResult};
