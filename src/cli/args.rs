//! CLI argument definitions using clap
//!
//! Commands:
//! - mangalib init --config <path>
//! - mangalib serve --config <path> [--port <port>]
//! - mangalib list --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mangalib - manga collection API over a JSON data bank
#[derive(Parser, Debug)]
#[command(name = "mangalib")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config (if missing) and an empty data bank
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./mangalib.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./mangalib.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print every record as JSON and exit
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./mangalib.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
