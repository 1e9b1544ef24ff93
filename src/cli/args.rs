//! CLI argument definitions using clap
//!
//! Commands:
//! - jsondb create <name> [--path <dir>] [--array] [--schema <file>]
//! - jsondb open <file> [--schema <file>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jsondb - a schema-checked JSON record store
#[derive(Parser, Debug)]
#[command(name = "jsondb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file [default: ./.jsondbrc]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start a session on a new, empty store
    Create {
        /// Store name, also the data file stem
        name: String,

        /// Directory the store exports into
        #[arg(long, default_value = "./")]
        path: PathBuf,

        /// Generate keys and export as a JSON array
        #[arg(long)]
        array: bool,

        /// JSON Schema file every record must satisfy
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Start a session on a store loaded from disk
    Open {
        /// Data file; `.json` is appended when no extension is given
        file: PathBuf,

        /// Schema file, instead of the `<name>.schema.json` sidecar
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
