//! CLI module for jsondb
//!
//! Provides command-line interface for:
//! - create: Start a session on a new store
//! - open: Start a session on a store loaded from disk

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod session;

pub use args::{Cli, Command};
pub use commands::{create, open_store, run, run_command};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response};
pub use session::{run_session, Request};
