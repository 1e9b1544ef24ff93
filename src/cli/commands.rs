//! CLI command implementations
//!
//! Both commands build a store, then hand stdin/stdout to a session.

use std::io;
use std::path::{Path, PathBuf};

use crate::observability::{log_event, Event, Logger};
use crate::persist;
use crate::store::{Store, StoreMode, StoreOptions};

use super::args::{Cli, Command};
use super::config::{Config, DEFAULT_CONFIG_PATH};
use super::errors::CliResult;
use super::session::run_session;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let config = Config::resolve(cli.config.as_deref())?;
    Logger::set_min_severity(config.severity());

    let source = cli
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
        .display()
        .to_string();
    log_event(
        Event::ConfigLoaded,
        &[("path", &source), ("log_level", &config.log_level)],
    );

    run_command(cli.command, &config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    let mut store = open_store(cmd)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut store, config, stdin.lock(), &mut stdout.lock())?;

    Ok(())
}

/// Builds the store a command names
pub fn open_store(cmd: Command) -> CliResult<Store> {
    match cmd {
        Command::Create {
            name,
            path,
            array,
            schema,
        } => create(name, path, array, schema.as_deref()),
        Command::Open { file, schema } => Ok(persist::load_from_file(file, schema.as_deref())?),
    }
}

/// Creates an empty store, loading its schema from `schema` if given
pub fn create(name: String, path: PathBuf, array: bool, schema: Option<&Path>) -> CliResult<Store> {
    let mode = if array { StoreMode::Array } else { StoreMode::Map };
    let mut options = StoreOptions::new().base_path(path).mode(mode);

    if let Some(schema_path) = schema {
        options = options.schema(persist::load_document(schema_path)?);
    }

    Ok(Store::new(name, options)?)
}
