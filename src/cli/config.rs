//! Session configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! { "pretty_print": false, "log_level": "info", "export_on_exit": true }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Config path used when `--config` is not given.
///
/// Store exports always end in `.json`, so no store can overwrite it.
pub const DEFAULT_CONFIG_PATH: &str = "./.jsondbrc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pretty-print exports unless a request says otherwise (default false)
    #[serde(default)]
    pub pretty_print: bool,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Export the store when the session ends (default true)
    #[serde(default = "default_export_on_exit")]
    pub export_on_exit: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_export_on_exit() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty_print: false,
            log_level: default_log_level(),
            export_on_exit: default_export_on_exit(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `explicit`, or the default path if it exists, or the defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        Self::resolve_with_default(explicit, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn resolve_with_default(explicit: Option<&Path>, default: &Path) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Minimum log severity
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }
}
