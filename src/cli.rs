//! CLI command implementations for Tilequest.

pub(crate) mod check;
pub(crate) mod play;

mod keys;
mod terminal;

use std::error::Error;
use std::fmt;
use std::path::Path;

use tilequest::{ConfigError, GameConfig};

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(format!("invalid config: {e}"))
    }
}

/// Load the config at `path`, or the defaults when there is none.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    match path {
        Some(path) => Ok(GameConfig::load(path)?),
        None => Ok(GameConfig::default()),
    }
}
