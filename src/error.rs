//! Error types for asset loading and configuration.
//!
//! Neither is fatal to a running game: asset errors degrade rendering and
//! config errors are reported before the game starts.

use std::fmt;
use std::path::PathBuf;

use crate::world::MapError;

/// Failure to load an asset.
#[derive(Debug)]
pub enum AssetError {
    /// No asset with that name exists.
    NotFound {
        /// Requested asset name.
        name: String,
    },
    /// The asset exists but could not be read.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The asset was read but holds nothing usable.
    Empty {
        /// Requested asset name.
        name: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "asset not found: {name}"),
            Self::Io { path, source } => {
                write!(f, "failed to read asset {}: {source}", path.display())
            }
            Self::Empty { name } => write!(f, "asset {name} is empty"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to load or validate a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The config file is not valid JSON for the config schema.
    Parse(serde_json::Error),
    /// The config parsed but describes an unplayable game.
    Invalid {
        /// Which setting is wrong.
        field: &'static str,
        /// Why.
        reason: String,
    },
    /// The configured map layout is malformed.
    Map(MapError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "invalid config: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field {field}: {reason}"),
            Self::Map(e) => write!(f, "invalid map layout: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Map(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<MapError> for ConfigError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}
