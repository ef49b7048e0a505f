//! Error types for relaunch
//!
//! All modules use `RelaunchResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for relaunch operations
pub type RelaunchResult<T> = Result<T, RelaunchError>;

/// All errors that can occur in relaunch
#[derive(Error, Debug)]
pub enum RelaunchError {
    // History errors
    #[error("History entry key must not be empty")]
    EmptyKey,

    #[error("Failed to persist history: {0}")]
    Persist(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl RelaunchError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EmptyKey => Some("Pass a coordinate such as com.example:app"),
            Self::ConfigInvalid { .. } => Some("Run: relaunch config init --force"),
            Self::Persist(_) => Some("Check free disk space and permissions on the data directory"),
            _ => None,
        }
    }
}
