//! Error types for the settings management system.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the settings engine and its CLI surface.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    #[error("MCP server not found: {0}")]
    ServerNotFound(String),

    #[error("Setting not found: {0}")]
    KeyNotFound(String),

    #[error("Unknown profile: {0}. Run `settle profile list` to see available profiles.")]
    UnknownProfile(String),

    #[error("Malformed settings document at {path:?}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Invalid key path '{path}': {reason}")]
    InvalidKeyPath { path: String, reason: String },

    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Backup already exists: {0}")]
    DuplicateBackup(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Diagnostics ran to completion but found failing checks. The full
    /// report is the message so the CLI can surface it on exit.
    #[error("{0}")]
    Diagnostics(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for SettingsError {
    fn from(err: config::ConfigError) -> Self {
        SettingsError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Validation {
            field: "document".to_string(),
            reason: err.to_string(),
        }
    }
}
