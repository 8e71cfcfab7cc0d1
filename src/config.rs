//! Configuration system.
//!
//! Tool configuration for settle: overrides for the managed file
//! locations, backup behavior, and logging. Loaded from layered sources
//! (built-in defaults, the global config file, an explicit `--config`
//! file, `SETTLE_*` environment variables) with runtime validation.

use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;
use crate::paths::PathOverrides;

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettleConfig {
    /// Overrides for the managed file locations
    #[serde(default)]
    pub paths: PathOverrides,

    /// Backup behavior
    #[serde(default)]
    pub backup: BackupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backup behavior, the `[backup]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Take a backup automatically before a profile is applied
    #[serde(default = "default_true")]
    pub auto_backup: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            auto_backup: default_true(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Paths(String, String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Paths(field, msg) => {
                write!(f, "Paths '{}': {}", field, msg)
            }
            ValidationError::Logging(msg) => {
                write!(f, "Logging: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

impl SettleConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("desktop_settings", &self.paths.desktop_settings),
            ("mcp_registry", &self.paths.mcp_registry),
            ("code_settings", &self.paths.code_settings),
            ("backup_root", &self.paths.backup_root),
        ] {
            if let Some(path) = value {
                if path.as_os_str().is_empty() {
                    errors.push(ValidationError::Paths(
                        field.to_string(),
                        "override cannot be an empty path".to_string(),
                    ));
                }
            }
        }

        for msg in validate_logging(&self.logging) {
            errors.push(ValidationError::Logging(msg));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_logging(logging: &LoggingConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        errors.push(format!(
            "invalid level '{}' (expected one of {})",
            logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
    if logging.format != "text" && logging.format != "json" {
        errors.push(format!(
            "invalid format '{}' (expected 'text' or 'json')",
            logging.format
        ));
    }
    if !["stdout", "stderr", "file"].contains(&logging.output.as_str()) {
        errors.push(format!(
            "invalid output '{}' (expected 'stdout', 'stderr', or 'file')",
            logging.output
        ));
    }

    errors
}
