//! Resolution of the managed settings file locations.
//!
//! Claude Desktop keeps its files in the platform config directory
//! (`%APPDATA%\Claude` on Windows, `~/Library/Application Support/Claude`
//! on macOS, `$XDG_CONFIG_HOME/Claude` or `~/.config/Claude` elsewhere).
//! Claude Code keeps its settings and the backup store under `~/.claude`.
//! Every location can be overridden through the tool's own configuration.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::DocumentKind;
use crate::error::SettingsError;

/// Per-location overrides, loaded from the `[paths]` section of the tool
/// config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOverrides {
    #[serde(default)]
    pub desktop_settings: Option<PathBuf>,
    #[serde(default)]
    pub mcp_registry: Option<PathBuf>,
    #[serde(default)]
    pub code_settings: Option<PathBuf>,
    #[serde(default)]
    pub backup_root: Option<PathBuf>,
}

/// Resolved locations of the three managed documents and the backup store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    pub desktop_settings: PathBuf,
    pub mcp_registry: PathBuf,
    pub code_settings: PathBuf,
    pub backup_root: PathBuf,
}

impl SettingsPaths {
    /// Resolves all locations from the platform defaults.
    pub fn resolve() -> Result<Self, SettingsError> {
        Self::resolve_with(&PathOverrides::default())
    }

    /// Resolves all locations, applying config overrides where present.
    pub fn resolve_with(overrides: &PathOverrides) -> Result<Self, SettingsError> {
        let desktop_dir = desktop_config_dir()?;
        let claude_home = claude_home_dir()?;

        let paths = SettingsPaths {
            desktop_settings: overrides
                .desktop_settings
                .clone()
                .unwrap_or_else(|| desktop_dir.join("settings.json")),
            mcp_registry: overrides
                .mcp_registry
                .clone()
                .unwrap_or_else(|| desktop_dir.join("claude_desktop_config.json")),
            code_settings: overrides
                .code_settings
                .clone()
                .unwrap_or_else(|| claude_home.join("settings.json")),
            backup_root: overrides
                .backup_root
                .clone()
                .unwrap_or_else(|| claude_home.join("backups")),
        };
        debug!("Resolved settings paths: {:?}", paths);
        Ok(paths)
    }

    pub fn path_for(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::DesktopSettings => &self.desktop_settings,
            DocumentKind::McpRegistry => &self.mcp_registry,
            DocumentKind::CodeSettings => &self.code_settings,
        }
    }
}

/// The Claude Desktop configuration directory for this platform.
pub fn desktop_config_dir() -> Result<PathBuf, SettingsError> {
    let base = BaseDirs::new().ok_or_else(|| {
        SettingsError::ConfigError("could not determine the home directory".to_string())
    })?;
    Ok(base.config_dir().join("Claude"))
}

/// The `~/.claude` directory used by Claude Code.
pub fn claude_home_dir() -> Result<PathBuf, SettingsError> {
    let base = BaseDirs::new().ok_or_else(|| {
        SettingsError::ConfigError("could not determine the home directory".to_string())
    })?;
    Ok(base.home_dir().join(".claude"))
}

/// Canonical form of a path for display. Falls back to the path as given
/// when it does not exist yet.
pub fn display_path(path: &Path) -> String {
    dunce::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
