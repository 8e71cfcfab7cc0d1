//! Settings documents and their on-disk representation.
//!
//! A settings document is the root JSON object of one managed file. The
//! ordered map type keeps key insertion order stable across load/save
//! round-trips.

pub mod codec;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One settings file's root object, keys in insertion order.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Human-readable JSON type name for error messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The three managed configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Claude Desktop application settings.
    DesktopSettings,
    /// Claude Desktop MCP server registry.
    McpRegistry,
    /// Claude Code CLI settings.
    CodeSettings,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::DesktopSettings,
        DocumentKind::McpRegistry,
        DocumentKind::CodeSettings,
    ];

    /// Fixed filename this document is stored under inside a backup.
    pub fn snapshot_filename(&self) -> &'static str {
        match self {
            DocumentKind::DesktopSettings => "settings.json",
            DocumentKind::McpRegistry => "claude_desktop_config.json",
            DocumentKind::CodeSettings => "claude_code_settings.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::DesktopSettings => "desktop settings",
            DocumentKind::McpRegistry => "MCP server registry",
            DocumentKind::CodeSettings => "Claude Code settings",
        }
    }

    /// Parses the snapshot filename back to a kind, for backups whose
    /// manifest is missing.
    pub fn from_snapshot_filename(name: &str) -> Option<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.snapshot_filename() == name)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
