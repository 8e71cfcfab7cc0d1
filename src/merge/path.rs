//! Dot-separated key paths addressing nested document values.

use std::fmt;

use crate::error::SettingsError;

/// A parsed key path such as `mcpServers.github.command`.
///
/// Segments may not be empty. There is no escape syntax, so a key that
/// itself contains a literal `.` cannot be addressed through a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        if raw.is_empty() {
            return Err(SettingsError::InvalidKeyPath {
                path: raw.to_string(),
                reason: "path is empty".to_string(),
            });
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(SettingsError::InvalidKeyPath {
                path: raw.to_string(),
                reason: "path contains an empty segment".to_string(),
            });
        }
        Ok(KeyPath {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, the key that receives the value.
    pub fn leaf(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// All segments before the leaf, the objects walked through.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Extends a dotted prefix with one more key.
pub(crate) fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
