//! Named settings profiles and their application.
//!
//! A profile is an immutable bundle of partial documents. Applying one
//! deep-merges each partial over the matching live document, so user
//! settings outside the profile's keys survive and every overwrite of a
//! differing value is reported as a conflict.

pub mod builtin;

use serde_json::Value;

use crate::document::{Document, DocumentKind};
use crate::error::SettingsError;
use crate::merge::{self, MergeResult};
use crate::schema::mcp::MCP_SERVERS_KEY;

/// An immutable named preset of partial documents.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsProfile {
    pub name: String,
    pub description: String,
    /// Desktop settings partial.
    pub settings: Document,
    /// Claude Code settings partial.
    pub code_settings: Document,
    /// MCP server table partial (name to entry).
    pub mcp_servers: Document,
}

impl SettingsProfile {
    pub fn named(name: impl Into<String>, description: impl Into<String>) -> Self {
        SettingsProfile {
            name: name.into(),
            description: description.into(),
            settings: Document::new(),
            code_settings: Document::new(),
            mcp_servers: Document::new(),
        }
    }
}

/// Fixed lookup table of available profiles, constructed once and passed
/// by reference. Tests inject their own tables.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<SettingsProfile>,
}

impl ProfileRegistry {
    pub fn new(profiles: Vec<SettingsProfile>) -> Self {
        ProfileRegistry { profiles }
    }

    /// The registry of built-in profiles.
    pub fn builtin() -> Self {
        builtin::builtin_profiles()
    }

    pub fn get(&self, name: &str) -> Option<&SettingsProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn require(&self, name: &str) -> Result<&SettingsProfile, SettingsError> {
        self.get(name)
            .ok_or_else(|| SettingsError::UnknownProfile(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingsProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Deep-merges each non-empty partial of `profile` over the matching
/// loaded document. Pure: callers decide what to do with the results.
pub fn apply_to_documents(
    profile: &SettingsProfile,
    desktop: &Document,
    mcp: &Document,
    code: &Document,
) -> Vec<(DocumentKind, MergeResult)> {
    let mut merges = Vec::new();
    if !profile.settings.is_empty() {
        merges.push((
            DocumentKind::DesktopSettings,
            merge::deep_merge(desktop, &profile.settings),
        ));
    }
    if !profile.mcp_servers.is_empty() {
        let mut overlay = Document::new();
        overlay.insert(
            MCP_SERVERS_KEY.to_string(),
            Value::Object(profile.mcp_servers.clone()),
        );
        merges.push((DocumentKind::McpRegistry, merge::deep_merge(mcp, &overlay)));
    }
    if !profile.code_settings.is_empty() {
        merges.push((
            DocumentKind::CodeSettings,
            merge::deep_merge(code, &profile.code_settings),
        ));
    }
    merges
}
