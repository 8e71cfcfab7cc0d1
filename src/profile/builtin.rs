//! The built-in profile table.

use serde_json::{json, Value};

use super::{ProfileRegistry, SettingsProfile};
use crate::document::Document;

pub fn builtin_profiles() -> ProfileRegistry {
    ProfileRegistry::new(vec![
        developer(),
        power_user(),
        filesystem_mcp(),
        github_mcp(),
        minimal(),
    ])
}

fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

fn developer() -> SettingsProfile {
    let mut profile = SettingsProfile::named(
        "developer",
        "Auto-approve read operations for day-to-day development",
    );
    profile.code_settings = object(json!({
        "autoApproveRead": true,
        "autoApproveWrite": false,
        "autoApproveBash": false
    }));
    profile
}

fn power_user() -> SettingsProfile {
    let mut profile = SettingsProfile::named(
        "power-user",
        "Auto-approve read and write operations; shell commands still confirm",
    );
    profile.code_settings = object(json!({
        "autoApproveRead": true,
        "autoApproveWrite": true,
        "autoApproveBash": false
    }));
    profile
}

fn filesystem_mcp() -> SettingsProfile {
    let mut profile = SettingsProfile::named(
        "filesystem-mcp",
        "Register the filesystem MCP server (edit the allowed directory before use)",
    );
    profile.mcp_servers = object(json!({
        "filesystem": {
            "command": "npx",
            "args": [
                "-y",
                "@modelcontextprotocol/server-filesystem",
                "/path/to/allowed/dir"
            ]
        }
    }));
    profile
}

fn github_mcp() -> SettingsProfile {
    let mut profile = SettingsProfile::named(
        "github-mcp",
        "Register the GitHub MCP server (set your personal access token)",
    );
    profile.mcp_servers = object(json!({
        "github": {
            "command": "npx",
            "args": ["-y", "@modelcontextprotocol/server-github"],
            "env": {
                "GITHUB_PERSONAL_ACCESS_TOKEN": "<your-token>"
            }
        }
    }));
    profile
}

fn minimal() -> SettingsProfile {
    let mut profile = SettingsProfile::named(
        "minimal",
        "Switch every auto-approval off",
    );
    profile.code_settings = object(json!({
        "autoApproveAll": false,
        "autoApproveRead": false,
        "autoApproveWrite": false,
        "autoApproveBash": false
    }));
    profile
}
