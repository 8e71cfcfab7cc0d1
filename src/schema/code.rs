//! Claude Code CLI settings, including Stop-hook configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::SettingsError;
use crate::schema::mcp::{self, McpServerEntry};
use crate::schema::{expect_bool, expect_string_array, expect_string_map};

/// Key of the environment map inside the code settings document.
pub const ENV_KEY: &str = "env";
/// Key of the hooks object inside the code settings document.
pub const HOOKS_KEY: &str = "hooks";

pub const HOOK_COMMAND_TYPE: &str = "command";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub denied_tools: Vec<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_approve_all: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_approve_read: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_approve_write: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_approve_bash: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mcp_servers: BTreeMap<String, McpServerEntry>,

    #[serde(default, skip_serializing_if = "HooksConfig::is_empty")]
    pub hooks: HooksConfig,

    /// Fields this tool does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Document,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Hook configuration. Only Stop hooks are managed; anything else under
/// `hooks` passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default, rename = "Stop", skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<StopHook>,

    #[serde(flatten)]
    pub extra: Document,
}

impl HooksConfig {
    pub fn is_empty(&self) -> bool {
        self.stop.is_empty() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopHook {
    #[serde(default)]
    pub hooks: Vec<HookCommand>,
}

impl StopHook {
    /// A Stop hook running one shell command.
    pub fn single(command: impl Into<String>) -> Self {
        StopHook {
            hooks: vec![HookCommand::shell(command)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookCommand {
    #[serde(rename = "type", default = "default_hook_kind")]
    pub kind: String,

    pub command: String,
}

fn default_hook_kind() -> String {
    HOOK_COMMAND_TYPE.to_string()
}

impl HookCommand {
    pub fn shell(command: impl Into<String>) -> Self {
        HookCommand {
            kind: HOOK_COMMAND_TYPE.to_string(),
            command: command.into(),
        }
    }
}

/// Parses the typed view of a code settings document.
pub fn parse_code_settings(document: &Document) -> Result<CodeSettings, SettingsError> {
    serde_json::from_value(serde_json::Value::Object(document.clone())).map_err(|e| {
        SettingsError::Validation {
            field: "Claude Code settings".to_string(),
            reason: e.to_string(),
        }
    })
}

pub(crate) fn validate(document: &Document) -> Result<(), SettingsError> {
    expect_string_array(document, "allowedTools")?;
    expect_string_array(document, "deniedTools")?;
    expect_bool(document, "autoApproveAll")?;
    expect_bool(document, "autoApproveRead")?;
    expect_bool(document, "autoApproveWrite")?;
    expect_bool(document, "autoApproveBash")?;
    expect_string_map(document, ENV_KEY)?;
    mcp::validate_servers_field(document, mcp::MCP_SERVERS_KEY)?;
    if let Some(value) = document.get(HOOKS_KEY) {
        serde_json::from_value::<HooksConfig>(value.clone()).map_err(|e| {
            SettingsError::Validation {
                field: HOOKS_KEY.to_string(),
                reason: e.to_string(),
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_serializes_empty() {
        let value = serde_json::to_value(CodeSettings::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_camel_case_field_names() {
        let raw = json!({
            "allowedTools": ["Read"],
            "autoApproveRead": true,
            "mcpServers": {"fs": {"command": "npx"}}
        });
        let settings: CodeSettings = serde_json::from_value(raw).unwrap();
        assert_eq!(settings.allowed_tools, vec!["Read"]);
        assert!(settings.auto_approve_read);
        assert!(settings.mcp_servers.contains_key("fs"));
    }

    #[test]
    fn test_hooks_round_trip() {
        let raw = json!({
            "hooks": {
                "Stop": [{"hooks": [{"type": "command", "command": "printf '\\a'"}]}],
                "PreToolUse": [{"keep": "me"}]
            }
        });
        let settings: CodeSettings = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(settings.hooks.stop.len(), 1);
        assert_eq!(settings.hooks.stop[0].hooks[0].command, "printf '\\a'");
        assert!(settings.hooks.extra.contains_key("PreToolUse"));

        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_stop_hook_single() {
        let hook = StopHook::single("say done");
        assert_eq!(hook.hooks.len(), 1);
        assert_eq!(hook.hooks[0].kind, HOOK_COMMAND_TYPE);
        assert_eq!(hook.hooks[0].command, "say done");
    }

    #[test]
    fn test_parse_preserves_unknown_top_level_fields() {
        let mut document = Document::new();
        document.insert("model".to_string(), json!("opus"));
        document.insert("autoApproveBash".to_string(), json!(true));

        let settings = parse_code_settings(&document).unwrap();
        assert!(settings.auto_approve_bash);
        assert_eq!(settings.extra.get("model"), Some(&json!("opus")));
    }
}
