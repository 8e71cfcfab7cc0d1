//! MCP server registry entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{value_type_name, Document};
use crate::error::SettingsError;

/// Key the host applications store their server table under.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// One MCP server registration. Optional fields are omitted from the
/// serialized form when empty so documents stay minimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServerEntry {
    pub command: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl McpServerEntry {
    pub fn new(command: impl Into<String>) -> Self {
        McpServerEntry {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            disabled: false,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn to_value(&self) -> Result<Value, SettingsError> {
        serde_json::to_value(self).map_err(|e| SettingsError::Validation {
            field: MCP_SERVERS_KEY.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Parses every server entry in a document, with its name.
pub fn servers_in(document: &Document) -> Result<Vec<(String, McpServerEntry)>, SettingsError> {
    let mut servers = Vec::new();
    let Some(value) = document.get(MCP_SERVERS_KEY) else {
        return Ok(servers);
    };
    let Value::Object(table) = value else {
        return Err(SettingsError::Validation {
            field: MCP_SERVERS_KEY.to_string(),
            reason: format!("expected an object, found {}", value_type_name(value)),
        });
    };
    for (name, entry) in table {
        let parsed = serde_json::from_value::<McpServerEntry>(entry.clone()).map_err(|e| {
            SettingsError::Validation {
                field: format!("{}.{}", MCP_SERVERS_KEY, name),
                reason: e.to_string(),
            }
        })?;
        servers.push((name.clone(), parsed));
    }
    Ok(servers)
}

pub(crate) fn validate_registry(document: &Document) -> Result<(), SettingsError> {
    validate_servers_field(document, MCP_SERVERS_KEY)
}

/// Validates a `mcpServers`-shaped field wherever it appears; the code
/// settings document embeds the same table.
pub(crate) fn validate_servers_field(
    document: &Document,
    field: &str,
) -> Result<(), SettingsError> {
    let Some(value) = document.get(field) else {
        return Ok(());
    };
    let Value::Object(table) = value else {
        return Err(SettingsError::Validation {
            field: field.to_string(),
            reason: format!("expected an object, found {}", value_type_name(value)),
        });
    };
    for (name, entry) in table {
        serde_json::from_value::<McpServerEntry>(entry.clone()).map_err(|e| {
            SettingsError::Validation {
                field: format!("{}.{}", field, name),
                reason: e.to_string(),
            }
        })?;
    }
    Ok(())
}
