//! Environment variable presentation for Claude Code settings.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

use crate::settings::{mask_sensitive_value, EnvListResult};

pub fn format_env_list_text(result: &EnvListResult, show_secrets: bool) -> String {
    if result.vars.is_empty() {
        return "No environment variables configured.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Key", "Value"]);
    for (key, value) in &result.vars {
        let shown = if show_secrets {
            value.clone()
        } else {
            mask_sensitive_value(key, value)
        };
        table.add_row(vec![key.clone(), shown]);
    }
    format!("{}\nTotal: {} variable(s)", table, result.vars.len())
}

pub fn format_env_list_json(result: &EnvListResult, show_secrets: bool) -> String {
    let vars: Vec<_> = result
        .vars
        .iter()
        .map(|(key, value)| {
            let shown = if show_secrets {
                value.clone()
            } else {
                mask_sensitive_value(key, value)
            };
            json!({ "key": key, "value": shown })
        })
        .collect();
    let out = json!({ "env": vars, "total": result.vars.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
