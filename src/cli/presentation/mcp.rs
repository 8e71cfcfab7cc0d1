//! MCP registry presentation: server list and mutation messages.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

use crate::settings::{McpAddResult, McpListResult};

pub fn format_mcp_list_text(result: &McpListResult) -> String {
    if result.servers.is_empty() {
        return format!("No MCP servers registered in {}.", result.path.display());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Command", "Args", "Env", "Status"]);
    for (name, entry) in &result.servers {
        let status = if entry.disabled { "disabled" } else { "enabled" };
        table.add_row(vec![
            name.clone(),
            entry.command.clone(),
            entry.args.join(" "),
            entry.env.keys().cloned().collect::<Vec<_>>().join(", "),
            status.to_string(),
        ]);
    }
    format!("{}\n\nTotal: {} server(s)", table, result.servers.len())
}

pub fn format_mcp_list_json(result: &McpListResult) -> String {
    // Environment values stay out of the listing; only the keys show.
    let servers: Vec<_> = result
        .servers
        .iter()
        .map(|(name, entry)| {
            json!({
                "name": name,
                "command": entry.command,
                "args": entry.args,
                "env_keys": entry.env.keys().collect::<Vec<_>>(),
                "disabled": entry.disabled,
            })
        })
        .collect();
    let out = json!({
        "path": result.path,
        "servers": servers,
        "total": result.servers.len(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_mcp_add_text(result: &McpAddResult) -> String {
    let mut out = format!("Registered MCP server '{}'", result.name);
    if result.replaced {
        out.push_str(" (replaced the previous entry)");
    }
    out.push_str(&format!("\n  Command: {}", result.entry.command));
    if !result.entry.args.is_empty() {
        out.push_str(&format!("\n  Args: {}", result.entry.args.join(" ")));
    }
    if !result.entry.env.is_empty() {
        out.push_str(&format!(
            "\n  Env: {}",
            result
                .entry
                .env
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    out
}
