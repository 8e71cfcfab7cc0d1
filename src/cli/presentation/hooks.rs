//! Stop hook presentation: configured hooks and available presets.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

use crate::hooks::HookPreset;
use crate::settings::HooksListResult;

pub fn format_hooks_list_text(result: &HooksListResult) -> String {
    if result.hooks.is_empty() {
        return "No Stop hooks configured.\nAdd one with `settle hooks add` or pick a preset."
            .to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Index", "Command"]);
    for hook in &result.hooks {
        table.add_row(vec![hook.index.to_string(), hook.commands.join("\n")]);
    }
    format!("{}\nTotal: {} Stop hook(s)", table, result.hooks.len())
}

pub fn format_hooks_list_json(result: &HooksListResult) -> String {
    let hooks: Vec<_> = result
        .hooks
        .iter()
        .map(|h| json!({ "index": h.index, "commands": h.commands }))
        .collect();
    let out = json!({ "stop_hooks": hooks, "total": result.hooks.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_presets_text(presets: &[HookPreset]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Command"]);
    for preset in presets {
        table.add_row(vec![preset.name.to_string(), preset.command.to_string()]);
    }
    format!(
        "{}\n\nAdd one with `settle hooks add --preset <name>`.",
        table
    )
}

pub fn format_presets_json(presets: &[HookPreset]) -> String {
    let rows: Vec<_> = presets
        .iter()
        .map(|p| json!({ "name": p.name, "command": p.command }))
        .collect();
    let out = json!({ "presets": rows });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
