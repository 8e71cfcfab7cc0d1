//! Shared presentation: headings, value rendering, and the paths report.

use std::path::Path;

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

use crate::paths::display_path;
use crate::settings::PathsReport;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Render a JSON value for terminal output: strings print bare, anything
/// else prints as pretty JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

pub fn format_paths_report_text(report: &PathsReport, config_file: Option<&Path>) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Settings locations"));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Document", "Path", "Exists"]);
    for entry in &report.entries {
        table.add_row(vec![
            entry.kind.to_string(),
            display_path(&entry.path),
            if entry.exists { "yes" } else { "no" }.to_string(),
        ]);
    }
    table.add_row(vec![
        "backup store".to_string(),
        display_path(&report.backup_root),
        if report.backup_root_exists { "yes" } else { "no" }.to_string(),
    ]);
    out.push_str(&format!("{}\n", table));

    if let Some(config_file) = config_file {
        let state = if config_file.is_file() {
            ""
        } else {
            " (not present)"
        };
        out.push_str(&format!(
            "\nTool config: {}{}\n",
            display_path(config_file),
            state
        ));
    }
    out
}

pub fn format_paths_report_json(report: &PathsReport, config_file: Option<&Path>) -> String {
    let documents: Vec<_> = report
        .entries
        .iter()
        .map(|entry| {
            json!({
                "kind": entry.kind,
                "path": entry.path,
                "exists": entry.exists,
            })
        })
        .collect();
    let out = json!({
        "documents": documents,
        "backup_root": report.backup_root,
        "backup_root_exists": report.backup_root_exists,
        "config_file": config_file,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
