//! Profile presentation: list, show, apply.

use std::collections::BTreeSet;

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::{json, Value};

use super::shared::format_section_heading;
use crate::profile::SettingsProfile;
use crate::settings::{ProfileApplyResult, ProfileSummary};

pub fn format_profile_list_text(profiles: &[ProfileSummary]) -> String {
    if profiles.is_empty() {
        return "No profiles available.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Description"]);
    for profile in profiles {
        table.add_row(vec![profile.name.clone(), profile.description.clone()]);
    }
    format!("{}\n\nApply one with `settle profile apply <name>`.", table)
}

pub fn format_profile_list_json(profiles: &[ProfileSummary]) -> String {
    let rows: Vec<_> = profiles
        .iter()
        .map(|p| json!({"name": p.name, "description": p.description}))
        .collect();
    let out = json!({ "profiles": rows, "total": profiles.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_profile_show_text(profile: &SettingsProfile) -> String {
    let mut out = format!(
        "{}\n{}\n",
        format_section_heading(&profile.name),
        profile.description
    );
    let sections = [
        ("Desktop settings", &profile.settings),
        ("MCP servers", &profile.mcp_servers),
        ("Claude Code settings", &profile.code_settings),
    ];
    let mut any = false;
    for (title, partial) in sections {
        if partial.is_empty() {
            continue;
        }
        any = true;
        let rendered = serde_json::to_string_pretty(&Value::Object(partial.clone()))
            .unwrap_or_else(|_| "{}".to_string());
        out.push_str(&format!("\n{}\n{}\n", format_section_heading(title), rendered));
    }
    if !any {
        out.push_str("\n(empty profile; applying it changes nothing)\n");
    }
    out
}

pub fn format_profile_show_json(profile: &SettingsProfile) -> String {
    let out = json!({
        "name": profile.name,
        "description": profile.description,
        "settings": Value::Object(profile.settings.clone()),
        "mcp_servers": Value::Object(profile.mcp_servers.clone()),
        "code_settings": Value::Object(profile.code_settings.clone()),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_apply_result_text(result: &ProfileApplyResult) -> String {
    let mut out = format!("Applied profile '{}'", result.profile);
    if let Some(backup) = &result.backup {
        out.push_str(&format!("\nBackup taken: {}", backup));
    }

    let mut any_changes = false;
    for merge in &result.merges {
        if merge.changed_keys.is_empty() {
            continue;
        }
        any_changes = true;
        out.push_str(&format!("\n\n{} ({})", merge.kind, merge.file.display()));
        let conflict_paths: BTreeSet<&str> =
            merge.conflicts.iter().map(|c| c.path.as_str()).collect();
        for key in merge
            .changed_keys
            .iter()
            .filter(|k| !conflict_paths.contains(k.as_str()))
        {
            out.push_str(&format!("\n  + {}", key));
        }
        for conflict in &merge.conflicts {
            out.push_str(&format!(
                "\n  ! {} replaced: {} is now {}",
                conflict.path, conflict.old, conflict.new
            ));
        }
    }
    if !any_changes {
        out.push_str("\nEverything was already in place; nothing changed.");
    }
    out
}

pub fn format_apply_result_json(result: &ProfileApplyResult) -> String {
    let merges: Vec<_> = result
        .merges
        .iter()
        .map(|m| {
            json!({
                "kind": m.kind,
                "file": m.file,
                "changed_keys": m.changed_keys,
                "conflicts": m.conflicts.iter().map(|c| {
                    json!({ "path": c.path, "old": c.old, "new": c.new })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();
    let out = json!({
        "profile": result.profile,
        "backup": result.backup,
        "merges": merges,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
