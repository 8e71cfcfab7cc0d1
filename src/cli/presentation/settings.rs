//! Settings document presentation: show, get, set.

use serde_json::{json, Value};

use super::shared::{format_section_heading, format_value};
use crate::settings::{GetSettingResult, SetSettingResult, ShowSettingsResult};

pub fn format_settings_show_text(result: &ShowSettingsResult) -> String {
    let mut out = format!("{}\n", format_section_heading(result.kind.label()));
    let state = if result.exists {
        ""
    } else {
        " (not created yet)"
    };
    out.push_str(&format!("  File: {}{}\n\n", result.path.display(), state));

    if result.document.is_empty() {
        out.push_str("(empty)\n");
    } else {
        let value = Value::Object(result.document.clone());
        let rendered =
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
        out.push_str(&rendered);
        out.push('\n');
    }
    out
}

pub fn format_settings_show_json(result: &ShowSettingsResult) -> String {
    let out = json!({
        "kind": result.kind,
        "path": result.path,
        "exists": result.exists,
        "document": Value::Object(result.document.clone()),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_get_result_text(result: &GetSettingResult) -> String {
    format_value(&result.value)
}

pub fn format_get_result_json(result: &GetSettingResult) -> String {
    let out = json!({
        "kind": result.kind,
        "key": result.key,
        "value": result.value,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_set_result_text(result: &SetSettingResult) -> String {
    let mut out = format!(
        "Set {} = {} in {}",
        result.key,
        result.value,
        result.file.display()
    );
    if let Some(previous) = &result.previous {
        out.push_str(&format!("\n  Previous value: {}", previous));
    }
    out
}
