//! Backup presentation: create, list, restore.

use chrono::Local;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

use crate::backup::BackupRecord;
use crate::settings::{BackupListResult, RestoreBackupResult};

pub fn format_backup_create_text(record: &BackupRecord) -> String {
    format!(
        "Created backup '{}' ({} document(s))",
        record.name,
        record.documents.len()
    )
}

pub fn format_backup_list_text(result: &BackupListResult) -> String {
    if result.backups.is_empty() {
        return format!("No backups in {}.", result.root.display());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Created", "Documents"]);
    for record in &result.backups {
        let created = record
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let documents = record
            .documents
            .iter()
            .map(|d| d.kind.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![record.name.clone(), created, documents]);
    }
    format!("{}\n\nTotal: {} backup(s)", table, result.backups.len())
}

pub fn format_backup_list_json(result: &BackupListResult) -> String {
    let backups: Vec<_> = result
        .backups
        .iter()
        .map(|record| {
            json!({
                "name": record.name,
                "created_at": record.created_at.to_rfc3339(),
                "documents": record.documents.iter().map(|d| {
                    json!({
                        "kind": d.kind,
                        "file": d.file,
                        "digest": d.digest,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();
    let out = json!({
        "root": result.root,
        "backups": backups,
        "total": result.backups.len(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_restore_result_text(result: &RestoreBackupResult) -> String {
    let mut out = format!("Restored backup '{}'", result.name);
    for kind in &result.restored {
        out.push_str(&format!("\n  ✓ {}", kind));
    }
    out
}
