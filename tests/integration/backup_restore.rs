//! Integration tests for backup creation and restore through the settings service

use serde_json::json;
use settle::document::DocumentKind;
use settle::error::SettingsError;
use settle::paths::{PathOverrides, SettingsPaths};
use settle::settings::SettingsService;
use tempfile::TempDir;

fn service_in(root: &TempDir) -> SettingsService {
    let paths = SettingsPaths::resolve_with(&PathOverrides {
        desktop_settings: Some(root.path().join("Claude").join("settings.json")),
        mcp_registry: Some(root.path().join("Claude").join("claude_desktop_config.json")),
        code_settings: Some(root.path().join(".claude").join("settings.json")),
        backup_root: Some(root.path().join(".claude").join("backups")),
    })
    .unwrap();
    SettingsService::new(paths)
}

fn seed_all_documents(service: &SettingsService) {
    service
        .set_setting(DocumentKind::DesktopSettings, "theme", json!("dark"))
        .unwrap();
    service
        .set_setting(DocumentKind::CodeSettings, "autoApproveRead", json!(true))
        .unwrap();
    service
        .add_mcp_server(
            "fs",
            settle::schema::McpServerEntry::new("npx").with_args(vec!["-y".to_string()]),
        )
        .unwrap();
}

fn live_document_bytes(service: &SettingsService) -> Vec<Vec<u8>> {
    DocumentKind::ALL
        .iter()
        .map(|kind| std::fs::read(service.paths().path_for(*kind)).unwrap())
        .collect()
}

#[test]
fn test_backup_and_restore_full_cycle() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    seed_all_documents(&service);
    let before = live_document_bytes(&service);

    let record = service.create_backup(Some("cycle")).unwrap();
    assert_eq!(record.documents.len(), 3);

    // Drift all three documents away from the snapshot.
    service
        .set_setting(DocumentKind::DesktopSettings, "theme", json!("light"))
        .unwrap();
    service
        .set_setting(DocumentKind::CodeSettings, "autoApproveRead", json!(false))
        .unwrap();
    service.remove_mcp_server("fs").unwrap();
    assert_ne!(live_document_bytes(&service), before);

    let result = service.restore_backup("cycle").unwrap();
    assert_eq!(result.restored.len(), 3);
    assert_eq!(live_document_bytes(&service), before);
}

#[test]
fn test_manifest_digests_match_snapshot_bytes() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    seed_all_documents(&service);

    service.create_backup(Some("sealed")).unwrap();

    let backup_dir = service.backups().root().join("sealed");
    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(backup_dir.join("manifest.json")).unwrap()).unwrap();

    let files = manifest["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    for file in files {
        let snapshot = backup_dir.join(file["file"].as_str().unwrap());
        let bytes = std::fs::read(&snapshot).unwrap();
        let expected = hex::encode(blake3::hash(&bytes).as_bytes());
        assert_eq!(file["blake3"].as_str().unwrap(), expected);
    }
}

#[test]
fn test_backup_snapshots_only_present_documents() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    service
        .set_setting(DocumentKind::DesktopSettings, "theme", json!("dark"))
        .unwrap();

    let record = service.create_backup(Some("partial")).unwrap();

    assert_eq!(record.documents.len(), 1);
    assert_eq!(record.documents[0].kind, DocumentKind::DesktopSettings);

    // Restoring the partial backup touches only the snapshotted document.
    let result = service.restore_backup("partial").unwrap();
    assert_eq!(result.restored, vec![DocumentKind::DesktopSettings]);
}

#[test]
fn test_restore_unknown_backup_through_service() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);

    assert!(matches!(
        service.restore_backup("ghost"),
        Err(SettingsError::BackupNotFound(_))
    ));
}

#[test]
fn test_list_backups_reports_store_root() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    seed_all_documents(&service);

    service.create_backup(Some("one")).unwrap();
    service.create_backup(Some("two")).unwrap();

    let listing = service.list_backups().unwrap();
    assert_eq!(listing.root, root.path().join(".claude").join("backups"));
    let names: Vec<&str> = listing.backups.iter().map(|b| b.name.as_str()).collect();
    assert!(names.contains(&"one"));
    assert!(names.contains(&"two"));
}

#[test]
fn test_delete_backup_then_restore_fails() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    seed_all_documents(&service);

    service.create_backup(Some("fleeting")).unwrap();
    service.delete_backup("fleeting").unwrap();

    assert!(!service.backups().contains("fleeting"));
    assert!(matches!(
        service.restore_backup("fleeting"),
        Err(SettingsError::BackupNotFound(_))
    ));
}
