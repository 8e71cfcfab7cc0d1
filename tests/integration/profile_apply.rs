//! Integration tests for profile application across merge, backup, and restore

use serde_json::json;
use settle::document::DocumentKind;
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

#[test]
fn test_apply_takes_a_restorable_backup() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    service
        .set_setting(DocumentKind::CodeSettings, "autoApproveRead", json!(false))
        .unwrap();
    service
        .set_setting(DocumentKind::CodeSettings, "model", json!("opus"))
        .unwrap();
    let before = std::fs::read(&service.paths().code_settings).unwrap();

    let result = service.apply_profile("developer", true).unwrap();
    assert_eq!(result.backup.as_deref(), Some("before_developer"));
    assert!(service.backups().contains("before_developer"));

    // The profile overrode the conflicting key and kept the unrelated one.
    let code = service.load_settings(DocumentKind::CodeSettings).unwrap();
    assert_eq!(code.document.get("autoApproveRead"), Some(&json!(true)));
    assert_eq!(code.document.get("model"), Some(&json!("opus")));

    // Restore returns the document to its exact pre-apply bytes.
    service.restore_backup("before_developer").unwrap();
    assert_eq!(
        std::fs::read(&service.paths().code_settings).unwrap(),
        before
    );
}

#[test]
fn test_repeat_apply_numbers_its_backups() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);

    let first = service.apply_profile("developer", true).unwrap();
    assert_eq!(first.backup.as_deref(), Some("before_developer"));

    // A second apply changes nothing but still snapshots, under a fresh name.
    let second = service.apply_profile("developer", true).unwrap();
    assert_eq!(second.backup.as_deref(), Some("before_developer_2"));
    assert!(second.merges.iter().all(|m| m.changed_keys.is_empty()));

    let names: Vec<String> = service
        .list_backups()
        .unwrap()
        .backups
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert!(names.contains(&"before_developer".to_string()));
    assert!(names.contains(&"before_developer_2".to_string()));
}

#[test]
fn test_mcp_profile_registers_server() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);

    let result = service.apply_profile("github-mcp", false).unwrap();

    assert_eq!(result.merges.len(), 1);
    let merge = &result.merges[0];
    assert_eq!(merge.kind, DocumentKind::McpRegistry);
    assert_eq!(merge.changed_keys, vec!["mcpServers".to_string()]);
    assert!(merge.conflicts.is_empty());

    // The registered server is visible through the normal MCP listing.
    let listed = service.list_mcp_servers().unwrap();
    assert_eq!(listed.servers.len(), 1);
    let (name, entry) = &listed.servers[0];
    assert_eq!(name, "github");
    assert_eq!(entry.command, "npx");
    assert!(entry
        .env
        .contains_key("GITHUB_PERSONAL_ACCESS_TOKEN"));
}

#[test]
fn test_mcp_profile_keeps_existing_servers() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    service
        .add_mcp_server(
            "local",
            settle::schema::McpServerEntry::new("uvx").with_args(vec!["my-server".to_string()]),
        )
        .unwrap();

    service.apply_profile("filesystem-mcp", false).unwrap();

    // Existing registrations keep their slot; the merged one is appended.
    let listed = service.list_mcp_servers().unwrap();
    let names: Vec<&str> = listed.servers.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["local", "filesystem"]);
}

#[test]
fn test_apply_without_backup_leaves_store_empty() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);

    let result = service.apply_profile("minimal", false).unwrap();

    assert!(result.backup.is_none());
    assert!(service.list_backups().unwrap().backups.is_empty());
}

#[test]
fn test_apply_touches_only_targeted_documents() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    service
        .set_setting(DocumentKind::DesktopSettings, "theme", json!("dark"))
        .unwrap();
    let desktop_before = std::fs::read(&service.paths().desktop_settings).unwrap();

    // Developer only carries a code-settings partial.
    let result = service.apply_profile("developer", false).unwrap();
    assert!(result
        .merges
        .iter()
        .all(|m| m.kind == DocumentKind::CodeSettings));

    assert_eq!(
        std::fs::read(&service.paths().desktop_settings).unwrap(),
        desktop_before
    );
}

#[test]
fn test_power_user_over_developer_reports_conflicts() {
    let root = TempDir::new().unwrap();
    let service = service_in(&root);
    service.apply_profile("developer", false).unwrap();

    let result = service.apply_profile("power-user", false).unwrap();

    // Only the write approval differs between the two profiles.
    assert_eq!(result.merges.len(), 1);
    let merge = &result.merges[0];
    assert_eq!(merge.changed_keys, vec!["autoApproveWrite".to_string()]);
    assert_eq!(merge.conflicts.len(), 1);
    assert_eq!(merge.conflicts[0].path, "autoApproveWrite");
    assert_eq!(merge.conflicts[0].old, json!(false));
    assert_eq!(merge.conflicts[0].new, json!(true));
}
