//! Integration tests for doctor diagnostics through the CLI route

use settle::cli::{Commands, RunContext};
use settle::config::SettleConfig;
use settle::doctor::run_doctor;
use settle::error::SettingsError;
use settle::paths::PathOverrides;
use tempfile::TempDir;

fn run_context(root: &TempDir) -> RunContext {
    let config = SettleConfig {
        paths: PathOverrides {
            desktop_settings: Some(root.path().join("Claude").join("settings.json")),
            mcp_registry: Some(root.path().join("Claude").join("claude_desktop_config.json")),
            code_settings: Some(root.path().join(".claude").join("settings.json")),
            backup_root: Some(root.path().join(".claude").join("backups")),
        },
        ..SettleConfig::default()
    };
    RunContext::from_config(config, None).unwrap()
}

#[test]
fn test_doctor_json_output_is_parseable() {
    let root = TempDir::new().unwrap();
    let ctx = run_context(&root);

    let output = ctx
        .execute(&Commands::Doctor {
            fix: false,
            format: "json".to_string(),
        })
        .unwrap();

    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(report["checks"].is_array());
    assert_eq!(report["backups"]["count"], 0);
    // The empty tree warns about the missing backup store.
    assert!(report["issues"].as_u64().unwrap() >= 1);
}

#[test]
fn test_doctor_failure_surfaces_as_error() {
    let root = TempDir::new().unwrap();
    let ctx = run_context(&root);
    std::fs::create_dir_all(root.path().join("Claude")).unwrap();
    std::fs::write(
        root.path().join("Claude").join("settings.json"),
        b"{ not json",
    )
    .unwrap();

    // A failing report becomes an error so the binary exits non-zero.
    match ctx.execute(&Commands::Doctor {
        fix: false,
        format: "text".to_string(),
    }) {
        Err(SettingsError::Diagnostics(report)) => {
            assert!(report.contains("desktop settings"));
            assert!(report.contains("issue(s) found"));
        }
        other => panic!("Expected Diagnostics error, got {:?}", other),
    }
}

#[test]
fn test_doctor_fix_creates_directories_end_to_end() {
    let root = TempDir::new().unwrap();
    let ctx = run_context(&root);

    let output = ctx
        .execute(&Commands::Doctor {
            fix: true,
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.contains("Created:"));
    assert!(output.contains("No problems found."));
    assert!(root.path().join(".claude").join("backups").is_dir());
    assert!(root.path().join("Claude").is_dir());
}

#[test]
fn test_doctor_text_report_covers_every_document() {
    let root = TempDir::new().unwrap();
    let ctx = run_context(&root);

    let report = run_doctor(ctx.service(), false);
    let rendered = settle::cli::format_doctor_report_text(&report);

    assert!(rendered.contains("desktop settings"));
    assert!(rendered.contains("MCP server registry"));
    assert!(rendered.contains("Claude Code settings"));
    assert!(rendered.contains("backup census"));
}

#[test]
fn test_doctor_reports_registered_server_commands() {
    let root = TempDir::new().unwrap();
    let ctx = run_context(&root);
    ctx.service()
        .add_mcp_server(
            "ghost",
            settle::schema::McpServerEntry::new("no-such-binary-on-path-xyz"),
        )
        .unwrap();

    let report = run_doctor(ctx.service(), false);
    let server = report
        .checks
        .iter()
        .find(|c| c.name == "mcp server 'ghost'")
        .unwrap();
    assert!(server.detail.contains("not found on PATH"));
}
