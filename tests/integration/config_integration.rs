//! Integration tests for configuration flowing into the runtime context

use std::path::PathBuf;

use serde_json::json;
use settle::cli::{Commands, ProfileCommands, RunContext};
use settle::config::{global_config_path, ConfigLoader};
use settle::document::DocumentKind;
use settle::error::SettingsError;
use tempfile::TempDir;

use super::test_utils::with_home_env;

#[test]
fn test_config_path_overrides_flow_into_service() {
    let root = TempDir::new().unwrap();
    with_home_env(&root, || {
        let config_file = root.path().join("settle.toml");
        std::fs::write(
            &config_file,
            format!(
                r#"
[paths]
desktop_settings = "{0}/desktop.json"
mcp_registry = "{0}/mcp.json"
code_settings = "{0}/code.json"
backup_root = "{0}/backups"
"#,
                root.path().display()
            ),
        )
        .unwrap();

        let ctx = RunContext::new(Some(config_file)).unwrap();
        assert_eq!(
            ctx.service().paths().desktop_settings,
            root.path().join("desktop.json")
        );
        assert_eq!(
            ctx.service().paths().backup_root,
            root.path().join("backups")
        );

        // Writes land in the overridden location.
        ctx.service()
            .set_setting(DocumentKind::DesktopSettings, "theme", json!("dark"))
            .unwrap();
        assert!(root.path().join("desktop.json").exists());
    });
}

#[test]
fn test_global_config_discovered_for_run_context() {
    let root = TempDir::new().unwrap();
    with_home_env(&root, || {
        let settle_dir =
            PathBuf::from(std::env::var("XDG_CONFIG_HOME").unwrap()).join("settle");
        std::fs::create_dir_all(&settle_dir).unwrap();
        std::fs::write(
            settle_dir.join("config.toml"),
            format!("[paths]\nbackup_root = \"{}/saves\"\n", root.path().display()),
        )
        .unwrap();

        assert_eq!(global_config_path(), Some(settle_dir.join("config.toml")));

        let ctx = RunContext::new(None).unwrap();
        assert_eq!(
            ctx.service().paths().backup_root,
            root.path().join("saves")
        );
    });
}

#[test]
fn test_explicit_file_layers_over_global() {
    let root = TempDir::new().unwrap();
    with_home_env(&root, || {
        let settle_dir =
            PathBuf::from(std::env::var("XDG_CONFIG_HOME").unwrap()).join("settle");
        std::fs::create_dir_all(&settle_dir).unwrap();
        std::fs::write(
            settle_dir.join("config.toml"),
            "[backup]\nauto_backup = false\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        let explicit = root.path().join("override.toml");
        std::fs::write(&explicit, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(config.logging.level, "debug");
        // Sections the explicit file is silent on keep the global values.
        assert!(!config.backup.auto_backup);
    });
}

#[test]
fn test_invalid_config_rejected_by_run_context() {
    let root = TempDir::new().unwrap();
    with_home_env(&root, || {
        let config_file = root.path().join("settle.toml");
        std::fs::write(&config_file, "[logging]\nlevel = \"loud\"\n").unwrap();

        match RunContext::new(Some(config_file)) {
            Ok(_) => panic!("invalid config was accepted"),
            Err(SettingsError::ConfigError(msg)) => {
                assert!(msg.contains("Configuration validation failed"));
                assert!(msg.contains("invalid level"));
            }
            Err(other) => panic!("Expected ConfigError, got {:?}", other),
        }
    });
}

#[test]
fn test_auto_backup_setting_drives_profile_apply() {
    let root = TempDir::new().unwrap();
    with_home_env(&root, || {
        let config_file = root.path().join("settle.toml");
        std::fs::write(
            &config_file,
            format!(
                r#"
[paths]
desktop_settings = "{0}/desktop.json"
mcp_registry = "{0}/mcp.json"
code_settings = "{0}/code.json"
backup_root = "{0}/backups"

[backup]
auto_backup = false
"#,
                root.path().display()
            ),
        )
        .unwrap();

        let ctx = RunContext::new(Some(config_file)).unwrap();
        let output = ctx
            .execute(&Commands::Profile {
                command: ProfileCommands::Apply {
                    name: "minimal".to_string(),
                    no_backup: false,
                    yes: true,
                    format: "text".to_string(),
                },
            })
            .unwrap();

        assert!(output.contains("Applied profile 'minimal'"));
        assert!(!output.contains("Backup taken"));
        assert!(ctx.service().list_backups().unwrap().backups.is_empty());
    });
}
