//! Integration tests for the settle binary.
//!
//! Each test spawns the compiled CLI with HOME and XDG_CONFIG_HOME pointed
//! into a temp directory, so the managed documents resolve inside it.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn settle_command(temp_dir: &TempDir) -> Command {
    let home = temp_dir.path().join("home");
    let config_home = temp_dir.path().join("config");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&config_home).unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_settle"));
    command
        .env("HOME", home.as_os_str())
        .env("XDG_CONFIG_HOME", config_home.as_os_str())
        .env_remove("SETTLE_LOG")
        .env_remove("SETTLE_LOG_FORMAT")
        .env_remove("SETTLE_LOG_OUTPUT")
        .env_remove("SETTLE_LOG_MODULES");
    command
}

#[test]
fn test_paths_command_reports_resolved_locations() {
    let temp_dir = TempDir::new().unwrap();
    let output = settle_command(&temp_dir).arg("paths").output().unwrap();

    assert!(
        output.status.success(),
        "settle paths should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("settings.json"));
    assert!(stdout.contains("Claude"));
}

#[test]
fn test_settings_set_then_get_round_trip() {
    let temp_dir = TempDir::new().unwrap();

    let set = settle_command(&temp_dir)
        .args(["settings", "set", "theme", "dark"])
        .output()
        .unwrap();
    assert!(
        set.status.success(),
        "settings set should succeed: stderr={:?}",
        String::from_utf8_lossy(&set.stderr)
    );

    let get = settle_command(&temp_dir)
        .args(["settings", "get", "theme"])
        .output()
        .unwrap();
    assert!(get.status.success());
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "dark");
}

#[test]
fn test_doctor_exits_nonzero_on_malformed_document() {
    let temp_dir = TempDir::new().unwrap();
    let claude_dir = temp_dir.path().join("config").join("Claude");
    fs::create_dir_all(&claude_dir).unwrap();
    fs::write(claude_dir.join("settings.json"), b"{ not json").unwrap();

    let output = settle_command(&temp_dir).arg("doctor").output().unwrap();

    assert!(
        !output.status.success(),
        "doctor should fail on a malformed document"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("issue(s) found"),
        "stderr should carry the report: {}",
        stderr
    );
}

#[test]
fn test_mcp_add_then_json_list() {
    let temp_dir = TempDir::new().unwrap();

    let add = settle_command(&temp_dir)
        .args([
            "mcp",
            "add",
            "--env",
            "GITHUB_TOKEN=secret",
            "github",
            "npx",
            "-y",
            "@modelcontextprotocol/server-github",
        ])
        .output()
        .unwrap();
    assert!(
        add.status.success(),
        "mcp add should succeed: stderr={:?}",
        String::from_utf8_lossy(&add.stderr)
    );

    let list = settle_command(&temp_dir)
        .args(["mcp", "list", "--format", "json"])
        .output()
        .unwrap();
    assert!(list.status.success());

    let listed: serde_json::Value =
        serde_json::from_slice(&list.stdout).expect("mcp list --format json emits JSON");
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["servers"][0]["name"], "github");
    assert_eq!(listed["servers"][0]["command"], "npx");
    // Values of environment variables never appear in the listing.
    assert_eq!(listed["servers"][0]["env_keys"][0], "GITHUB_TOKEN");
    assert!(!String::from_utf8_lossy(&list.stdout).contains("secret"));
}

#[test]
fn test_unknown_profile_reports_error_and_nonzero_exit() {
    let temp_dir = TempDir::new().unwrap();
    let output = settle_command(&temp_dir)
        .args(["profile", "apply", "ghost", "--yes"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ghost"),
        "stderr should name the unknown profile: {}",
        stderr
    );
}

#[test]
fn test_verbose_emits_logs_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let output = settle_command(&temp_dir)
        .args(["--verbose", "paths"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "settle --verbose paths should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.trim().is_empty(),
        "verbose mode should emit logs to stderr"
    );
    // Command results still arrive on stdout.
    assert!(String::from_utf8_lossy(&output.stdout).contains("settings.json"));
}

#[test]
fn test_quiet_by_default_keeps_stderr_empty() {
    let temp_dir = TempDir::new().unwrap();
    let output = settle_command(&temp_dir).arg("paths").output().unwrap();

    assert!(output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).trim().is_empty(),
        "without --verbose no logs should reach stderr"
    );
}
