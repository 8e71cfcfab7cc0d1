//! Environment diagnostics for `settle doctor`.
//!
//! Produces a check-by-check report over the managed documents, the
//! backup store, and the registered MCP server commands. With `fix`
//! enabled the missing directories are created on the spot; everything
//! else is only reported.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::document::{codec, DocumentKind};
use crate::error::SettingsError;
use crate::schema::{self, mcp};
use crate::settings::SettingsService;

/// Outcome of a single diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

/// One diagnostic check with its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

/// Size census of the backup store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupCensus {
    pub count: usize,
    pub total_bytes: u64,
}

/// The full diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
    pub backups: BackupCensus,
    /// Directories created because `fix` was requested.
    pub fixed: Vec<PathBuf>,
}

impl DoctorReport {
    /// Number of checks that did not come back clean.
    pub fn issues(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status != CheckStatus::Ok)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }
}

/// Runs every diagnostic check against the resolved settings locations.
pub fn run_doctor(service: &SettingsService, fix: bool) -> DoctorReport {
    let mut checks = Vec::new();
    let mut fixed = Vec::new();

    if fix {
        fix_directories(service, &mut fixed);
    }

    for kind in DocumentKind::ALL {
        checks.push(check_document(service, kind));
    }
    checks.extend(check_server_commands(service));

    let census = backup_census(service);
    checks.push(check_backup_store(service, fix));
    checks.push(DoctorCheck {
        name: "backup census".to_string(),
        status: CheckStatus::Ok,
        detail: format!(
            "{} backup(s), {} bytes on disk",
            census.count, census.total_bytes
        ),
    });
    checks.push(check_stop_hooks(service));

    DoctorReport {
        checks,
        backups: census,
        fixed,
    }
}

fn check_document(service: &SettingsService, kind: DocumentKind) -> DoctorCheck {
    let path = service.paths().path_for(kind);
    let name = kind.label().to_string();
    if !path.exists() {
        return DoctorCheck {
            name,
            status: CheckStatus::Ok,
            detail: "not present yet (treated as empty)".to_string(),
        };
    }
    let document = match codec::load(path) {
        Ok(document) => document,
        Err(e) => {
            return DoctorCheck {
                name,
                status: CheckStatus::Fail,
                detail: e.to_string(),
            };
        }
    };
    if let Err(e) = schema::validate(kind, &document) {
        return DoctorCheck {
            name,
            status: CheckStatus::Fail,
            detail: e.to_string(),
        };
    }
    DoctorCheck {
        name,
        status: CheckStatus::Ok,
        detail: format!("valid, {} top-level key(s)", document.len()),
    }
}

fn check_server_commands(service: &SettingsService) -> Vec<DoctorCheck> {
    let registry_path = &service.paths().mcp_registry;
    let document = match codec::load(registry_path) {
        Ok(document) => document,
        // Malformed registry is already reported by the document check.
        Err(_) => return Vec::new(),
    };
    let servers = match mcp::servers_in(&document) {
        Ok(servers) => servers,
        Err(_) => return Vec::new(),
    };
    if servers.is_empty() {
        return vec![DoctorCheck {
            name: "MCP server commands".to_string(),
            status: CheckStatus::Ok,
            detail: "no servers configured".to_string(),
        }];
    }

    servers
        .into_iter()
        .map(|(name, entry)| match find_in_path(&entry.command) {
            Some(found) => DoctorCheck {
                name: format!("mcp server '{}'", name),
                status: CheckStatus::Ok,
                detail: format!("command found: {}", found.display()),
            },
            None => DoctorCheck {
                name: format!("mcp server '{}'", name),
                status: CheckStatus::Warn,
                detail: format!("command not found on PATH: {}", entry.command),
            },
        })
        .collect()
}

fn check_backup_store(service: &SettingsService, fix: bool) -> DoctorCheck {
    let root = service.backups().root();
    let name = "backup store".to_string();
    if !root.is_dir() {
        let detail = if fix {
            "missing and could not be created".to_string()
        } else {
            format!("missing: {} (run with --fix to create)", root.display())
        };
        return DoctorCheck {
            name,
            status: CheckStatus::Warn,
            detail,
        };
    }

    // Writability probe; backups are useless if snapshots cannot land.
    let probe = root.join(".doctor-probe");
    match std::fs::write(&probe, b"probe") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            DoctorCheck {
                name,
                status: CheckStatus::Ok,
                detail: format!("writable: {}", root.display()),
            }
        }
        Err(e) => DoctorCheck {
            name,
            status: CheckStatus::Fail,
            detail: format!("not writable: {}", e),
        },
    }
}

fn check_stop_hooks(service: &SettingsService) -> DoctorCheck {
    let name = "Stop hooks".to_string();
    match service.list_hooks() {
        Ok(listed) if listed.hooks.is_empty() => DoctorCheck {
            name,
            status: CheckStatus::Ok,
            detail: "no Stop hooks configured".to_string(),
        },
        Ok(listed) => DoctorCheck {
            name,
            status: CheckStatus::Ok,
            detail: format!("{} Stop hook(s) configured", listed.hooks.len()),
        },
        Err(e) => DoctorCheck {
            name,
            status: CheckStatus::Fail,
            detail: e.to_string(),
        },
    }
}

fn backup_census(service: &SettingsService) -> BackupCensus {
    let root = service.backups().root();
    if !root.is_dir() {
        return BackupCensus::default();
    }
    let count = service
        .backups()
        .list()
        .map(|backups| backups.len())
        .unwrap_or(0);
    let total_bytes = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum();
    BackupCensus { count, total_bytes }
}

fn fix_directories(service: &SettingsService, fixed: &mut Vec<PathBuf>) {
    let paths = service.paths();
    let mut targets: Vec<PathBuf> = Vec::new();
    for kind in DocumentKind::ALL {
        if let Some(parent) = paths.path_for(kind).parent() {
            targets.push(parent.to_path_buf());
        }
    }
    targets.push(paths.backup_root.clone());

    for target in targets {
        if target.as_os_str().is_empty() || target.is_dir() {
            continue;
        }
        match std::fs::create_dir_all(&target) {
            Ok(()) => {
                info!("Created {}", target.display());
                fixed.push(target);
            }
            Err(e) => debug!("Could not create {}: {}", target.display(), e),
        }
    }
}

/// Resolves a command the way the shell would: absolute and relative
/// paths are checked directly, bare names are searched on PATH.
pub fn find_in_path(command: &str) -> Option<PathBuf> {
    let direct = Path::new(command);
    if direct.components().count() > 1 || direct.is_absolute() {
        return direct.is_file().then(|| direct.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        for candidate in command_candidates(&dir, command) {
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn command_candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    let mut candidates = vec![dir.join(command)];
    for ext in ["exe", "cmd", "bat"] {
        candidates.push(dir.join(format!("{}.{}", command, ext)));
    }
    candidates
}

#[cfg(not(windows))]
fn command_candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    vec![dir.join(command)]
}
