//! Settings service: single entry point per CLI operation.
//!
//! Owns the load, merge, validate, backup, save workflow. The CLI parses
//! arguments, calls one method per variant, and formats the returned
//! result struct. Every write path validates the merged document first,
//! so a failure leaves the on-disk file set untouched.

use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::backup::{BackupRecord, BackupStore};
use crate::document::{codec, value_type_name, Document, DocumentKind};
use crate::error::SettingsError;
use crate::merge::{self, Conflict, KeyPath};
use crate::paths::SettingsPaths;
use crate::profile::{self, ProfileRegistry, SettingsProfile};
use crate::schema::{self, code, mcp};
use crate::schema::{HooksConfig, McpServerEntry, StopHook};

/// Result of showing one settings document.
#[derive(Debug, Clone)]
pub struct ShowSettingsResult {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub exists: bool,
    pub document: Document,
}

/// Result of reading a single setting.
#[derive(Debug, Clone)]
pub struct GetSettingResult {
    pub kind: DocumentKind,
    pub key: String,
    pub value: Value,
}

/// Result of writing a single setting.
#[derive(Debug, Clone)]
pub struct SetSettingResult {
    pub kind: DocumentKind,
    pub key: String,
    pub previous: Option<Value>,
    pub value: Value,
    pub file: PathBuf,
}

/// Result of listing the MCP server registry.
#[derive(Debug, Clone)]
pub struct McpListResult {
    pub path: PathBuf,
    pub servers: Vec<(String, McpServerEntry)>,
}

/// Result of registering an MCP server.
#[derive(Debug, Clone)]
pub struct McpAddResult {
    pub name: String,
    pub replaced: bool,
    pub entry: McpServerEntry,
}

/// Result of listing backups.
#[derive(Debug, Clone)]
pub struct BackupListResult {
    pub root: PathBuf,
    pub backups: Vec<BackupRecord>,
}

/// Result of restoring a backup.
#[derive(Debug, Clone)]
pub struct RestoreBackupResult {
    pub name: String,
    pub restored: Vec<DocumentKind>,
}

/// Per-document report of a profile application.
#[derive(Debug, Clone)]
pub struct DocumentMergeReport {
    pub kind: DocumentKind,
    pub file: PathBuf,
    pub changed_keys: Vec<String>,
    pub conflicts: Vec<Conflict>,
}

/// Result of applying a profile.
#[derive(Debug, Clone)]
pub struct ProfileApplyResult {
    pub profile: String,
    /// Name of the automatic pre-apply backup, when one was taken.
    pub backup: Option<String>,
    pub merges: Vec<DocumentMergeReport>,
}

/// One profile as listed.
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub name: String,
    pub description: String,
}

/// Result of listing managed environment variables.
#[derive(Debug, Clone)]
pub struct EnvListResult {
    pub vars: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct EnvSetResult {
    pub key: String,
    pub previous: Option<String>,
}

/// One configured Stop hook as listed.
#[derive(Debug, Clone)]
pub struct StopHookRow {
    pub index: usize,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HooksListResult {
    pub hooks: Vec<StopHookRow>,
}

#[derive(Debug, Clone)]
pub struct HookRemoveResult {
    pub index: usize,
    pub commands: Vec<String>,
    pub remaining: usize,
}

/// One resolved document location.
#[derive(Debug, Clone)]
pub struct PathEntry {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub exists: bool,
}

/// Result of the paths report.
#[derive(Debug, Clone)]
pub struct PathsReport {
    pub entries: Vec<PathEntry>,
    pub backup_root: PathBuf,
    pub backup_root_exists: bool,
}

const SENSITIVE_KEY_MARKERS: [&str; 4] = ["TOKEN", "SECRET", "KEY", "PASSWORD"];

/// Masks values whose key looks secret-bearing: at most the first ten
/// characters survive, short values are fully hidden.
pub fn mask_sensitive_value(key: &str, value: &str) -> String {
    let upper = key.to_uppercase();
    if !SENSITIVE_KEY_MARKERS.iter().any(|m| upper.contains(m)) {
        return value.to_string();
    }
    if value.chars().count() > 10 {
        let prefix: String = value.chars().take(10).collect();
        format!("{}...", prefix)
    } else {
        "***".to_string()
    }
}

/// The settings engine facade.
pub struct SettingsService {
    paths: SettingsPaths,
    backups: BackupStore,
    registry: ProfileRegistry,
}

impl SettingsService {
    pub fn new(paths: SettingsPaths) -> Self {
        Self::with_registry(paths, ProfileRegistry::builtin())
    }

    /// Builds a service over a custom profile table. Tests use this to
    /// inject fixed registries.
    pub fn with_registry(paths: SettingsPaths, registry: ProfileRegistry) -> Self {
        let backups = BackupStore::new(paths.clone());
        SettingsService {
            paths,
            backups,
            registry,
        }
    }

    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    // --- settings documents ---

    pub fn load_settings(&self, kind: DocumentKind) -> Result<ShowSettingsResult, SettingsError> {
        let path = self.paths.path_for(kind);
        let exists = path.exists();
        let document = codec::load(path)?;
        Ok(ShowSettingsResult {
            kind,
            path: path.to_path_buf(),
            exists,
            document,
        })
    }

    pub fn get_setting(
        &self,
        kind: DocumentKind,
        key: &str,
    ) -> Result<GetSettingResult, SettingsError> {
        let key_path = KeyPath::parse(key)?;
        let document = codec::load(self.paths.path_for(kind))?;
        let value = merge::get_path(&document, &key_path)
            .cloned()
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))?;
        Ok(GetSettingResult {
            kind,
            key: key.to_string(),
            value,
        })
    }

    pub fn set_setting(
        &self,
        kind: DocumentKind,
        key: &str,
        value: Value,
    ) -> Result<SetSettingResult, SettingsError> {
        let key_path = KeyPath::parse(key)?;
        let file = self.paths.path_for(kind);
        let document = codec::load(file)?;
        let previous = merge::get_path(&document, &key_path).cloned();

        let result = merge::shallow_set(&document, &key_path, value.clone())?;
        schema::validate(kind, &result.document)?;
        codec::save(file, &result.document)?;

        info!("Set {} in {}", key, kind);
        Ok(SetSettingResult {
            kind,
            key: key.to_string(),
            previous,
            value,
            file: file.to_path_buf(),
        })
    }

    // --- MCP server registry ---

    pub fn list_mcp_servers(&self) -> Result<McpListResult, SettingsError> {
        let path = &self.paths.mcp_registry;
        let document = codec::load(path)?;
        let servers = mcp::servers_in(&document)?;
        Ok(McpListResult {
            path: path.clone(),
            servers,
        })
    }

    pub fn add_mcp_server(
        &self,
        name: &str,
        entry: McpServerEntry,
    ) -> Result<McpAddResult, SettingsError> {
        if name.trim().is_empty() {
            return Err(SettingsError::Validation {
                field: "server name".to_string(),
                reason: "name is empty".to_string(),
            });
        }
        if entry.command.trim().is_empty() {
            return Err(SettingsError::Validation {
                field: "command".to_string(),
                reason: "command is empty".to_string(),
            });
        }

        let file = &self.paths.mcp_registry;
        let mut document = codec::load(file)?;
        let slot = document
            .entry(mcp::MCP_SERVERS_KEY.to_string())
            .or_insert_with(|| Value::Object(Document::new()));
        let replaced = match slot {
            Value::Object(servers) => servers
                .insert(name.to_string(), entry.to_value()?)
                .is_some(),
            other => {
                return Err(SettingsError::Validation {
                    field: mcp::MCP_SERVERS_KEY.to_string(),
                    reason: format!("expected an object, found {}", value_type_name(other)),
                });
            }
        };

        schema::validate(DocumentKind::McpRegistry, &document)?;
        codec::save(file, &document)?;

        info!("Registered MCP server '{}'", name);
        Ok(McpAddResult {
            name: name.to_string(),
            replaced,
            entry,
        })
    }

    pub fn remove_mcp_server(&self, name: &str) -> Result<(), SettingsError> {
        let file = &self.paths.mcp_registry;
        let mut document = codec::load(file)?;
        match document.get_mut(mcp::MCP_SERVERS_KEY) {
            Some(Value::Object(servers)) if servers.contains_key(name) => {
                servers.remove(name);
            }
            _ => return Err(SettingsError::ServerNotFound(name.to_string())),
        }
        schema::validate(DocumentKind::McpRegistry, &document)?;
        codec::save(file, &document)?;
        info!("Removed MCP server '{}'", name);
        Ok(())
    }

    // --- backups ---

    pub fn create_backup(&self, name: Option<&str>) -> Result<BackupRecord, SettingsError> {
        self.backups.create(name)
    }

    pub fn list_backups(&self) -> Result<BackupListResult, SettingsError> {
        Ok(BackupListResult {
            root: self.backups.root().to_path_buf(),
            backups: self.backups.list()?,
        })
    }

    pub fn restore_backup(&self, name: &str) -> Result<RestoreBackupResult, SettingsError> {
        let restored = self.backups.restore(name)?;
        Ok(RestoreBackupResult {
            name: name.to_string(),
            restored,
        })
    }

    pub fn delete_backup(&self, name: &str) -> Result<(), SettingsError> {
        self.backups.delete(name)
    }

    // --- profiles ---

    pub fn list_profiles(&self) -> Vec<ProfileSummary> {
        self.registry
            .iter()
            .map(|p| ProfileSummary {
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect()
    }

    pub fn show_profile(&self, name: &str) -> Result<SettingsProfile, SettingsError> {
        self.registry.require(name).map(Clone::clone)
    }

    /// Applies a profile through deep-merge. All merged documents are
    /// validated before anything is written; with `auto_backup` a
    /// `before_<profile>` snapshot is taken first.
    pub fn apply_profile(
        &self,
        name: &str,
        auto_backup: bool,
    ) -> Result<ProfileApplyResult, SettingsError> {
        let profile = self.registry.require(name)?;

        let desktop = codec::load(&self.paths.desktop_settings)?;
        let mcp_doc = codec::load(&self.paths.mcp_registry)?;
        let code_doc = codec::load(&self.paths.code_settings)?;
        let merges = profile::apply_to_documents(profile, &desktop, &mcp_doc, &code_doc);

        for (kind, result) in &merges {
            schema::validate(*kind, &result.document)?;
        }

        let backup = if auto_backup {
            let record = self
                .backups
                .create_unique(&format!("before_{}", profile.name))?;
            Some(record.name)
        } else {
            None
        };

        let mut reports = Vec::new();
        for (kind, result) in merges {
            let file = self.paths.path_for(kind);
            if result.changed() {
                codec::save(file, &result.document)?;
            }
            reports.push(DocumentMergeReport {
                kind,
                file: file.to_path_buf(),
                changed_keys: result.changed_keys.into_iter().collect(),
                conflicts: result.conflicts,
            });
        }

        info!("Applied profile '{}'", profile.name);
        Ok(ProfileApplyResult {
            profile: profile.name.clone(),
            backup,
            merges: reports,
        })
    }

    // --- environment variables (code settings) ---

    pub fn list_env_vars(&self) -> Result<EnvListResult, SettingsError> {
        let document = codec::load(&self.paths.code_settings)?;
        let settings = code::parse_code_settings(&document)?;
        Ok(EnvListResult {
            vars: settings.env.into_iter().collect(),
        })
    }

    pub fn get_env_var(&self, key: &str) -> Result<String, SettingsError> {
        let document = codec::load(&self.paths.code_settings)?;
        let settings = code::parse_code_settings(&document)?;
        settings
            .env
            .get(key)
            .cloned()
            .ok_or_else(|| SettingsError::KeyNotFound(format!("env.{}", key)))
    }

    pub fn set_env_var(&self, key: &str, value: &str) -> Result<EnvSetResult, SettingsError> {
        if key.trim().is_empty() {
            return Err(SettingsError::Validation {
                field: "env key".to_string(),
                reason: "key is empty".to_string(),
            });
        }

        let file = &self.paths.code_settings;
        let mut document = codec::load(file)?;
        let slot = document
            .entry(code::ENV_KEY.to_string())
            .or_insert_with(|| Value::Object(Document::new()));
        let previous = match slot {
            Value::Object(env) => env
                .insert(key.to_string(), Value::String(value.to_string()))
                .and_then(|v| v.as_str().map(str::to_string)),
            other => {
                return Err(SettingsError::Validation {
                    field: code::ENV_KEY.to_string(),
                    reason: format!("expected an object, found {}", value_type_name(other)),
                });
            }
        };

        schema::validate(DocumentKind::CodeSettings, &document)?;
        codec::save(file, &document)?;

        info!("Set env var {}", key);
        Ok(EnvSetResult {
            key: key.to_string(),
            previous,
        })
    }

    pub fn remove_env_var(&self, key: &str) -> Result<(), SettingsError> {
        let file = &self.paths.code_settings;
        let mut document = codec::load(file)?;
        match document.get_mut(code::ENV_KEY) {
            Some(Value::Object(env)) if env.contains_key(key) => {
                env.remove(key);
            }
            _ => return Err(SettingsError::KeyNotFound(format!("env.{}", key))),
        }
        schema::validate(DocumentKind::CodeSettings, &document)?;
        codec::save(file, &document)?;
        info!("Removed env var {}", key);
        Ok(())
    }

    // --- Stop hooks (code settings) ---

    pub fn list_hooks(&self) -> Result<HooksListResult, SettingsError> {
        let document = codec::load(&self.paths.code_settings)?;
        let settings = code::parse_code_settings(&document)?;
        let hooks = settings
            .hooks
            .stop
            .iter()
            .enumerate()
            .map(|(index, hook)| StopHookRow {
                index,
                commands: hook.hooks.iter().map(|h| h.command.clone()).collect(),
            })
            .collect();
        Ok(HooksListResult { hooks })
    }

    pub fn add_stop_hook(&self, command: &str) -> Result<usize, SettingsError> {
        if command.trim().is_empty() {
            return Err(SettingsError::Validation {
                field: "hook command".to_string(),
                reason: "command is empty".to_string(),
            });
        }

        let file = &self.paths.code_settings;
        let mut document = codec::load(file)?;
        let mut hooks = hooks_of(&document)?;
        hooks.stop.push(StopHook::single(command));
        store_hooks(&mut document, hooks.clone());

        schema::validate(DocumentKind::CodeSettings, &document)?;
        codec::save(file, &document)?;

        info!("Added Stop hook");
        Ok(hooks.stop.len())
    }

    pub fn remove_stop_hook(&self, index: usize) -> Result<HookRemoveResult, SettingsError> {
        let file = &self.paths.code_settings;
        let mut document = codec::load(file)?;
        let mut hooks = hooks_of(&document)?;
        if index >= hooks.stop.len() {
            return Err(SettingsError::Validation {
                field: "hook index".to_string(),
                reason: format!(
                    "no Stop hook at index {} ({} configured)",
                    index,
                    hooks.stop.len()
                ),
            });
        }
        let removed = hooks.stop.remove(index);
        let remaining = hooks.stop.len();
        store_hooks(&mut document, hooks);

        schema::validate(DocumentKind::CodeSettings, &document)?;
        codec::save(file, &document)?;

        info!("Removed Stop hook {}", index);
        Ok(HookRemoveResult {
            index,
            commands: removed.hooks.into_iter().map(|h| h.command).collect(),
            remaining,
        })
    }

    /// Removes every Stop hook. Returns how many were removed.
    pub fn clear_stop_hooks(&self) -> Result<usize, SettingsError> {
        let file = &self.paths.code_settings;
        let mut document = codec::load(file)?;
        let mut hooks = hooks_of(&document)?;
        let removed = hooks.stop.len();
        if removed == 0 {
            return Ok(0);
        }
        hooks.stop.clear();
        store_hooks(&mut document, hooks);

        schema::validate(DocumentKind::CodeSettings, &document)?;
        codec::save(file, &document)?;

        info!("Cleared {} Stop hook(s)", removed);
        Ok(removed)
    }

    // --- paths ---

    pub fn paths_report(&self) -> PathsReport {
        let entries = DocumentKind::ALL
            .iter()
            .map(|kind| {
                let path = self.paths.path_for(*kind);
                PathEntry {
                    kind: *kind,
                    path: path.to_path_buf(),
                    exists: path.exists(),
                }
            })
            .collect();
        PathsReport {
            entries,
            backup_root: self.paths.backup_root.clone(),
            backup_root_exists: self.paths.backup_root.is_dir(),
        }
    }
}

fn hooks_of(document: &Document) -> Result<HooksConfig, SettingsError> {
    match document.get(code::HOOKS_KEY) {
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(|e| SettingsError::Validation {
                field: code::HOOKS_KEY.to_string(),
                reason: e.to_string(),
            })
        }
        None => Ok(HooksConfig::default()),
    }
}

/// Writes the hooks object back, dropping the key entirely when nothing
/// is left under it.
fn store_hooks(document: &mut Document, hooks: HooksConfig) {
    if hooks.is_empty() {
        document.remove(code::HOOKS_KEY);
    } else if let Ok(value) = serde_json::to_value(&hooks) {
        document.insert(code::HOOKS_KEY.to_string(), value);
    }
}
