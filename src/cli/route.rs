//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::cli::command_name;
use crate::cli::parse::{
    BackupCommands, Commands, EnvCommands, HooksCommands, McpCommands, ProfileCommands,
    SettingsCommands,
};
use crate::config::{ConfigLoader, SettleConfig};
use crate::doctor::run_doctor;
use crate::document::DocumentKind;
use crate::error::SettingsError;
use crate::paths::SettingsPaths;
use crate::schema::McpServerEntry;
use crate::settings::SettingsService;

/// Runtime context for CLI execution: loaded config, resolved paths, and the
/// settings service facade. Built from an optional config path using ConfigLoader only.
pub struct RunContext {
    service: SettingsService,
    config: SettleConfig,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Create run context from an optional explicit config path.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, SettingsError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Self::from_config(config, config_path)
    }

    /// Create run context from an already loaded configuration.
    pub fn from_config(
        config: SettleConfig,
        config_path: Option<PathBuf>,
    ) -> Result<Self, SettingsError> {
        config.validate().map_err(|errors| {
            let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            SettingsError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                details.join("\n")
            ))
        })?;
        let paths = SettingsPaths::resolve_with(&config.paths)?;
        Ok(Self {
            service: SettingsService::new(paths),
            config,
            config_path,
        })
    }

    /// Reference to the underlying settings service.
    pub fn service(&self) -> &SettingsService {
        &self.service
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, SettingsError> {
        debug!(command = %command_name(command), "Executing command");
        match command {
            Commands::Settings { command } => self.handle_settings_command(command),
            Commands::Mcp { command } => self.handle_mcp_command(command),
            Commands::Backup { command } => self.handle_backup_command(command),
            Commands::Profile { command } => self.handle_profile_command(command),
            Commands::Env { command } => self.handle_env_command(command),
            Commands::Hooks { command } => self.handle_hooks_command(command),
            Commands::Doctor { fix, format } => self.handle_doctor(*fix, format),
            Commands::Paths { format } => self.handle_paths(format),
        }
    }

    fn handle_settings_command(
        &self,
        command: &SettingsCommands,
    ) -> Result<String, SettingsError> {
        match command {
            SettingsCommands::Show { code, mcp, format } => {
                let result = self.service.load_settings(document_kind(*code, *mcp))?;
                match format.as_str() {
                    "json" => Ok(super::format_settings_show_json(&result)),
                    _ => Ok(super::format_settings_show_text(&result)),
                }
            }
            SettingsCommands::Get {
                key,
                code,
                mcp,
                format,
            } => {
                let result = self.service.get_setting(document_kind(*code, *mcp), key)?;
                match format.as_str() {
                    "json" => Ok(super::format_get_result_json(&result)),
                    _ => Ok(super::format_get_result_text(&result)),
                }
            }
            SettingsCommands::Set {
                key,
                value,
                code,
                mcp,
            } => {
                let parsed = parse_value_arg(value);
                let result = self
                    .service
                    .set_setting(document_kind(*code, *mcp), key, parsed)?;
                Ok(super::format_set_result_text(&result))
            }
        }
    }

    fn handle_mcp_command(&self, command: &McpCommands) -> Result<String, SettingsError> {
        match command {
            McpCommands::List { format } => {
                let result = self.service.list_mcp_servers()?;
                match format.as_str() {
                    "json" => Ok(super::format_mcp_list_json(&result)),
                    _ => Ok(super::format_mcp_list_text(&result)),
                }
            }
            McpCommands::Add {
                name,
                command,
                args,
                env,
            } => {
                let env = parse_env_pairs(env)?;
                let mut entry = McpServerEntry::new(command.clone()).with_args(args.clone());
                if !env.is_empty() {
                    entry = entry.with_env(env);
                }
                let result = self.service.add_mcp_server(name, entry)?;
                Ok(super::format_mcp_add_text(&result))
            }
            McpCommands::Remove { name, force } => {
                if !*force && !confirm(format!("Remove MCP server '{}'?", name))? {
                    return Ok("Removal cancelled".to_string());
                }
                self.service.remove_mcp_server(name)?;
                Ok(format!("Removed MCP server '{}'", name))
            }
        }
    }

    fn handle_backup_command(&self, command: &BackupCommands) -> Result<String, SettingsError> {
        match command {
            BackupCommands::Create { name } => {
                let record = self.service.create_backup(name.as_deref())?;
                Ok(super::format_backup_create_text(&record))
            }
            BackupCommands::List { format } => {
                let result = self.service.list_backups()?;
                match format.as_str() {
                    "json" => Ok(super::format_backup_list_json(&result)),
                    _ => Ok(super::format_backup_list_text(&result)),
                }
            }
            BackupCommands::Restore { name, force } => {
                if !*force
                    && !confirm(format!("Restore backup '{}' over the live settings?", name))?
                {
                    return Ok("Restore cancelled".to_string());
                }
                let result = self.service.restore_backup(name)?;
                Ok(super::format_restore_result_text(&result))
            }
            BackupCommands::Delete { name, force } => {
                if !*force && !confirm(format!("Delete backup '{}'?", name))? {
                    return Ok("Deletion cancelled".to_string());
                }
                self.service.delete_backup(name)?;
                Ok(format!("Deleted backup '{}'", name))
            }
        }
    }

    fn handle_profile_command(&self, command: &ProfileCommands) -> Result<String, SettingsError> {
        match command {
            ProfileCommands::List { format } => {
                let profiles = self.service.list_profiles();
                match format.as_str() {
                    "json" => Ok(super::format_profile_list_json(&profiles)),
                    _ => Ok(super::format_profile_list_text(&profiles)),
                }
            }
            ProfileCommands::Show { name, format } => {
                let profile = self.service.show_profile(name)?;
                match format.as_str() {
                    "json" => Ok(super::format_profile_show_json(&profile)),
                    _ => Ok(super::format_profile_show_text(&profile)),
                }
            }
            ProfileCommands::Apply {
                name,
                no_backup,
                yes,
                format,
            } => {
                // Resolve first so unknown names fail before the prompt.
                let profile = self.service.show_profile(name)?;
                if !*yes
                    && !confirm(format!(
                        "Apply profile '{}' to your Claude settings?",
                        profile.name
                    ))?
                {
                    return Ok("Apply cancelled".to_string());
                }
                let auto_backup = !*no_backup && self.config.backup.auto_backup;
                let result = self.service.apply_profile(name, auto_backup)?;
                match format.as_str() {
                    "json" => Ok(super::format_apply_result_json(&result)),
                    _ => Ok(super::format_apply_result_text(&result)),
                }
            }
        }
    }

    fn handle_env_command(&self, command: &EnvCommands) -> Result<String, SettingsError> {
        match command {
            EnvCommands::List {
                show_secrets,
                format,
            } => {
                let result = self.service.list_env_vars()?;
                match format.as_str() {
                    "json" => Ok(super::format_env_list_json(&result, *show_secrets)),
                    _ => Ok(super::format_env_list_text(&result, *show_secrets)),
                }
            }
            EnvCommands::Get { key } => self.service.get_env_var(key),
            EnvCommands::Set { key, value } => {
                let result = self.service.set_env_var(key, value)?;
                if result.previous.is_some() {
                    Ok(format!("Updated {}", result.key))
                } else {
                    Ok(format!("Set {}", result.key))
                }
            }
            EnvCommands::Remove { key } => {
                self.service.remove_env_var(key)?;
                Ok(format!("Removed {}", key))
            }
        }
    }

    fn handle_hooks_command(&self, command: &HooksCommands) -> Result<String, SettingsError> {
        match command {
            HooksCommands::List { format } => {
                let result = self.service.list_hooks()?;
                match format.as_str() {
                    "json" => Ok(super::format_hooks_list_json(&result)),
                    _ => Ok(super::format_hooks_list_text(&result)),
                }
            }
            HooksCommands::Add { command, preset } => {
                let hook_command = match (command, preset) {
                    (Some(command), _) => command.clone(),
                    (None, Some(preset)) => crate::hooks::preset_command(preset)
                        .ok_or_else(|| SettingsError::Validation {
                            field: "preset".to_string(),
                            reason: format!(
                                "unknown preset '{}'. Run `settle hooks presets` to see the options.",
                                preset
                            ),
                        })?
                        .to_string(),
                    (None, None) => pick_preset_interactive()?,
                };
                let total = self.service.add_stop_hook(&hook_command)?;
                Ok(format!(
                    "Added Stop hook ({} configured):\n  {}",
                    total, hook_command
                ))
            }
            HooksCommands::Remove { index } => {
                let result = self.service.remove_stop_hook(*index)?;
                Ok(format!(
                    "Removed Stop hook {}:\n  {}",
                    result.index,
                    result.commands.join("\n  ")
                ))
            }
            HooksCommands::Clear { yes } => {
                if !*yes && !confirm("Remove all Stop hooks?".to_string())? {
                    return Ok("Clear cancelled".to_string());
                }
                let removed = self.service.clear_stop_hooks()?;
                if removed == 0 {
                    Ok("No Stop hooks to remove.".to_string())
                } else {
                    Ok(format!("Removed {} Stop hook(s)", removed))
                }
            }
            HooksCommands::Presets { format } => {
                let presets = crate::hooks::presets();
                match format.as_str() {
                    "json" => Ok(super::format_presets_json(presets)),
                    _ => Ok(super::format_presets_text(presets)),
                }
            }
        }
    }

    fn handle_doctor(&self, fix: bool, format: &str) -> Result<String, SettingsError> {
        let report = run_doctor(&self.service, fix);
        let rendered = match format {
            "json" => super::format_doctor_report_json(&report),
            _ => super::format_doctor_report_text(&report),
        };
        if report.has_failures() {
            Err(SettingsError::Diagnostics(rendered))
        } else {
            Ok(rendered)
        }
    }

    fn handle_paths(&self, format: &str) -> Result<String, SettingsError> {
        let report = self.service.paths_report();
        let config_file = self
            .config_path
            .clone()
            .or_else(crate::config::global_config_path);
        match format {
            "json" => Ok(super::format_paths_report_json(
                &report,
                config_file.as_deref(),
            )),
            _ => Ok(super::format_paths_report_text(
                &report,
                config_file.as_deref(),
            )),
        }
    }
}

/// Document targeted by the --code/--mcp flags. Desktop settings by default.
fn document_kind(code: bool, mcp: bool) -> DocumentKind {
    if mcp {
        DocumentKind::McpRegistry
    } else if code {
        DocumentKind::CodeSettings
    } else {
        DocumentKind::DesktopSettings
    }
}

/// CLI values are JSON first, bare strings second.
fn parse_value_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_env_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>, SettingsError> {
    let mut env = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                env.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(SettingsError::Validation {
                    field: "env".to_string(),
                    reason: format!("expected KEY=VALUE, got '{}'", pair),
                });
            }
        }
    }
    Ok(env)
}

fn confirm(prompt: String) -> Result<bool, SettingsError> {
    use dialoguer::Confirm;

    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| SettingsError::ConfigError(format!("Failed to get user input: {}", e)))
}

fn pick_preset_interactive() -> Result<String, SettingsError> {
    use dialoguer::Select;

    let presets = crate::hooks::presets();
    let names: Vec<&str> = presets.iter().map(|p| p.name).collect();
    let selection = Select::new()
        .with_prompt("Notification preset")
        .items(&names)
        .default(0)
        .interact()
        .map_err(|e| SettingsError::ConfigError(format!("Failed to get user input: {}", e)))?;
    Ok(presets[selection].command.to_string())
}
