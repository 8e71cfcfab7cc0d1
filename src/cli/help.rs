//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{
    BackupCommands, Commands, EnvCommands, HooksCommands, McpCommands, ProfileCommands,
    SettingsCommands,
};

/// Command name string for logs (e.g. "settings.set", "backup.restore").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Settings { command } => format!("settings.{}", settings_command_name(command)),
        Commands::Mcp { command } => format!("mcp.{}", mcp_command_name(command)),
        Commands::Backup { command } => format!("backup.{}", backup_command_name(command)),
        Commands::Profile { command } => format!("profile.{}", profile_command_name(command)),
        Commands::Env { command } => format!("env.{}", env_command_name(command)),
        Commands::Hooks { command } => format!("hooks.{}", hooks_command_name(command)),
        Commands::Doctor { .. } => "doctor".to_string(),
        Commands::Paths { .. } => "paths".to_string(),
    }
}

pub fn settings_command_name(command: &SettingsCommands) -> &'static str {
    match command {
        SettingsCommands::Show { .. } => "show",
        SettingsCommands::Get { .. } => "get",
        SettingsCommands::Set { .. } => "set",
    }
}

pub fn mcp_command_name(command: &McpCommands) -> &'static str {
    match command {
        McpCommands::List { .. } => "list",
        McpCommands::Add { .. } => "add",
        McpCommands::Remove { .. } => "remove",
    }
}

pub fn backup_command_name(command: &BackupCommands) -> &'static str {
    match command {
        BackupCommands::Create { .. } => "create",
        BackupCommands::List { .. } => "list",
        BackupCommands::Restore { .. } => "restore",
        BackupCommands::Delete { .. } => "delete",
    }
}

pub fn profile_command_name(command: &ProfileCommands) -> &'static str {
    match command {
        ProfileCommands::List { .. } => "list",
        ProfileCommands::Show { .. } => "show",
        ProfileCommands::Apply { .. } => "apply",
    }
}

pub fn env_command_name(command: &EnvCommands) -> &'static str {
    match command {
        EnvCommands::List { .. } => "list",
        EnvCommands::Get { .. } => "get",
        EnvCommands::Set { .. } => "set",
        EnvCommands::Remove { .. } => "remove",
    }
}

pub fn hooks_command_name(command: &HooksCommands) -> &'static str {
    match command {
        HooksCommands::List { .. } => "list",
        HooksCommands::Add { .. } => "add",
        HooksCommands::Remove { .. } => "remove",
        HooksCommands::Clear { .. } => "clear",
        HooksCommands::Presets { .. } => "presets",
    }
}
