//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{
    BackupCommands, Cli, Commands, EnvCommands, HooksCommands, McpCommands, ProfileCommands,
    SettingsCommands,
};
pub use presentation::{
    format_apply_result_json, format_apply_result_text,
    format_backup_create_text, format_backup_list_json, format_backup_list_text,
    format_doctor_report_json, format_doctor_report_text,
    format_env_list_json, format_env_list_text,
    format_get_result_json, format_get_result_text,
    format_hooks_list_json, format_hooks_list_text,
    format_mcp_add_text, format_mcp_list_json, format_mcp_list_text,
    format_paths_report_json, format_paths_report_text,
    format_presets_json, format_presets_text,
    format_profile_list_json, format_profile_list_text,
    format_profile_show_json, format_profile_show_text,
    format_restore_result_text, format_set_result_text,
    format_settings_show_json, format_settings_show_text,
};
pub use route::RunContext;
