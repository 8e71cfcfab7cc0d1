//! CLI presentation: text and json formatters per command family.

mod backup;
mod doctor;
mod env;
mod hooks;
mod mcp;
mod profile;
mod settings;
mod shared;

pub use backup::{
    format_backup_create_text, format_backup_list_json, format_backup_list_text,
    format_restore_result_text,
};
pub use doctor::{format_doctor_report_json, format_doctor_report_text};
pub use env::{format_env_list_json, format_env_list_text};
pub use hooks::{
    format_hooks_list_json, format_hooks_list_text, format_presets_json, format_presets_text,
};
pub use mcp::{format_mcp_add_text, format_mcp_list_json, format_mcp_list_text};
pub use profile::{
    format_apply_result_json, format_apply_result_text, format_profile_list_json,
    format_profile_list_text, format_profile_show_json, format_profile_show_text,
};
pub use settings::{
    format_get_result_json, format_get_result_text, format_set_result_text,
    format_settings_show_json, format_settings_show_text,
};
pub use shared::{format_paths_report_json, format_paths_report_text, format_section_heading};
