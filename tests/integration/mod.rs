//! Integration tests for the settle settings management system

mod backup_restore;
mod cli_bin;
mod config_integration;
mod doctor_checks;
mod profile_apply;
mod test_utils;
