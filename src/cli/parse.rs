//! CLI parse: clap types for settle. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// settle CLI - Claude settings management
#[derive(Parser)]
#[command(name = "settle")]
#[command(about = "Manage Claude Desktop and Claude Code settings, MCP servers, backups, and profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Settings documents (show, get, set)
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// MCP server registry
    Mcp {
        #[command(subcommand)]
        command: McpCommands,
    },
    /// Settings backups
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
    /// Settings profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Claude Code environment variables
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },
    /// Claude Code Stop hooks
    Hooks {
        #[command(subcommand)]
        command: HooksCommands,
    },
    /// Check the settings environment for problems
    Doctor {
        /// Create missing directories
        #[arg(long)]
        fix: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the resolved settings file locations
    Paths {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show a settings document
    Show {
        /// Operate on Claude Code settings instead of desktop settings
        #[arg(long)]
        code: bool,
        /// Operate on the MCP registry document
        #[arg(long, conflicts_with = "code")]
        mcp: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Read a single setting by dotted key path
    Get {
        /// Key path, e.g. "theme" or "editor.fontSize"
        key: String,
        /// Operate on Claude Code settings instead of desktop settings
        #[arg(long)]
        code: bool,
        /// Operate on the MCP registry document
        #[arg(long, conflicts_with = "code")]
        mcp: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a single setting by dotted key path
    Set {
        /// Key path, e.g. "theme" or "editor.fontSize"
        key: String,
        /// New value, parsed as JSON with plain-string fallback
        value: String,
        /// Operate on Claude Code settings instead of desktop settings
        #[arg(long)]
        code: bool,
        /// Operate on the MCP registry document
        #[arg(long, conflicts_with = "code")]
        mcp: bool,
    },
}

#[derive(Subcommand)]
pub enum McpCommands {
    /// List registered MCP servers
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Register an MCP server (flags go before the server name)
    Add {
        /// Server name
        name: String,
        /// Command that launches the server
        command: String,
        /// Arguments passed to the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Environment variable for the server process (repeatable)
        #[arg(long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
    },
    /// Remove an MCP server
    Remove {
        /// Server name
        name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot all settings documents
    Create {
        /// Backup name (defaults to a timestamped name)
        name: Option<String>,
    },
    /// List backups, newest first
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Restore a backup over the live settings
    Restore {
        /// Backup name
        name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Delete a backup
    Delete {
        /// Backup name
        name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List available profiles
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the settings a profile carries
    Show {
        /// Profile name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Apply a profile to the settings documents
    Apply {
        /// Profile name
        name: String,
        /// Skip the automatic pre-apply backup
        #[arg(long)]
        no_backup: bool,
        /// Apply without confirmation
        #[arg(long)]
        yes: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum EnvCommands {
    /// List managed environment variables
    List {
        /// Show secret-bearing values unmasked
        #[arg(long)]
        show_secrets: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Read one environment variable
    Get {
        /// Variable name
        key: String,
    },
    /// Set an environment variable
    Set {
        /// Variable name
        key: String,
        /// Value
        value: String,
    },
    /// Remove an environment variable
    Remove {
        /// Variable name
        key: String,
    },
}

#[derive(Subcommand)]
pub enum HooksCommands {
    /// List configured Stop hooks
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add a Stop hook (omit the command to pick a preset interactively)
    Add {
        /// Shell command to run when Claude Code finishes
        command: Option<String>,
        /// Use a named notification preset instead of a command
        #[arg(long, conflicts_with = "command")]
        preset: Option<String>,
    },
    /// Remove a Stop hook by index (see `hooks list`)
    Remove {
        /// Hook index
        index: usize,
    },
    /// Remove all Stop hooks
    Clear {
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List notification presets for this platform
    Presets {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
