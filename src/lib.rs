//! Settle: Claude Settings Management
//!
//! A settings management system for Claude Desktop and Claude Code that merges,
//! validates, backs up, and restores the JSON settings documents they share.

pub mod backup;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod document;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod merge;
pub mod paths;
pub mod profile;
pub mod schema;
pub mod settings;
