//! Typed models and validation for the managed documents.
//!
//! Each document kind has a typed struct whose known fields carry defaults
//! and whose unknown fields flow through a flattened open map, so nothing
//! a user (or the host application) wrote is ever dropped. Validation runs
//! against the raw document after a merge and strictly before a save, so a
//! type error on a recognized field leaves the on-disk file untouched.

pub mod code;
pub mod desktop;
pub mod mcp;

use serde_json::Value;

pub use code::{CodeSettings, HookCommand, HooksConfig, StopHook};
pub use desktop::DesktopSettings;
pub use mcp::McpServerEntry;

use crate::document::{value_type_name, Document, DocumentKind};
use crate::error::SettingsError;

/// Validates the recognized fields of a document. Unknown fields are
/// always acceptable.
pub fn validate(kind: DocumentKind, document: &Document) -> Result<(), SettingsError> {
    match kind {
        DocumentKind::DesktopSettings => desktop::validate(document),
        DocumentKind::McpRegistry => mcp::validate_registry(document),
        DocumentKind::CodeSettings => code::validate(document),
    }
}

fn type_error(field: &str, expected: &str, found: &Value) -> SettingsError {
    SettingsError::Validation {
        field: field.to_string(),
        reason: format!("expected {}, found {}", expected, value_type_name(found)),
    }
}

pub(crate) fn expect_string(document: &Document, field: &str) -> Result<(), SettingsError> {
    match document.get(field) {
        None | Some(Value::String(_)) => Ok(()),
        Some(other) => Err(type_error(field, "a string", other)),
    }
}

pub(crate) fn expect_integer(document: &Document, field: &str) -> Result<(), SettingsError> {
    match document.get(field) {
        None => Ok(()),
        Some(Value::Number(n)) if n.is_i64() => Ok(()),
        Some(other) => Err(type_error(field, "an integer", other)),
    }
}

pub(crate) fn expect_bool(document: &Document, field: &str) -> Result<(), SettingsError> {
    match document.get(field) {
        None | Some(Value::Bool(_)) => Ok(()),
        Some(other) => Err(type_error(field, "a boolean", other)),
    }
}

pub(crate) fn expect_string_array(document: &Document, field: &str) -> Result<(), SettingsError> {
    match document.get(field) {
        None => Ok(()),
        Some(Value::Array(items)) => {
            for item in items {
                if !item.is_string() {
                    return Err(type_error(field, "an array of strings", item));
                }
            }
            Ok(())
        }
        Some(other) => Err(type_error(field, "an array of strings", other)),
    }
}

pub(crate) fn expect_string_map(document: &Document, field: &str) -> Result<(), SettingsError> {
    match document.get(field) {
        None => Ok(()),
        Some(Value::Object(map)) => {
            for (key, value) in map {
                if !value.is_string() {
                    return Err(type_error(
                        &format!("{}.{}", field, key),
                        "a string",
                        value,
                    ));
                }
            }
            Ok(())
        }
        Some(other) => Err(type_error(field, "an object of strings", other)),
    }
}
