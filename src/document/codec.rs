//! BOM-tolerant JSON codec with atomic writes.
//!
//! Decoding accepts a leading UTF-8 byte-order mark and requires a JSON
//! object at the top level. Encoding produces 2-space indented UTF-8
//! without BOM and exactly one trailing newline. Writes go through a
//! temp-file-plus-rename sequence so an interrupted save leaves either the
//! old file or the new file on disk, never a partial one.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::document::{value_type_name, Document};
use crate::error::SettingsError;

/// Serializes writers so no two saves interleave within one process.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Loads a settings document. A missing file is an empty document, not an
/// error.
pub fn load(path: &Path) -> Result<Document, SettingsError> {
    if !path.exists() {
        debug!("Settings file {:?} does not exist, treating as empty", path);
        return Ok(Document::new());
    }
    decode_file(path)
}

/// Loads a settings document, failing if the file does not exist.
pub fn load_required(path: &Path) -> Result<Document, SettingsError> {
    if !path.exists() {
        return Err(SettingsError::FileNotFound(path.to_path_buf()));
    }
    decode_file(path)
}

fn decode_file(path: &Path) -> Result<Document, SettingsError> {
    let bytes = fs::read(path)?;
    decode(path, &bytes)
}

/// Decodes raw file bytes into a document.
pub fn decode(path: &Path, bytes: &[u8]) -> Result<Document, SettingsError> {
    let stripped = strip_bom(bytes);
    let value: Value =
        serde_json::from_slice(stripped).map_err(|e| SettingsError::MalformedDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SettingsError::MalformedDocument {
            path: path.to_path_buf(),
            reason: format!(
                "expected an object at the top level, found {}",
                value_type_name(&other)
            ),
        }),
    }
}

/// Encodes a document to its canonical file form.
pub fn encode(document: &Document) -> Result<String, SettingsError> {
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    Ok(out)
}

/// Atomically writes a document to `path`, creating parent directories as
/// needed.
pub fn save(path: &Path, document: &Document) -> Result<(), SettingsError> {
    let serialized = encode(document)?;
    write_atomic(path, serialized.as_bytes())
}

/// Writes raw bytes through the same atomic temp-plus-rename path as
/// [`save`]. Backup restore uses this to carry snapshot bytes over
/// verbatim.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SettingsError> {
    let _guard = WRITE_LOCK.lock();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SettingsError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to replace {:?}: {}", path, e),
        ))
    })?;

    debug!("Wrote settings file {:?}", path);
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}
