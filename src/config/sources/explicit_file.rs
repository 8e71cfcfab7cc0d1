//! Explicit config file source: the path handed to `--config`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::Path;

use crate::error::SettingsError;

/// Add an explicitly requested config file to the builder. Unlike the
/// global file, an explicit path must exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, SettingsError> {
    if !path.is_file() {
        return Err(SettingsError::FileNotFound(path.to_path_buf()));
    }
    let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    Ok(builder.add_source(File::from(canonical_path).required(true)))
}
