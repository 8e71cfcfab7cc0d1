//! Maps domain errors to the strings the binary prints on stderr.

use crate::error::SettingsError;

/// Renders an error for the CLI boundary. Malformed documents get a
/// pointer to `settle doctor`, which locates and explains them.
pub fn map_error(e: &SettingsError) -> String {
    match e {
        SettingsError::MalformedDocument { .. } => {
            format!("{}\nRun `settle doctor` to inspect the settings files.", e)
        }
        _ => e.to_string(),
    }
}
