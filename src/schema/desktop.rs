//! Claude Desktop application settings.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::SettingsError;
use crate::schema::{expect_bool, expect_integer, expect_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopSettings {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_font_size")]
    pub font_size: i64,

    #[serde(default = "default_auto_update")]
    pub auto_update: bool,

    /// Fields this tool does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Document,
}

fn default_theme() -> String {
    "system".to_string()
}

fn default_font_size() -> i64 {
    14
}

fn default_auto_update() -> bool {
    true
}

impl Default for DesktopSettings {
    fn default() -> Self {
        DesktopSettings {
            theme: default_theme(),
            font_size: default_font_size(),
            auto_update: default_auto_update(),
            extra: Document::new(),
        }
    }
}

pub(crate) fn validate(document: &Document) -> Result<(), SettingsError> {
    expect_string(document, "theme")?;
    expect_integer(document, "fontSize")?;
    expect_bool(document, "autoUpdate")?;
    Ok(())
}
