//! Config loading facade: layered sources composed into `SettleConfig`.

use std::path::Path;

use config::Environment;
use tracing::debug;

use crate::config::{merge_policy, sources, SettleConfig};
use crate::error::SettingsError;

/// Loads the tool configuration from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence (lowest to highest): built-in defaults, the global
    /// config file, an explicit `--config` file, `SETTLE_*` environment
    /// variables. Nested keys use `__` in the environment, e.g.
    /// `SETTLE_LOGGING__LEVEL=debug` or `SETTLE_BACKUP__AUTO_BACKUP=false`.
    pub fn load(explicit: Option<&Path>) -> Result<SettleConfig, SettingsError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = sources::explicit_file::add_to_builder(builder, path)?;
        }
        builder = builder.add_source(
            Environment::with_prefix("SETTLE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let settle: SettleConfig = config.try_deserialize()?;
        debug!("Loaded configuration: {:?}", settle);
        Ok(settle)
    }
}
