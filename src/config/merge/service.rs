//! MergeService: orchestrates sources, applies precedence, deserializes to SacConfig.

use crate::config::sources::{environment, file};
use crate::config::{SacConfig, DEFAULT_CONFIG_FILE};
use config::{Config, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the standard sources.
    /// Precedence: serde defaults (lowest) -> `wp-sac.toml` in `base_dir` -> environment (highest).
    pub fn load(base_dir: &Path) -> Result<SacConfig, ConfigError> {
        let builder = Config::builder();
        let builder = file::add_to_builder(builder, &base_dir.join(DEFAULT_CONFIG_FILE), false)?;
        let builder = environment::add_to_builder(builder)?;

        Self::finish(builder.build()?)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<SacConfig, ConfigError> {
        let builder = Config::builder();
        let builder = file::add_to_builder(builder, path, true)?;
        let builder = environment::add_to_builder(builder)?;

        Self::finish(builder.build()?)
    }

    fn finish(config: Config) -> Result<SacConfig, ConfigError> {
        let config: SacConfig = config.try_deserialize()?;
        config.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }
}
