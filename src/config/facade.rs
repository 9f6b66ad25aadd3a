//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::SacConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `wp-sac.toml` in `base_dir` (if present) and environment.
    pub fn load(base_dir: &Path) -> Result<SacConfig, ConfigError> {
        MergeService::load(base_dir)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<SacConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> SacConfig {
        SacConfig::default()
    }
}
