//! Configuration
//!
//! Layered run configuration: built-in defaults, an optional TOML file, then
//! `WP_SAC__*` environment variables. CLI flags are applied on top by the
//! caller.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::cleaning::IssuePolicy;
use crate::hierarchy::{HashedUid, RandomUid, UidGenerator, UidStrategy};
use crate::logging::LoggingConfig;
use crate::types::ROOT_UID;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "wp-sac.toml";

/// Longest uid suffix the hashed generator can fill from one digest.
pub const MAX_UID_LENGTH: usize = 24;

fn default_input() -> PathBuf {
    PathBuf::from("dev-only/sac-posts-xmltojson.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dev-products/json-data")
}

fn default_uid_prefix() -> String {
    "W".to_string()
}

fn default_uid_length() -> usize {
    5
}

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SacConfig {
    /// WordPress export JSON to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory receiving `root.json` and item files; cleared on every run
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Write one `<uid>.json` per item instead of a single `items.json`
    #[serde(default)]
    pub write_individual_items: bool,

    /// What to do with items that fail validation
    #[serde(default)]
    pub on_item_issue: IssuePolicy,

    #[serde(default)]
    pub uid: UidConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SacConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output_dir: default_output_dir(),
            write_individual_items: false,
            on_item_issue: IssuePolicy::default(),
            uid: UidConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SacConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.input.as_os_str().is_empty() {
            return Err("input path cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir cannot be empty".to_string());
        }
        self.uid.validate()
    }
}

/// Synthetic uid settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UidConfig {
    #[serde(default)]
    pub strategy: UidStrategy,

    #[serde(default = "default_uid_prefix")]
    pub prefix: String,

    /// Number of base-36 characters after the prefix
    #[serde(default = "default_uid_length")]
    pub length: usize,
}

impl Default for UidConfig {
    fn default() -> Self {
        Self {
            strategy: UidStrategy::default(),
            prefix: default_uid_prefix(),
            length: default_uid_length(),
        }
    }
}

impl UidConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.length == 0 || self.length > MAX_UID_LENGTH {
            return Err(format!(
                "uid.length must be between 1 and {}, got {}",
                MAX_UID_LENGTH, self.length
            ));
        }
        if self.prefix.is_empty() || self.prefix == ROOT_UID {
            return Err(format!("uid.prefix {:?} is not allowed", self.prefix));
        }
        Ok(())
    }

    pub fn generator(&self) -> Box<dyn UidGenerator> {
        match self.strategy {
            UidStrategy::Hashed => Box::new(HashedUid::new(self.prefix.clone(), self.length)),
            UidStrategy::Random => Box::new(RandomUid::new(self.prefix.clone(), self.length)),
        }
    }
}
