//! CLI Tooling
//!
//! Command-line interface for conversion runs, export validation and ad-hoc
//! decoding of serialized metadata.

use crate::cleaning::IssuePolicy;
use crate::config::{ConfigLoader, SacConfig};
use crate::error::ApiError;
use crate::hierarchy::UidStrategy;
use crate::logging::LoggingConfig;
use crate::pipeline;
use crate::serialized;
use crate::tooling::format::{format_check_report, format_run_report_text};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// wp-sac - WordPress export to SacItem converter
#[derive(Parser)]
#[command(name = "wp-sac")]
#[command(about = "Convert a WordPress export (XML-to-JSON) into hierarchy-aware SacItem files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides ./wp-sac.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging settings with command-line flags applied over `base`.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the export and write root.json plus item files
    Convert {
        /// Export JSON to read
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output directory (cleared before writing)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Write one <uid>.json per item instead of items.json
        #[arg(long)]
        individual: bool,
        /// Drop invalid items instead of aborting
        #[arg(long)]
        skip_invalid: bool,
        /// Use random instead of deterministic uids
        #[arg(long)]
        random_uids: bool,
    },
    /// Validate the export without writing anything
    Validate {
        /// Export JSON to read
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Decode one PHP-serialized value and print it as JSON
    Decode {
        /// Serialized text
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,
        /// Read the serialized text from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// CLI context for executing commands
pub struct CliContext {
    config: SacConfig,
}

impl CliContext {
    /// Load configuration from `config_path`, or from `./wp-sac.toml` and the
    /// environment when none is given.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(Path::new("."))?,
        };
        Ok(Self { config })
    }

    pub fn with_config(config: SacConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SacConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::Convert {
                input,
                output_dir,
                individual,
                skip_invalid,
                random_uids,
            } => {
                let mut config = self.config.clone();
                if let Some(input) = input {
                    config.input = input.clone();
                }
                if let Some(output_dir) = output_dir {
                    config.output_dir = output_dir.clone();
                }
                if *individual {
                    config.write_individual_items = true;
                }
                if *skip_invalid {
                    config.on_item_issue = IssuePolicy::Skip;
                }
                if *random_uids {
                    config.uid.strategy = UidStrategy::Random;
                }
                config.validate().map_err(ApiError::ConfigError)?;

                let report = pipeline::run(&config)?;
                Ok(format_run_report_text(&report, &config))
            }
            Commands::Validate { input, format } => {
                if format != "text" && format != "json" {
                    return Err(ApiError::ConfigError(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        format
                    )));
                }
                let input = input.as_deref().unwrap_or(&self.config.input);
                let report = pipeline::check(input)?;
                format_check_report(&report, format).map_err(|e| ApiError::json(input, e))
            }
            Commands::Decode { text, file } => {
                let text = match (text, file) {
                    (Some(text), _) => text.clone(),
                    (None, Some(path)) => {
                        std::fs::read_to_string(path).map_err(|e| ApiError::io(path, e))?
                    }
                    (None, None) => {
                        return Err(ApiError::ConfigError(
                            "decode needs serialized text or --file".to_string(),
                        ))
                    }
                };
                let value = serialized::decode_normalized(&text)?;
                serde_json::to_string_pretty(&value.into_json())
                    .map_err(|e| ApiError::json("<stdout>", e))
            }
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Convert { .. } => "convert",
        Commands::Validate { .. } => "validate",
        Commands::Decode { .. } => "decode",
    }
}
