//! Tooling
//!
//! Command-line surface over the conversion pipeline.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
