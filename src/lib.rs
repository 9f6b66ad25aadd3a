//! wp-sac: WordPress export to SacItem conversion
//!
//! Reads the JSON rendering of a WordPress XML export, validates and cleans
//! it, rebuilds the post hierarchy under synthetic uids and writes one
//! record per post for a downstream content system.

pub mod cleaning;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod projector;
pub mod sac;
pub mod serialized;
pub mod slug;
pub mod tooling;
pub mod types;

pub use error::ApiError;
pub use pipeline::{convert, run, Conversion, RunReport};
