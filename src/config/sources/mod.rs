//! Config sources, lowest precedence first: file, environment.

pub mod environment;
pub mod file;
