//! Integration tests for the WordPress export to SacItem conversion

mod end_to_end;
mod hierarchy_invariants;
pub mod support;
