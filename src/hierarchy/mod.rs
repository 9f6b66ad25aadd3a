//! Post Hierarchy
//!
//! Rebuilds the parent/child tree of an export from flat `post_parent`
//! references and assigns every accepted post a synthetic uid.

pub mod builder;
pub mod node;
pub mod uid;

pub use builder::{build, build_from_items};
pub use node::{HierarchyMap, HierarchyNode};
pub use uid::{HashedUid, RandomUid, UidGenerator, UidStrategy};
