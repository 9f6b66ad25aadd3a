//! SacItem output records

use crate::hierarchy::HierarchyNode;
use crate::types::{JsonObject, Uid};
use serde::{Deserialize, Serialize};

/// Category tag prepended to every item's categories.
pub const ORIGINAL_CATEGORY: &str = "original";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub category: Vec<String>,
    /// Always empty for now
    pub tags: Vec<String>,
}

/// One converted post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SacItem {
    pub uid: Uid,
    pub parent_uid: Option<Uid>,
    pub image_object: Option<String>,
    /// Publish time in epoch milliseconds
    pub real_date: Option<i64>,
    /// Publish time as ISO-8601 with milliseconds, UTC
    pub real_date_original: Option<String>,
    pub taxonomy: Taxonomy,
    pub title: String,
    pub content: String,
    pub data: JsonObject,
}

impl SacItem {
    pub fn set_slug(&mut self, slug: String) {
        self.data.insert("slug".to_string(), slug.into());
    }

    pub fn slug(&self) -> Option<&str> {
        self.data.get("slug").and_then(|v| v.as_str())
    }
}

/// Manifest of top-level uids in display order (`root.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SacItemRootType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uids: Option<Vec<Uid>>,
}

/// Per-item file written when individual output is enabled (`<uid>.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub slug: Option<String>,
    pub data: SacItem,
    pub uids: Option<HierarchyNode>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}
