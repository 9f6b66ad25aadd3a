//! Item Projection
//!
//! Maps a cleaned item and its hierarchy node to a [`SacItem`].

use crate::cleaning::CleanWordPressItem;
use crate::hierarchy::HierarchyMap;
use crate::sac::{SacItem, Taxonomy, ORIGINAL_CATEGORY};
use crate::types::JsonObject;
use chrono::SecondsFormat;
use serde_json::Value;
use tracing::warn;

/// Postmeta key holding serialized attachment metadata.
pub const ATTACHMENT_METADATA_KEY: &str = "_wp_attachment_metadata";

/// Postmeta key copied through as `data.collection`.
pub const COLLECTION_KEY: &str = "collection";

/// Attachment metadata fields kept in `data.image`.
pub const IMAGE_FIELDS: [&str; 3] = ["width", "height", "file"];

/// Project one item. Returns `None` if the item has no node in `tree`.
pub fn project(item: &CleanWordPressItem, tree: &HierarchyMap) -> Option<SacItem> {
    let Some(node) = tree.get(item.post_id).filter(|node| !node.is_root()) else {
        warn!(post_id = item.post_id, "No identifier found for post id");
        return None;
    };

    let mut data = JsonObject::new();
    data.insert("type".to_string(), Value::String(item.post_type.clone()));

    let image = item
        .postmeta
        .get(ATTACHMENT_METADATA_KEY)
        .and_then(Value::as_object)
        .map(|metadata| pick(metadata, &IMAGE_FIELDS))
        .filter(|picked| !picked.is_empty());
    let image_object = image
        .as_ref()
        .and_then(|picked| picked.get("file"))
        .and_then(Value::as_str)
        .map(str::to_string);
    if let Some(image) = image {
        data.insert("image".to_string(), Value::Object(image));
    }

    if let Some(collection) = item.postmeta.get(COLLECTION_KEY).filter(|v| is_present(v)) {
        data.insert(COLLECTION_KEY.to_string(), collection.clone());
    }
    if !node.child_uids.is_empty() {
        data.insert("children".to_string(), node.child_uids.clone().into());
    }

    let mut category = Vec::with_capacity(item.category.len() + 1);
    category.push(ORIGINAL_CATEGORY.to_string());
    category.extend(item.category.iter().cloned());

    Some(SacItem {
        uid: node.uid.clone(),
        parent_uid: node.parent_uid.clone(),
        image_object,
        real_date: item.pub_date.map(|d| d.timestamp_millis()),
        real_date_original: item
            .pub_date
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        taxonomy: Taxonomy {
            category,
            tags: Vec::new(),
        },
        title: item.title.clone(),
        content: item.encoded.concat(),
        data,
    })
}

/// Copy the listed keys that exist in `source`, in `keys` order.
pub fn pick(source: &JsonObject, keys: &[&str]) -> JsonObject {
    keys.iter()
        .filter_map(|&key| source.get(key).map(|v| (key.to_string(), v.clone())))
        .collect()
}

/// Whether a metadata value carries anything worth copying.
///
/// Null, `false`, `0`, empty strings, empty arrays and empty objects do not.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
