//! Core types for the WordPress → SacItem conversion.

/// PostId: original numeric WordPress post id (`wp:post_id`)
pub type PostId = i64;

/// Uid: synthetic identifier assigned to every accepted post
pub type Uid = String;

/// JsonObject: ordered string-keyed JSON mapping
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Post id of the synthetic root node
pub const ROOT_ID: PostId = 0;

/// Uid of the synthetic root node
pub const ROOT_UID: &str = "root";

/// Post types that take part in the hierarchy and the output.
pub const ACCEPTED_TYPES: [&str; 4] = ["post", "page", "attachment", "custom_css"];

/// Whether a post type is on the accepted list.
pub fn is_accepted_type(post_type: &str) -> bool {
    ACCEPTED_TYPES.contains(&post_type)
}
