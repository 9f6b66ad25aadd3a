//! Export fixtures shaped like the XML-to-JSON rendering of a WordPress export.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use wp_sac::config::SacConfig;

/// Raw `<item>` with the fields every item carries.
pub fn raw_item(id: i64, parent: i64, post_type: &str, pub_date: &str) -> Value {
    json!({
        "title": {"__cdata": format!("Post {}", id)},
        "link": format!("https://example.com/?p={}", id),
        "pubDate": pub_date,
        "encoded": [{"__cdata": format!("<p>Body {}</p>", id)}, {"__cdata": ""}],
        "guid": format!("https://example.com/?p={}", id),
        "post_id": id,
        "post_parent": parent,
        "post_type": {"__cdata": post_type},
        "category": [{"__cdata": "Travel"}],
        "tag": [],
        "postmeta": []
    })
}

/// Wrap items in an `rss.channel` with a valid author and no terms.
pub fn export(items: Vec<Value>) -> Value {
    json!({
        "rss": {
            "channel": {
                "title": "Field Notes",
                "link": "https://example.com",
                "description": "Photos and posts",
                "author": {
                    "author_id": 1,
                    "author_login": {"__cdata": "editor"},
                    "author_email": {"__cdata": "editor@example.com"},
                    "author_display_name": {"__cdata": "Editor"}
                },
                "category": [{
                    "term_id": 3,
                    "category_nicename": {"__cdata": "travel"},
                    "category_parent": {"__cdata": ""},
                    "cat_name": {"__cdata": "Travel"}
                }],
                "tag": [],
                "item": items
            }
        }
    })
}

/// The three-post example: 1 at top level, 2 and 3 its children.
pub fn family() -> Vec<Value> {
    vec![
        raw_item(1, 0, "post", "Sun, 01 Jan 2023 10:00:00 +0000"),
        raw_item(2, 1, "post", "Thu, 01 Jun 2023 10:00:00 +0000"),
        raw_item(3, 1, "post", "Wed, 01 Mar 2023 10:00:00 +0000"),
    ]
}

/// Write `export` to `<dir>/export.json` and return a config pointing at it
/// with output in `<dir>/out`.
pub fn config_for(dir: &Path, export: &Value) -> SacConfig {
    let input = dir.join("export.json");
    fs::write(&input, serde_json::to_string(export).unwrap()).unwrap();
    SacConfig {
        input,
        output_dir: dir.join("out"),
        ..SacConfig::default()
    }
}

pub fn read_json(path: PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
