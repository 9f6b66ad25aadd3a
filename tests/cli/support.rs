use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_export(dir: &Path, items: Value) -> PathBuf {
    let export = json!({
        "rss": {
            "channel": {
                "title": "Field Notes",
                "link": "https://example.com",
                "description": "",
                "author": {
                    "author_id": 1,
                    "author_login": {"__cdata": "editor"},
                    "author_email": {"__cdata": "editor@example.com"},
                    "author_display_name": {"__cdata": "Editor"}
                },
                "category": [],
                "tag": [],
                "item": items
            }
        }
    });
    let path = dir.join("export.json");
    fs::write(&path, serde_json::to_string_pretty(&export).unwrap()).unwrap();
    path
}

pub fn post(id: i64, parent: i64, link: &str) -> Value {
    json!({
        "title": {"__cdata": format!("Post {}", id)},
        "link": link,
        "pubDate": "Sun, 01 Jan 2023 10:00:00 +0000",
        "guid": format!("https://example.com/?p={}", id),
        "post_id": id,
        "post_parent": parent,
        "post_type": {"__cdata": "post"}
    })
}
