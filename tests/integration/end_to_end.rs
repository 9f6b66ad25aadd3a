use std::fs;

use serde_json::json;
use tempfile::TempDir;
use wp_sac::cleaning::IssuePolicy;
use wp_sac::pipeline::run;
use wp_sac::ApiError;

use crate::integration::support::{config_for, export, family, file_names, raw_item, read_json};

#[test]
fn family_example_builds_expected_tree() {
    let temp = TempDir::new().unwrap();
    let config = config_for(temp.path(), &export(family()));

    let report = run(&config).unwrap();
    assert_eq!(report.total_items, 3);
    assert_eq!(report.projected, 3);
    assert_eq!(report.orphans, 0);
    assert_eq!(report.files_written, 2);
    assert_eq!(file_names(&config.output_dir), vec!["items.json", "root.json"]);

    let items = read_json(config.output_dir.join("items.json"));
    let items = items.as_array().unwrap();
    let uid = |i: usize| items[i]["uid"].as_str().unwrap().to_string();

    let root = read_json(config.output_dir.join("root.json"));
    assert_eq!(root, json!({ "uids": [uid(0)] }));

    assert_eq!(items[0]["data"]["children"], json!([uid(1), uid(2)]));
    assert_eq!(items[0]["parentUid"], json!("root"));
    assert_eq!(items[1]["parentUid"], json!(uid(0)));
    assert_eq!(items[2]["parentUid"], json!(uid(0)));
    assert!(items[1]["data"].get("children").is_none());
}

#[test]
fn projected_fields_follow_output_format() {
    let temp = TempDir::new().unwrap();
    let config = config_for(temp.path(), &export(family()));
    run(&config).unwrap();

    let items = read_json(config.output_dir.join("items.json"));
    let first = &items[0];
    assert_eq!(first["title"], json!("Post 1"));
    assert_eq!(first["content"], json!("<p>Body 1</p>"));
    assert_eq!(first["realDate"], json!(1_672_567_200_000_i64));
    assert_eq!(first["realDateOriginal"], json!("2023-01-01T10:00:00.000Z"));
    assert_eq!(first["imageObject"], json!(null));
    assert_eq!(first["taxonomy"], json!({"category": ["original", "Travel"], "tags": []}));
    assert_eq!(first["data"]["type"], json!("post"));
    assert_eq!(first["data"]["slug"], json!("post-1"));
}

#[test]
fn unsupported_types_are_left_out() {
    let temp = TempDir::new().unwrap();
    let mut items = family();
    items.push(raw_item(4, 1, "nav_menu_item", ""));
    items.push(raw_item(5, 0, "revision", ""));
    let config = config_for(temp.path(), &export(items));

    let report = run(&config).unwrap();
    assert_eq!(report.total_items, 5);
    assert_eq!(report.accepted, 3);
    assert_eq!(report.skipped_type, 2);

    let items = read_json(config.output_dir.join("items.json"));
    assert_eq!(items.as_array().unwrap().len(), 3);
    assert_eq!(items[0]["data"]["children"].as_array().unwrap().len(), 2);
}

#[test]
fn attachment_metadata_becomes_image() {
    let temp = TempDir::new().unwrap();
    let mut photo = raw_item(7, 0, "attachment", "2023-05-05 09:00:00");
    photo["postmeta"] = json!([
        {
            "meta_key": {"__cdata": "_wp_attachment_metadata"},
            "meta_value": {"__cdata": "a:4:{s:5:\"width\";i:1200;s:6:\"height\";i:800;s:4:\"file\";s:15:\"2023/05/cat.jpg\";s:5:\"sizes\";a:0:{}}"}
        },
        {
            "meta_key": {"__cdata": "collection"},
            "meta_value": {"__cdata": "a:1:{i:0;s:6:\"spring\";}"}
        }
    ]);
    let config = config_for(temp.path(), &export(vec![photo]));
    run(&config).unwrap();

    let items = read_json(config.output_dir.join("items.json"));
    let item = &items[0];
    assert_eq!(
        item["data"]["image"],
        json!({"width": 1200, "height": 800, "file": "2023/05/cat.jpg"})
    );
    assert_eq!(item["imageObject"], json!("2023/05/cat.jpg"));
    assert_eq!(item["data"]["collection"], json!({"0": "spring"}));
}

#[test]
fn individual_mode_writes_one_file_per_item() {
    let temp = TempDir::new().unwrap();
    let mut config = config_for(temp.path(), &export(family()));
    config.write_individual_items = true;

    let report = run(&config).unwrap();
    assert_eq!(report.files_written, 4);

    let names = file_names(&config.output_dir);
    assert_eq!(names.len(), 4);
    assert!(names.contains(&"root.json".to_string()));
    assert!(!names.contains(&"items.json".to_string()));

    let root = read_json(config.output_dir.join("root.json"));
    let top = root["uids"][0].as_str().unwrap();
    let entry = read_json(config.output_dir.join(format!("{}.json", top)));
    assert_eq!(entry["slug"], json!("post-1"));
    assert_eq!(entry["type"], json!("post"));
    assert_eq!(entry["data"]["uid"], json!(top));
    assert_eq!(entry["uids"]["originalId"], json!(1));
    assert_eq!(entry["uids"]["childUids"].as_array().unwrap().len(), 2);
}

#[test]
fn invalid_item_aborts_and_leaves_output_empty() {
    let temp = TempDir::new().unwrap();
    let mut items = family();
    items[1]["link"] = json!("not a url");
    let config = config_for(temp.path(), &export(items));
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("stale.json"), "[]").unwrap();

    let err = run(&config).unwrap_err();
    match err {
        ApiError::Validation(err) => {
            assert_eq!(err.issues().len(), 1);
            assert_eq!(err.issues()[0].path, "rss.channel.item[1].link");
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert!(file_names(&config.output_dir).is_empty());
}

#[test]
fn skip_policy_drops_invalid_items() {
    let temp = TempDir::new().unwrap();
    let mut items = family();
    items[2]["pubDate"] = json!("sometime last spring");
    let mut config = config_for(temp.path(), &export(items));
    config.on_item_issue = IssuePolicy::Skip;

    let report = run(&config).unwrap();
    assert_eq!(report.total_items, 3);
    assert_eq!(report.skipped_invalid, 1);
    assert_eq!(report.projected, 2);

    let items = read_json(config.output_dir.join("items.json"));
    assert_eq!(items[0]["data"]["children"].as_array().unwrap().len(), 1);
}

#[test]
fn broken_channel_is_fatal_even_when_skipping() {
    let temp = TempDir::new().unwrap();
    let mut raw = export(family());
    raw["rss"]["channel"]["link"] = json!("nowhere");
    let mut config = config_for(temp.path(), &raw);
    config.on_item_issue = IssuePolicy::Skip;

    assert!(matches!(run(&config), Err(ApiError::Validation(_))));
}

#[test]
fn missing_input_fails_before_touching_output() {
    let temp = TempDir::new().unwrap();
    let mut config = config_for(temp.path(), &export(family()));
    config.input = temp.path().join("absent.json");
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("keep.json"), "{}").unwrap();

    assert!(matches!(run(&config), Err(ApiError::Io { .. })));
    assert_eq!(file_names(&config.output_dir), vec!["keep.json"]);
}

#[test]
fn hashed_uids_are_stable_across_runs() {
    let temp = TempDir::new().unwrap();
    let config = config_for(temp.path(), &export(family()));

    run(&config).unwrap();
    let first = fs::read_to_string(config.output_dir.join("items.json")).unwrap();
    run(&config).unwrap();
    let second = fs::read_to_string(config.output_dir.join("items.json")).unwrap();
    assert_eq!(first, second);
}
