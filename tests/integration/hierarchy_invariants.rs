use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use wp_sac::cleaning::CleanWordPressItem;
use wp_sac::hierarchy::{build_from_items, HashedUid, HierarchyMap};
use wp_sac::types::{is_accepted_type, JsonObject, ROOT_ID};

const TYPES: [&str; 6] = ["post", "page", "attachment", "custom_css", "nav_menu_item", "revision"];

fn item(id: i64, parent: i64, post_type: &str, day: Option<u32>) -> CleanWordPressItem {
    CleanWordPressItem {
        title: format!("Post {}", id),
        link: format!("https://example.com/?p={}", id),
        pub_date: day.map(|d| Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(d as i64)),
        encoded: Vec::new(),
        guid: format!("https://example.com/?p={}", id),
        post_id: id,
        post_parent: parent,
        post_type: post_type.to_string(),
        category: Vec::new(),
        tag: Vec::new(),
        attachment_url: None,
        postmeta: JsonObject::new(),
    }
}

fn items_strategy() -> impl Strategy<Value = Vec<CleanWordPressItem>> {
    prop::collection::vec(
        (1i64..40, 0i64..45, 0usize..TYPES.len(), prop::option::of(0u32..30)),
        0..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(id, parent, ty, day)| item(id, parent, TYPES[ty], day))
            .collect()
    })
}

fn dates_by_uid(tree: &HierarchyMap, items: &[CleanWordPressItem]) -> HashMap<String, Option<DateTime<Utc>>> {
    let mut last: HashMap<i64, Option<DateTime<Utc>>> = HashMap::new();
    for item in items.iter().filter(|i| is_accepted_type(&i.post_type)) {
        last.insert(item.post_id, item.pub_date);
    }
    tree.iter()
        .filter(|node| !node.is_root())
        .map(|node| (node.uid.clone(), last[&node.original_id]))
        .collect()
}

proptest! {
    #[test]
    fn one_node_per_accepted_post(items in items_strategy()) {
        let tree = build_from_items(&items, &mut HashedUid::default());
        let accepted: HashSet<i64> = items
            .iter()
            .filter(|i| is_accepted_type(&i.post_type) && i.post_id != ROOT_ID)
            .map(|i| i.post_id)
            .collect();

        prop_assert_eq!(tree.len(), accepted.len() + 1);
        for id in &accepted {
            prop_assert!(tree.contains(*id));
        }
        for item in items.iter().filter(|i| !is_accepted_type(&i.post_type)) {
            if !accepted.contains(&item.post_id) {
                prop_assert!(!tree.contains(item.post_id));
            }
        }
    }

    #[test]
    fn links_are_consistent(items in items_strategy()) {
        let tree = build_from_items(&items, &mut HashedUid::default());
        let uids: HashSet<&str> = tree.iter().map(|node| node.uid.as_str()).collect();
        prop_assert_eq!(uids.len(), tree.len());

        let mut linked = 0;
        for node in tree.iter().filter(|node| !node.is_root()) {
            if let Some(parent) = &node.parent_uid {
                prop_assert!(uids.contains(parent.as_str()));
                linked += 1;
            }
        }
        let child_total: usize = tree.iter().map(|node| node.child_uids.len()).sum();
        prop_assert_eq!(child_total, linked);
    }

    #[test]
    fn siblings_are_newest_first(items in items_strategy()) {
        let tree = build_from_items(&items, &mut HashedUid::default());
        let dates = dates_by_uid(&tree, &items);

        for node in tree.iter() {
            for pair in node.child_uids.windows(2) {
                match (dates[&pair[0]], dates[&pair[1]]) {
                    (Some(a), Some(b)) => prop_assert!(a >= b),
                    (None, Some(_)) => prop_assert!(false, "undated child sorted before dated one"),
                    _ => {}
                }
            }
        }
    }
}

#[test]
fn orphans_keep_null_parent() {
    let items = vec![item(5, 99, "post", Some(1)), item(6, 5, "page", None)];
    let tree = build_from_items(&items, &mut HashedUid::default());

    let orphan = tree.get(5).unwrap();
    assert_eq!(orphan.parent_uid, None);
    assert_eq!(orphan.original_parent_id, 99);
    assert!(tree.root().child_uids.is_empty());
    assert_eq!(tree.get(6).unwrap().parent_uid.as_deref(), Some(orphan.uid.as_str()));
    assert_eq!(tree.orphans().count(), 1);
}
