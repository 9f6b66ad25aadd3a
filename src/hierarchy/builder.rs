//! Three-pass hierarchy construction
//!
//! 1. create: one node per accepted item, plus the root
//! 2. connect: resolve `post_parent` to parent uids and child lists
//! 3. order: sort every child list newest-first
//!
//! Each pass runs over the whole map and relies on the previous one having
//! finished.

use super::node::{HierarchyMap, HierarchyNode};
use super::uid::UidGenerator;
use crate::cleaning::{CleanWordPressData, CleanWordPressItem};
use crate::types::{is_accepted_type, ROOT_ID};
use std::cmp::Reverse;
use tracing::{debug, info, warn};

/// Build the hierarchy for a cleaned export.
pub fn build(data: &CleanWordPressData, uids: &mut dyn UidGenerator) -> HierarchyMap {
    build_from_items(&data.rss.channel.item, uids)
}

/// Build the hierarchy for a list of items; non-accepted post types are ignored.
pub fn build_from_items(items: &[CleanWordPressItem], uids: &mut dyn UidGenerator) -> HierarchyMap {
    let mut map = create_nodes(items, uids);
    connect_nodes(&mut map);
    order_children(&mut map);

    info!(
        nodes = map.len() - 1,
        top_level = map.root().child_uids.len(),
        orphans = map.orphans().count(),
        "Built hierarchy"
    );
    map
}

fn create_nodes(items: &[CleanWordPressItem], uids: &mut dyn UidGenerator) -> HierarchyMap {
    let mut map = HierarchyMap::new();
    for item in items.iter().filter(|item| is_accepted_type(&item.post_type)) {
        if item.post_id == ROOT_ID {
            warn!(post_type = %item.post_type, "Item uses reserved post id 0; leaving it out of the hierarchy");
            continue;
        }
        let node = HierarchyNode::new(uids.generate(item.post_id), item.post_id, item.post_parent);
        if let Some(replaced) = map.insert(node, item.pub_date) {
            warn!(
                post_id = item.post_id,
                replaced_uid = %replaced.uid,
                "Duplicate post id; later item replaces the earlier one"
            );
        }
    }
    map
}

fn connect_nodes(map: &mut HierarchyMap) {
    for slot in 1..map.nodes.len() {
        let (original_id, parent_id) = {
            let node = &map.nodes[slot];
            (node.original_id, node.original_parent_id)
        };
        if parent_id == original_id {
            warn!(post_id = original_id, "Post lists itself as parent; treating it as an orphan");
            continue;
        }
        let Some(&parent_slot) = map.index.get(&parent_id) else {
            debug!(post_id = original_id, parent_id, "Parent not found; node stays orphaned");
            continue;
        };
        let parent_uid = map.nodes[parent_slot].uid.clone();
        let uid = map.nodes[slot].uid.clone();
        map.nodes[slot].parent_uid = Some(parent_uid);
        map.nodes[parent_slot].child_uids.push(uid);
    }
}

fn order_children(map: &mut HierarchyMap) {
    let published = &map.published;
    for node in map.nodes.iter_mut().filter(|node| node.child_uids.len() > 1) {
        // Option orders None first, so reversing puts undated children last.
        node.child_uids
            .sort_by_key(|uid| Reverse(published.get(uid).copied().flatten()));
    }
}
