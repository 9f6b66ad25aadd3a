//! Hierarchy node and map types

use crate::types::{PostId, Uid, ROOT_ID, ROOT_UID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One post in the rebuilt tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub uid: Uid,
    pub original_id: PostId,
    pub original_parent_id: PostId,
    pub parent_uid: Option<Uid>,
    pub child_uids: Vec<Uid>,
}

impl HierarchyNode {
    pub fn new(uid: Uid, original_id: PostId, original_parent_id: PostId) -> Self {
        Self {
            uid,
            original_id,
            original_parent_id,
            parent_uid: None,
            child_uids: Vec::new(),
        }
    }

    /// The synthetic root every top-level post hangs from.
    pub fn root() -> Self {
        Self::new(ROOT_UID.to_string(), ROOT_ID, -1)
    }

    pub fn is_root(&self) -> bool {
        self.original_id == ROOT_ID && self.uid == ROOT_UID
    }
}

/// Original post id → node, in insertion order, root first.
///
/// Also owns the uid → publish date index used to order siblings.
#[derive(Debug, Clone)]
pub struct HierarchyMap {
    pub(crate) nodes: Vec<HierarchyNode>,
    pub(crate) index: HashMap<PostId, usize>,
    pub(crate) published: HashMap<Uid, Option<DateTime<Utc>>>,
}

impl Default for HierarchyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyMap {
    /// A map holding only the root node.
    pub fn new() -> Self {
        let mut index = HashMap::new();
        index.insert(ROOT_ID, 0);
        HierarchyMap {
            nodes: vec![HierarchyNode::root()],
            index,
            published: HashMap::new(),
        }
    }

    /// Insert a node; a node already stored under the same post id is
    /// replaced in place and returned.
    pub fn insert(
        &mut self,
        node: HierarchyNode,
        published: Option<DateTime<Utc>>,
    ) -> Option<HierarchyNode> {
        self.published.insert(node.uid.clone(), published);
        match self.index.get(&node.original_id) {
            Some(&slot) => {
                let replaced = std::mem::replace(&mut self.nodes[slot], node);
                self.published.remove(&replaced.uid);
                Some(replaced)
            }
            None => {
                self.index.insert(node.original_id, self.nodes.len());
                self.nodes.push(node);
                None
            }
        }
    }

    pub fn get(&self, id: PostId) -> Option<&HierarchyNode> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[0]
    }

    /// Publish date of the post behind `uid`; `None` if unknown or undated.
    pub fn published(&self, uid: &str) -> Option<DateTime<Utc>> {
        self.published.get(uid).copied().flatten()
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.iter()
    }

    /// Nodes whose declared parent was not found.
    pub fn orphans(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes
            .iter()
            .filter(|node| !node.is_root() && node.parent_uid.is_none())
    }
}
