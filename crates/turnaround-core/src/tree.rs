//! # Tree Operations
//!
//! Traversal, lookup, deep duplication and reordering over the `SceneGraph`.
//!
//! Names are not unique, so every lookup is a linear scan in pre-order and
//! returns the first match.

use crate::errors::{ItemCopyError, TurnError};
use crate::scene::{SceneGraph, SceneNode};
use crate::types::NodeId;
use tracing::warn;

/// An item left behind by `duplicate` because it could not be copied.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedItem {
    /// Name of the source layer that owned the item.
    pub layer: String,
    pub error: ItemCopyError,
}

impl std::fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped item in layer '{}': {}", self.layer, self.error)
    }
}

/// Result of a deep duplication.
#[derive(Clone, Debug)]
pub struct Duplicate {
    pub id: NodeId,
    pub skipped: Vec<SkippedItem>,
}

impl SceneGraph {
    /// Pre-order traversal of the subtree rooted at `root`, root first.
    pub fn collect_all(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get_node(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// First node named `name` under `root` (inclusive), in pre-order.
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.collect_all(root)
            .into_iter()
            .find(|&id| self.name(id) == name)
    }

    /// `find_by_name`, failing with `MissingNode`.
    pub fn require_by_name(&self, root: NodeId, name: &str) -> Result<NodeId, TurnError> {
        self.find_by_name(root, name)
            .ok_or_else(|| TurnError::MissingNode(name.to_string()))
    }

    /// Deep-copies `source` into a new node named `new_name`, placed on top of
    /// `source`'s siblings.
    ///
    /// Child layers keep their names and order; items are independent copies.
    /// Items that fail to copy are skipped and reported in `Duplicate::skipped`.
    pub fn duplicate(&mut self, source: NodeId, new_name: &str) -> Result<Duplicate, TurnError> {
        let source_node = self.node(source)?;
        let parent = source_node
            .parent
            .ok_or_else(|| TurnError::DetachedNode(source_node.name.clone()))?;

        let id = self.add_node(SceneNode::new(new_name));
        self.insert_child(parent, 0, id);

        let mut skipped = Vec::new();
        self.copy_contents(source, id, &mut skipped);
        Ok(Duplicate { id, skipped })
    }

    fn copy_contents(&mut self, source: NodeId, target: NodeId, skipped: &mut Vec<SkippedItem>) {
        let Some(node) = self.get_node(source) else {
            return;
        };
        let mut failures = Vec::new();
        let items: Vec<_> = node
            .items
            .iter()
            .filter_map(|item| item.try_duplicate(&mut failures))
            .collect();
        let visible = node.visible;
        let layer = node.name.clone();
        let children = node.children.clone();

        for error in failures {
            warn!(layer = %layer, "Duplication skipped an item: {}", error);
            skipped.push(SkippedItem {
                layer: layer.clone(),
                error,
            });
        }

        if let Some(target_node) = self.get_node_mut(target) {
            target_node.items = items;
            target_node.visible = visible;
        }

        for child in children {
            let name = self.name(child).to_string();
            let copy = self.add_layer(target, name);
            self.copy_contents(child, copy, skipped);
        }
    }

    /// Moves `child` to the bottom of `parent`'s stacking order.
    ///
    /// Returns false when `child` is not a direct child of `parent`.
    pub fn move_to_back(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(p_node) = self.get_node_mut(parent) else {
            return false;
        };
        let Some(pos) = p_node.children.iter().position(|&x| x == child) else {
            return false;
        };
        p_node.children.remove(pos);
        p_node.children.push(child);
        true
    }

    /// Detaches and destroys `id` with its whole subtree.
    ///
    /// Returns false for the root or an already removed node.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root() || self.get_node(id).is_none() {
            return false;
        }
        self.destroy_node(id);
        true
    }

    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), TurnError> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }
}
