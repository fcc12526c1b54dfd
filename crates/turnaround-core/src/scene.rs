use crate::errors::TurnError;
use crate::item::Item;
use crate::types::{Bounds, NodeId};
use kurbo::Point;

/// A named layer in the scene graph.
///
/// Holds nested layers (`children`) and the geometry placed directly on it (`items`).
/// Child order is stacking order: index 0 renders on top, the last child at the bottom.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Layer name. Not unique; lookups return the first match in traversal order.
    pub name: String,
    /// Indices of child nodes.
    pub children: Vec<NodeId>,
    /// Index of parent node.
    pub parent: Option<NodeId>,
    /// Shapes, embedded items and groups owned by this layer.
    pub items: Vec<Item>,
    pub visible: bool,
}

impl SceneNode {
    /// Creates an empty, visible, detached node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            parent: None,
            items: Vec::new(),
            visible: true,
        }
    }
}

/// The Scene Graph data structure.
///
/// Manages the arena of nodes and their relationships. Slot 0 always holds the
/// document root, which cannot be removed.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    /// The Arena of all nodes. `None` marks a slot freed by `destroy_node`.
    pub nodes: Vec<Option<SceneNode>>,
    /// Indices of nodes that have been removed and can be reused.
    pub free_indices: Vec<usize>,
    root: NodeId,
}

impl SceneGraph {
    /// Creates a graph holding only the document root, named `"Document"`.
    pub fn new() -> Self {
        Self::with_root("Document")
    }

    pub fn with_root(name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Some(SceneNode::new(name))],
            free_indices: Vec::new(),
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds a detached node to the arena and returns its ID.
    pub fn add_node(&mut self, node: SceneNode) -> NodeId {
        if let Some(id) = self.free_indices.pop() {
            self.nodes[id] = Some(node);
            id
        } else {
            let id = self.nodes.len();
            self.nodes.push(Some(node));
            id
        }
    }

    /// Creates a named node and appends it as the bottom child of `parent`.
    pub fn add_layer(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.add_node(SceneNode::new(name));
        self.add_child(parent, id);
        id
    }

    /// Recursively destroys a node and its children, freeing their indices for reuse.
    pub fn destroy_node(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        let Some(node) = self.get_node(id) else {
            return;
        };
        let (parent_id, children_ids) = (node.parent, node.children.clone());

        if let Some(pid) = parent_id {
            self.remove_child(pid, id);
        }

        for child_id in children_ids {
            self.destroy_node(child_id);
        }

        self.nodes[id] = None;
        self.free_indices.push(id);
    }

    /// Establishes a parent-child relationship, placing the child at the bottom.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.get_node(parent).map_or(0, |p| p.children.len());
        self.insert_child(parent, index, child);
    }

    /// Establishes a parent-child relationship at `index` in the parent's stacking order.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let Some(p_node) = self.get_node_mut(parent) {
            let index = index.min(p_node.children.len());
            p_node.children.insert(index, child);
        }
        if let Some(c_node) = self.get_node_mut(child) {
            c_node.parent = Some(parent);
        }
    }

    /// Removes a child from a parent node's children list.
    /// Does NOT affect the child's `parent` field (caller must handle that if needed, e.g. re-parenting).
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p_node) = self.get_node_mut(parent) {
            if let Some(pos) = p_node.children.iter().position(|&x| x == child) {
                p_node.children.remove(pos);
            }
        }
    }

    /// Returns a mutable reference to the SceneNode.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id).and_then(|n| n.as_mut())
    }

    /// Returns a shared reference to the SceneNode.
    pub fn get_node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id).and_then(|n| n.as_ref())
    }

    /// Like `get_node`, failing with `StaleNode` for freed or unknown IDs.
    pub fn node(&self, id: NodeId) -> Result<&SceneNode, TurnError> {
        self.get_node(id).ok_or(TurnError::StaleNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, TurnError> {
        self.get_node_mut(id).ok_or(TurnError::StaleNode(id))
    }

    /// Name of a live node, or the empty string for a stale ID.
    pub fn name(&self, id: NodeId) -> &str {
        self.get_node(id).map_or("", |n| n.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get_node(id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn push_item(&mut self, id: NodeId, item: impl Into<Item>) -> Result<(), TurnError> {
        self.node_mut(id)?.items.push(item.into());
        Ok(())
    }

    /// Union of the bounds of every shape and embedded item under `id`.
    ///
    /// Returns `Bounds::EMPTY` when the subtree holds no geometry.
    pub fn bounds(&self, id: NodeId) -> Bounds {
        self.collect_all(id)
            .into_iter()
            .filter_map(|nid| self.get_node(nid))
            .flat_map(|node| node.items.iter())
            .fold(Bounds::EMPTY, |acc, item| acc.union(&item.bounds()))
    }

    /// `bounds`, failing with `EmptyGeometry` instead of returning the sentinel.
    pub fn require_bounds(&self, id: NodeId) -> Result<Bounds, TurnError> {
        let bounds = self.bounds(id);
        if bounds.is_empty() {
            return Err(TurnError::EmptyGeometry(self.node(id)?.name.clone()));
        }
        Ok(bounds)
    }

    /// Midpoint of the node's bounds.
    pub fn position(&self, id: NodeId) -> Result<Point, TurnError> {
        Ok(self.require_bounds(id)?.center())
    }

    /// Calls `f` on every shape and embedded item under `id`, in traversal order.
    pub fn for_each_leaf_mut(&mut self, id: NodeId, f: &mut dyn FnMut(&mut Item)) {
        for nid in self.collect_all(id) {
            if let Some(node) = self.get_node_mut(nid) {
                for item in &mut node.items {
                    item.for_each_leaf_mut(f);
                }
            }
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
