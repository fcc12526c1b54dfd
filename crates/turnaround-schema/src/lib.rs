//! JSON interchange tree for turn-around documents.
//!
//! A [`Document`] mirrors the host's layer panel: nested named layers, each with
//! its own items. It is converted to and from a [`SceneGraph`] so the CLI and the
//! test fixtures can feed the engine without the host application.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use turnaround_core::{Item, NodeId, SceneGraph, SceneNode};

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    #[serde(default = "default_document_name")]
    pub name: String,
    /// Items placed directly on the document root.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Top-level layers, topmost first.
    #[serde(default)]
    pub layers: Vec<LayerDoc>,
}

fn default_document_name() -> String {
    "Document".to_string()
}

impl Default for Document {
    fn default() -> Self {
        Self {
            name: default_document_name(),
            items: Vec::new(),
            layers: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayerDoc {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Sub-layers, topmost first.
    #[serde(default)]
    pub layers: Vec<LayerDoc>,
}

fn default_visible() -> bool {
    true
}

impl LayerDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            items: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn with_layer(mut self, layer: LayerDoc) -> Self {
        self.layers.push(layer);
        self
    }
}

/// Converts a document into a scene graph rooted at the document.
pub fn build_scene(document: &Document) -> SceneGraph {
    let mut scene = SceneGraph::with_root(document.name.clone());
    let root = scene.root();
    if let Some(node) = scene.get_node_mut(root) {
        node.items = document.items.clone();
    }
    for layer in &document.layers {
        build_layer_recursive(&mut scene, root, layer);
    }
    scene
}

fn build_layer_recursive(scene: &mut SceneGraph, parent: NodeId, layer: &LayerDoc) {
    let mut node = SceneNode::new(layer.name.clone());
    node.items = layer.items.clone();
    node.visible = layer.visible;
    let id = scene.add_node(node);
    scene.add_child(parent, id);
    for child in &layer.layers {
        build_layer_recursive(scene, id, child);
    }
}

/// Converts a scene graph back into a document.
pub fn export_scene(scene: &SceneGraph) -> Document {
    let root = scene.root();
    let Some(node) = scene.get_node(root) else {
        return Document::default();
    };
    Document {
        name: node.name.clone(),
        items: node.items.clone(),
        layers: node
            .children
            .iter()
            .filter_map(|&child| export_layer_recursive(scene, child))
            .collect(),
    }
}

fn export_layer_recursive(scene: &SceneGraph, id: NodeId) -> Option<LayerDoc> {
    let node = scene.get_node(id)?;
    Some(LayerDoc {
        name: node.name.clone(),
        visible: node.visible,
        items: node.items.clone(),
        layers: node
            .children
            .iter()
            .filter_map(|&child| export_layer_recursive(scene, child))
            .collect(),
    })
}

pub fn from_json(json: &str) -> Result<Document, SchemaError> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_json(document: &Document) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn load_document(path: impl AsRef<Path>) -> Result<Document, SchemaError> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json)
}

pub fn save_document(path: impl AsRef<Path>, document: &Document) -> Result<(), SchemaError> {
    std::fs::write(path, to_json(document)?)?;
    Ok(())
}
