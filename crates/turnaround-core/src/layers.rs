//! Batch layer utilities: visibility, renaming and the character template.
//!
//! These work on layer names only and never touch geometry. The document root
//! is never renamed or hidden.

use crate::errors::TurnError;
use crate::pose::rig;
use crate::scene::{SceneGraph, SceneNode};
use crate::types::NodeId;
use tracing::{debug, info};

/// Head layers created by the template, in creation order.
pub const TEMPLATE_HEAD_LAYERS: [&str; 5] = [
    rig::BACKGROUND,
    rig::HAIR,
    rig::RIGHT_EAR,
    rig::LEFT_EAR,
    rig::NOSE,
];

/// Body layers created by the template, in creation order.
pub const TEMPLATE_BODY_LAYERS: [&str; 5] = [
    rig::LEFT_LEG,
    rig::RIGHT_LEG,
    rig::TORSO,
    rig::LEFT_ARM,
    rig::RIGHT_ARM,
];

/// Hides every layer under `root` whose name is one of `names`. Returns how many were hidden.
pub fn hide_by_name(scene: &mut SceneGraph, root: NodeId, names: &[&str]) -> usize {
    let mut hidden = 0;
    for id in scene.collect_all(root) {
        if id == scene.root() {
            continue;
        }
        let Some(node) = scene.get_node_mut(id) else {
            continue;
        };
        if names.contains(&node.name.as_str()) {
            node.visible = false;
            hidden += 1;
        }
    }
    info!(hidden, "Layers hidden");
    hidden
}

/// Makes every layer under `root` visible.
pub fn show_all(scene: &mut SceneGraph, root: NodeId) {
    for id in scene.collect_all(root) {
        if let Some(node) = scene.get_node_mut(id) {
            node.visible = true;
        }
    }
}

/// Replaces the first occurrence of `find` in the name of `node` and of each
/// of its ancestors, stopping below the document root.
///
/// The scene root stands for the document itself, so every layer up to and
/// including the top-level one is renamed.
pub fn rename_with_ancestors(
    scene: &mut SceneGraph,
    node: NodeId,
    find: &str,
    replace: &str,
) -> Result<usize, TurnError> {
    if find.is_empty() {
        return Err(TurnError::InvalidInput("text to replace is empty".to_string()));
    }
    scene.node(node)?;

    let mut renamed = 0;
    let mut current = Some(node);
    while let Some(id) = current {
        if id == scene.root() {
            break;
        }
        let node = scene.node_mut(id)?;
        if node.name.contains(find) {
            node.name = node.name.replacen(find, replace, 1);
            renamed += 1;
        }
        current = node.parent;
    }
    Ok(renamed)
}

/// Removes "copy N" and "- copie N" suffixes left by manual duplication,
/// for `N` up to `max_number`, plus their bare forms.
pub fn strip_copy_suffixes(
    scene: &mut SceneGraph,
    root: NodeId,
    max_number: usize,
) -> Result<usize, TurnError> {
    if max_number == 0 {
        return Err(TurnError::InvalidInput(
            "the highest copy number must be at least 1".to_string(),
        ));
    }
    let mut renamed = 0;
    for id in scene.collect_all(root) {
        if id == scene.root() {
            continue;
        }
        let Some(node) = scene.get_node_mut(id) else {
            continue;
        };
        let stripped = strip_copy_suffix(&node.name, max_number);
        if stripped != node.name {
            debug!(from = %node.name, to = %stripped, "Layer renamed");
            node.name = stripped;
            renamed += 1;
        }
    }
    info!(renamed, "Copy suffixes removed");
    Ok(renamed)
}

fn strip_copy_suffix(name: &str, max_number: usize) -> String {
    const FRENCH: &str = "- copie";
    const ENGLISH: &str = "copy";

    let mut name = name.to_string();
    let strip = |name: &mut String, suffix: &str| {
        if let Some(rest) = name.strip_suffix(suffix) {
            *name = rest.to_string();
        }
    };
    for i in 1..=max_number {
        let (french, english) = if i == 1 {
            (FRENCH.to_string(), ENGLISH.to_string())
        } else {
            (format!("{} {}", FRENCH, i), format!("{} {}", ENGLISH, i))
        };
        strip(&mut name, &french);
        strip(&mut name, &english);
        strip(&mut name, FRENCH);
        strip(&mut name, ENGLISH);
    }
    name.trim_end().to_string()
}

/// Layers created by `create_character_template`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CharacterTemplate {
    pub character: NodeId,
    pub head: NodeId,
    pub body: NodeId,
}

/// Adds an empty `+Perso` rig on top of the document.
///
/// Every layer is inserted on top of its siblings, so each list ends up in
/// reverse creation order and `Head` sits above `Body`.
pub fn create_character_template(scene: &mut SceneGraph) -> CharacterTemplate {
    let root = scene.root();
    let character = add_on_top(scene, root, rig::CHARACTER);
    let body = add_on_top(scene, character, rig::BODY);
    let head = add_on_top(scene, character, rig::HEAD);
    for name in TEMPLATE_HEAD_LAYERS {
        add_on_top(scene, head, name);
    }
    for name in TEMPLATE_BODY_LAYERS {
        add_on_top(scene, body, name);
    }
    info!("Character template created");
    CharacterTemplate {
        character,
        head,
        body,
    }
}

fn add_on_top(scene: &mut SceneGraph, parent: NodeId, name: &str) -> NodeId {
    let id = scene.add_node(SceneNode::new(name));
    scene.insert_child(parent, 0, id);
    id
}
