//! A small frontal rig shared by the integration tests.
//!
//! The head background spans `x = 0..100`; the body sits below it.

#![allow(dead_code)]

use turnaround_core::pose::rig as layer;
use turnaround_core::{NodeId, PathPoint, SceneGraph, Shape};

pub struct Rig {
    pub scene: SceneGraph,
    pub head: NodeId,
    pub body: NodeId,
}

fn rect(name: &str, left: f64, top: f64, right: f64, bottom: f64) -> Shape {
    Shape::rectangle(name, left, top, right, bottom)
}

fn layer_with(scene: &mut SceneGraph, parent: NodeId, name: &str, shapes: Vec<Shape>) -> NodeId {
    let id = scene.add_layer(parent, name);
    for shape in shapes {
        scene.push_item(id, shape).unwrap();
    }
    id
}

/// An eye whose third sub-layer holds the pupil.
fn eye(scene: &mut SceneGraph, parent: NodeId, name: &str, left: f64) -> NodeId {
    let id = scene.add_layer(parent, name);
    layer_with(scene, id, "White", vec![rect("white", left, 65.0, left + 20.0, 55.0)]);
    layer_with(scene, id, "Iris", vec![rect("iris", left + 5.0, 64.0, left + 15.0, 56.0)]);
    layer_with(scene, id, "Pupil", vec![rect("pupil", left + 8.0, 62.0, left + 12.0, 58.0)]);
    id
}

pub fn rig() -> Rig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut scene = SceneGraph::new();
    let root = scene.root();
    let head = scene.add_layer(root, layer::HEAD);
    let body = scene.add_layer(root, layer::BODY);

    layer_with(&mut scene, head, layer::LEFT_EYEBROW, vec![rect("brow", 55.0, 75.0, 75.0, 72.0)]);
    layer_with(&mut scene, head, layer::RIGHT_EYEBROW, vec![rect("brow", 25.0, 75.0, 45.0, 72.0)]);
    eye(&mut scene, head, layer::LEFT_EYE, 55.0);
    eye(&mut scene, head, layer::RIGHT_EYE, 25.0);
    let nose = Shape::new(
        "nose",
        vec![
            PathPoint::corner(45.0, 50.0),
            PathPoint::corner(55.0, 40.0),
            PathPoint::corner(48.0, 40.0),
        ],
        true,
    );
    layer_with(&mut scene, head, layer::NOSE, vec![nose]);
    let mouth = scene.add_layer(head, layer::MOUTH);
    layer_with(&mut scene, mouth, "Smile", vec![rect("smile", 35.0, 30.0, 65.0, 25.0)]);
    layer_with(&mut scene, mouth, "Open", vec![rect("open", 40.0, 28.0, 60.0, 22.0)]);
    layer_with(&mut scene, head, layer::HAIR, vec![rect("hair", 0.0, 110.0, 100.0, 85.0)]);
    layer_with(&mut scene, head, layer::LEFT_EAR, vec![rect("ear", 100.0, 60.0, 110.0, 40.0)]);
    layer_with(&mut scene, head, layer::RIGHT_EAR, vec![rect("ear", -10.0, 60.0, 0.0, 40.0)]);
    layer_with(&mut scene, head, layer::BACKGROUND, vec![rect("face", 0.0, 100.0, 100.0, 0.0)]);

    layer_with(&mut scene, body, layer::RIGHT_ARM, vec![rect("arm", 10.0, -10.0, 25.0, -90.0)]);
    layer_with(&mut scene, body, layer::LEFT_ARM, vec![rect("arm", 75.0, -10.0, 90.0, -90.0)]);
    layer_with(&mut scene, body, layer::TORSO, vec![rect("torso", 30.0, -10.0, 70.0, -100.0)]);
    layer_with(&mut scene, body, layer::HIPS, vec![rect("hips", 30.0, -100.0, 70.0, -120.0)]);
    layer_with(&mut scene, body, layer::RIGHT_LEG, vec![rect("leg", 32.0, -120.0, 48.0, -200.0)]);
    layer_with(&mut scene, body, layer::LEFT_LEG, vec![rect("leg", 52.0, -120.0, 68.0, -200.0)]);

    Rig { scene, head, body }
}

/// Names of every live node, in pre-order from the root.
pub fn names(scene: &SceneGraph) -> Vec<String> {
    scene
        .collect_all(scene.root())
        .into_iter()
        .map(|id| scene.name(id).to_string())
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
