//! # Geometry Utilities
//!
//! Node-level transforms built on top of the per-item capabilities in `item.rs`.
//!
//! Every function that needs a reference point measures the node's bounds once,
//! before touching any item, so the reference does not drift while items move.

use crate::animation::{stepped_scale, TurnEasing};
use crate::errors::TurnError;
use crate::item::Item;
use crate::scene::SceneGraph;
use crate::types::{Anchor, NodeId};
use kurbo::Point;

/// Resizes every item under `node` by `scale_percent`, keeping `anchor` of the
/// node's current bounds fixed.
///
/// Each item is scaled about its own center, then moved so that its offset from
/// the anchor is scaled by the same factor.
pub fn resize_from_anchor(
    scene: &mut SceneGraph,
    node: NodeId,
    scale_percent: f64,
    anchor: Anchor,
) -> Result<(), TurnError> {
    let reference = anchor.resolve(&scene.require_bounds(node)?);
    let factor = scale_percent / 100.0;
    scene.for_each_leaf_mut(node, &mut |item| {
        let delta = item.position() - reference;
        item.resize(scale_percent, scale_percent);
        item.set_position(reference + delta * factor);
    });
    Ok(())
}

/// Flips the geometry under `node` about the node's vertical center line.
///
/// The node's bounding box does not move.
pub fn mirror_horizontally(scene: &mut SceneGraph, node: NodeId) -> Result<(), TurnError> {
    let center_x = scene.require_bounds(node)?.center().x;
    scene.for_each_leaf_mut(node, &mut |item| {
        let bounds = item.bounds();
        if bounds.is_empty() {
            return;
        }
        item.translate(2.0 * (center_x - bounds.center().x), 0.0);
        item.resize(-100.0, 100.0);
    });
    Ok(())
}

/// Moves the geometry under `node` by `dx` and squeezes it horizontally.
///
/// Shapes ramp linearly from 100% towards `target_scale` (`step` of `total`).
/// Embedded items jump straight to `target_scale`, since raster content must
/// not be resampled in small increments.
pub fn translate_and_scale_x(
    scene: &mut SceneGraph,
    node: NodeId,
    dx: f64,
    target_scale: f64,
    step: usize,
    total: usize,
) -> Result<(), TurnError> {
    if total == 0 {
        return Err(TurnError::InvalidInput(
            "total step count must be positive".to_string(),
        ));
    }
    let shape_scale = stepped_scale(target_scale, step, total);
    scene.for_each_leaf_mut(node, &mut |item| {
        let scale = if matches!(item, Item::Embedded(_)) {
            target_scale
        } else {
            shape_scale
        };
        item.translate(dx, 0.0);
        item.resize(scale, 100.0);
    });
    Ok(())
}

/// Rotates every shape under `node` about the node's center by an eased angle.
///
/// The angle is `sin(pi * step / (2 * total)) * max_degrees`. Each shape is first
/// carried to the rotated position of its own center, then spun in place by the
/// same angle. Descendant layers all receive the same angle exactly once.
/// Embedded items are left untouched.
pub fn rotate_about(
    scene: &mut SceneGraph,
    node: NodeId,
    max_degrees: f64,
    step: usize,
    total: usize,
) -> Result<f64, TurnError> {
    if total == 0 {
        return Err(TurnError::InvalidInput(
            "total step count must be positive".to_string(),
        ));
    }
    let degrees = TurnEasing::QuarterSine.at_step(step, total) * max_degrees;
    let radians = degrees.to_radians();
    let center = scene.require_bounds(node)?.center();
    scene.for_each_leaf_mut(node, &mut |item| {
        let Item::Path(shape) = item else {
            return;
        };
        let bounds = shape.bounds();
        if bounds.is_empty() {
            return;
        }
        let own_center = bounds.center();
        let moved = rotate_point(own_center, center, radians);
        shape.apply(kurbo::Affine::translate(moved - own_center));
        shape.rotate(degrees);
    });
    Ok(degrees)
}

/// Rotates `point` counter-clockwise about `center` (y-up space).
pub fn rotate_point(point: Point, center: Point, radians: f64) -> Point {
    let (sin, cos) = radians.sin_cos();
    let d = point - center;
    Point::new(
        center.x + d.x * cos - d.y * sin,
        center.y + d.x * sin + d.y * cos,
    )
}
