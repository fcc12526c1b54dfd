//! Shape morphing: in-between shapes from two shapes with matching points.

use crate::errors::TurnError;
use crate::item::{Item, Shape};
use crate::scene::SceneGraph;
use crate::types::{NodeId, PathPoint};
use tracing::info;

/// Builds `steps` closed shapes evenly spaced between `from` and `to`.
///
/// Shape `i` (1-based) sits at `t = i / (steps + 1)`. Anchors, handles and
/// stroke width are interpolated linearly. A point whose kind differs between
/// the two shapes takes `from`'s kind for the first half of the steps and
/// `to`'s after.
pub fn interpolate_shapes(from: &Shape, to: &Shape, steps: usize) -> Result<Vec<Shape>, TurnError> {
    if from.points.len() != to.points.len() {
        return Err(TurnError::PointCountMismatch(from.points.len(), to.points.len()));
    }
    if steps == 0 {
        return Err(TurnError::InvalidInput(
            "at least one intermediate shape is required".to_string(),
        ));
    }

    let shapes = (1..=steps)
        .map(|i| {
            let t = i as f64 / (steps + 1) as f64;
            let points = from
                .points
                .iter()
                .zip(&to.points)
                .map(|(a, b)| PathPoint {
                    anchor: a.anchor.lerp(b.anchor, t),
                    left_direction: a.left_direction.lerp(b.left_direction, t),
                    right_direction: a.right_direction.lerp(b.right_direction, t),
                    kind: if a.kind == b.kind || 2 * i <= steps {
                        a.kind
                    } else {
                        b.kind
                    },
                })
                .collect();
            let mut shape = Shape::new(format!("{} {}", from.name, i), points, true);
            shape.stroke_width = lerp(from.stroke_width, to.stroke_width, t);
            shape
        })
        .collect();
    Ok(shapes)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Morphs between the two shapes on `layer` and appends the in-betweens to it.
///
/// The layer must hold exactly two shapes; the first is the start of the morph.
pub fn add_intermediate_shapes(
    scene: &mut SceneGraph,
    layer: NodeId,
    steps: usize,
) -> Result<usize, TurnError> {
    let node = scene.node(layer)?;
    let shapes: Vec<&Shape> = node
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Path(shape) => Some(shape),
            _ => None,
        })
        .collect();
    let [from, to] = shapes.as_slice() else {
        return Err(TurnError::InvalidInput(format!(
            "layer '{}' must hold exactly two shapes, found {}",
            node.name,
            shapes.len()
        )));
    };

    let created = interpolate_shapes(from, to, steps)?;
    let count = created.len();
    let node = scene.node_mut(layer)?;
    node.items.extend(created.into_iter().map(Item::Path));
    info!(layer = %node.name, shapes = count, "Intermediate shapes added");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointKind;

    #[test]
    fn halfway_kind_switch() {
        let from = Shape::rectangle("a", 0.0, 10.0, 10.0, 0.0);
        let mut to = Shape::rectangle("b", 0.0, 10.0, 10.0, 0.0);
        to.points[0].kind = PointKind::Smooth;

        let shapes = interpolate_shapes(&from, &to, 4).unwrap();
        let kinds: Vec<_> = shapes.iter().map(|s| s.points[0].kind).collect();
        assert_eq!(
            kinds,
            [PointKind::Corner, PointKind::Corner, PointKind::Smooth, PointKind::Smooth]
        );
        assert!(shapes.iter().all(|s| s.points[1].kind == PointKind::Corner));
    }
}
