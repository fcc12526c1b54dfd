//! # Item Module
//!
//! The geometry carried by scene nodes.
//!
//! Items form a closed set of variants: editable vector `Shape`s, opaque
//! `EmbeddedItem`s (raster or plugin content with externally reported bounds),
//! and `Group`s of nested items. Every geometric capability is dispatched by
//! matching on the variant.

use crate::errors::ItemCopyError;
use crate::types::{Bounds, PathPoint};
use kurbo::{Affine, CubicBez, ParamCurveExtrema, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An editable outline made of anchors and bezier handles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default)]
    pub name: String,
    pub points: Vec<PathPoint>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub stroke_width: f64,
}

impl Shape {
    pub fn new(name: impl Into<String>, points: Vec<PathPoint>, closed: bool) -> Self {
        Self {
            name: name.into(),
            points,
            closed,
            stroke_width: 0.0,
        }
    }

    /// Closed axis-aligned rectangle with corner points, listed clockwise from the top-left.
    pub fn rectangle(name: impl Into<String>, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            name,
            vec![
                PathPoint::corner(left, top),
                PathPoint::corner(right, top),
                PathPoint::corner(right, bottom),
                PathPoint::corner(left, bottom),
            ],
            true,
        )
    }

    /// The cubic segments of the outline, including the closing one.
    pub fn segments(&self) -> Vec<CubicBez> {
        let count = self.points.len();
        if count < 2 {
            return Vec::new();
        }
        let last = if self.closed { count } else { count - 1 };
        (0..last)
            .map(|i| {
                let a = &self.points[i];
                let b = &self.points[(i + 1) % count];
                CubicBez::new(a.anchor, a.right_handle(), b.left_handle(), b.anchor)
            })
            .collect()
    }

    /// Visible bounds: tight curve bounds grown by half the stroke.
    pub fn bounds(&self) -> Bounds {
        let Some(first) = self.points.first() else {
            return Bounds::EMPTY;
        };
        let mut rect = Rect::from_points(first.anchor, first.anchor);
        for segment in self.segments() {
            rect = rect.union(segment.bounding_box());
        }
        Bounds::from_rect(rect).inflate(self.stroke_width.max(0.0) / 2.0)
    }

    /// Applies an affine transform to every anchor, carrying the handles along.
    pub fn apply(&mut self, transform: Affine) {
        for point in &mut self.points {
            let anchor = transform * point.anchor;
            let left = transform * point.left_handle();
            let right = transform * point.right_handle();
            point.anchor = anchor;
            point.left_direction = left - anchor;
            point.right_direction = right - anchor;
        }
    }

    /// Rotates the shape about its own bounds center, counter-clockwise in degrees.
    pub fn rotate(&mut self, degrees: f64) {
        let bounds = self.bounds();
        if bounds.is_empty() {
            return;
        }
        self.apply(about(bounds.center(), Affine::rotate(degrees.to_radians())));
    }

    fn check_finite(&self) -> Result<(), ItemCopyError> {
        if self.points.iter().all(PathPoint::is_finite) && self.stroke_width.is_finite() {
            Ok(())
        } else {
            Err(ItemCopyError::NonFiniteGeometry(self.name.clone()))
        }
    }
}

/// Kind of opaque content held by an `EmbeddedItem`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedKind {
    Raster,
    Plugin,
}

/// Opaque content with externally reported bounds. No point-level editing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedItem {
    #[serde(default)]
    pub name: String,
    pub kind: EmbeddedKind,
    pub bounds: Bounds,
    #[serde(default)]
    pub flipped_x: bool,
    #[serde(default)]
    pub flipped_y: bool,
}

impl EmbeddedItem {
    pub fn new(name: impl Into<String>, kind: EmbeddedKind, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            kind,
            bounds,
            flipped_x: false,
            flipped_y: false,
        }
    }

    fn resize(&mut self, scale_x: f64, scale_y: f64) {
        if self.bounds.is_empty() {
            return;
        }
        let center = self.bounds.center();
        let half_w = self.bounds.width() / 2.0 * (scale_x / 100.0).abs();
        let half_h = self.bounds.height() / 2.0 * (scale_y / 100.0).abs();
        self.bounds = Bounds::new(
            center.x - half_w,
            center.y + half_h,
            center.x + half_w,
            center.y - half_h,
        );
        if scale_x < 0.0 {
            self.flipped_x = !self.flipped_x;
        }
        if scale_y < 0.0 {
            self.flipped_y = !self.flipped_y;
        }
    }
}

/// A named collection of items moved as members of their node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Path(Shape),
    Embedded(EmbeddedItem),
    Group(Group),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Path(shape) => &shape.name,
            Item::Embedded(embedded) => &embedded.name,
            Item::Group(group) => &group.name,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Item::Path(shape) => shape.bounds(),
            Item::Embedded(embedded) => embedded.bounds,
            Item::Group(group) => group
                .items
                .iter()
                .fold(Bounds::EMPTY, |acc, item| acc.union(&item.bounds())),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Item::Path(shape) => shape.apply(Affine::translate(Vec2::new(dx, dy))),
            Item::Embedded(embedded) => {
                embedded.bounds = embedded.bounds.translate(Vec2::new(dx, dy));
            }
            Item::Group(group) => {
                for item in &mut group.items {
                    item.translate(dx, dy);
                }
            }
        }
    }

    /// Scales the item about its own bounds center. Percentages, negative values mirror.
    pub fn resize(&mut self, scale_x: f64, scale_y: f64) {
        let bounds = self.bounds();
        if bounds.is_empty() {
            return;
        }
        match self {
            Item::Path(shape) => shape.apply(about(
                bounds.center(),
                Affine::scale_non_uniform(scale_x / 100.0, scale_y / 100.0),
            )),
            Item::Embedded(embedded) => embedded.resize(scale_x, scale_y),
            Item::Group(group) => {
                let center = bounds.center();
                for item in &mut group.items {
                    let item_center = item.bounds().center();
                    item.resize(scale_x, scale_y);
                    let target = Point::new(
                        center.x + (item_center.x - center.x) * scale_x / 100.0,
                        center.y + (item_center.y - center.y) * scale_y / 100.0,
                    );
                    item.translate(target.x - item_center.x, target.y - item_center.y);
                }
            }
        }
    }

    /// Top-left corner of the visible bounds, as the host reports it.
    pub fn position(&self) -> Point {
        self.bounds().top_left()
    }

    pub fn set_position(&mut self, position: Point) {
        let current = self.position();
        self.translate(position.x - current.x, position.y - current.y);
    }

    /// Calls `f` on every shape and embedded item, descending into groups.
    pub fn for_each_leaf_mut(&mut self, f: &mut dyn FnMut(&mut Item)) {
        match self {
            Item::Group(group) => {
                for item in &mut group.items {
                    item.for_each_leaf_mut(f);
                }
            }
            _ => f(self),
        }
    }

    /// Deep copy of the item. Group members that fail are left out and reported.
    pub fn try_duplicate(&self, failures: &mut Vec<ItemCopyError>) -> Option<Item> {
        match self {
            Item::Path(shape) => match shape.check_finite() {
                Ok(()) => Some(Item::Path(shape.clone())),
                Err(e) => {
                    failures.push(e);
                    None
                }
            },
            Item::Embedded(embedded) => {
                if embedded.bounds.is_finite() {
                    Some(Item::Embedded(embedded.clone()))
                } else {
                    failures.push(ItemCopyError::NonFiniteGeometry(embedded.name.clone()));
                    None
                }
            }
            Item::Group(group) => Some(Item::Group(Group {
                name: group.name.clone(),
                items: group
                    .items
                    .iter()
                    .filter_map(|item| item.try_duplicate(failures))
                    .collect(),
            })),
        }
    }
}

impl From<Shape> for Item {
    fn from(shape: Shape) -> Self {
        Item::Path(shape)
    }
}

impl From<EmbeddedItem> for Item {
    fn from(embedded: EmbeddedItem) -> Self {
        Item::Embedded(embedded)
    }
}

/// Conjugates `transform` so it acts about `center` instead of the origin.
pub(crate) fn about(center: Point, transform: Affine) -> Affine {
    Affine::translate(center.to_vec2()) * transform * Affine::translate(-center.to_vec2())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_bounds_cover_bulge() {
        // Half circle-ish arc: handles pull the curve above both anchors.
        let shape = Shape::new(
            "arc",
            vec![
                PathPoint::smooth(Point::new(0.0, 0.0), Vec2::ZERO, Vec2::new(0.0, 40.0)),
                PathPoint::smooth(Point::new(40.0, 0.0), Vec2::new(0.0, 40.0), Vec2::ZERO),
            ],
            false,
        );
        let b = shape.bounds();
        assert!((b.top - 30.0).abs() < 1e-9, "top was {}", b.top);
        assert_eq!(b.bottom, 0.0);
    }

    #[test]
    fn stroke_inflates_bounds() {
        let mut shape = Shape::rectangle("r", 0.0, 10.0, 10.0, 0.0);
        shape.stroke_width = 2.0;
        assert_eq!(shape.bounds(), Bounds::new(-1.0, 11.0, 11.0, -1.0));
    }

    #[test]
    fn embedded_negative_resize_flips() {
        let mut item = Item::from(EmbeddedItem::new(
            "img",
            EmbeddedKind::Raster,
            Bounds::new(0.0, 10.0, 20.0, 0.0),
        ));
        item.resize(-50.0, 100.0);
        match item {
            Item::Embedded(e) => {
                assert!(e.flipped_x);
                assert_eq!(e.bounds, Bounds::new(5.0, 10.0, 15.0, 0.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn non_finite_shape_refuses_to_copy() {
        let shape = Shape::new("bad", vec![PathPoint::corner(f64::NAN, 0.0)], false);
        let mut failures = Vec::new();
        assert!(Item::from(shape).try_duplicate(&mut failures).is_none());
        assert_eq!(
            failures,
            vec![ItemCopyError::NonFiniteGeometry("bad".to_string())]
        );
    }
}
