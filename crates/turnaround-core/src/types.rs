//! # Types Module
//!
//! Shared data types used across the engine.
//!
//! ## Key Types
//! - `NodeId`: Type alias for arena indices (`usize`).
//! - `Bounds`: Axis-aligned box in y-up document space.
//! - `PathPoint`: One anchor of a vector path with its bezier handles.
//! - `Anchor`: Reference point used by anchored resizes.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A unique identifier for a node in the scene graph.
pub type NodeId = usize;

/// An axis-aligned bounding box in document coordinates, where `y` grows upwards.
///
/// Field order follows the host convention `[xMin, yMax, xMax, yMin]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// The degenerate box of a node without geometry. Acts as the identity of `union`.
    pub const EMPTY: Bounds = Bounds {
        left: f64::INFINITY,
        top: f64::NEG_INFINITY,
        right: f64::NEG_INFINITY,
        bottom: f64::INFINITY,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Converts a kurbo rect (`y0 <= y1`) into y-up bounds.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            left: rect.x0.min(rect.x1),
            top: rect.y0.max(rect.y1),
            right: rect.x0.max(rect.x1),
            bottom: rect.y0.min(rect.y1),
        }
    }

    /// True for `EMPTY` and for any box carrying NaN or inverted edges.
    pub fn is_empty(&self) -> bool {
        !(self.left <= self.right && self.bottom <= self.top)
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn top_center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, self.top)
    }

    pub fn translate(&self, offset: Vec2) -> Bounds {
        Bounds {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
        }
    }

    /// Grows every edge outwards by `amount`.
    pub fn inflate(&self, amount: f64) -> Bounds {
        Bounds {
            left: self.left - amount,
            top: self.top + amount,
            right: self.right + amount,
            bottom: self.bottom - amount,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// How the handles of an anchor relate to each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Corner,
    Smooth,
}

impl Default for PointKind {
    fn default() -> Self {
        Self::Corner
    }
}

/// A vector path anchor.
///
/// Handles are stored as offsets from the anchor: `left_direction` is the
/// incoming handle, `right_direction` the outgoing one.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub anchor: Point,
    #[serde(default)]
    pub left_direction: Vec2,
    #[serde(default)]
    pub right_direction: Vec2,
    #[serde(default)]
    pub kind: PointKind,
}

impl PathPoint {
    /// A corner point whose handles sit on the anchor.
    pub fn corner(x: f64, y: f64) -> Self {
        Self {
            anchor: Point::new(x, y),
            left_direction: Vec2::ZERO,
            right_direction: Vec2::ZERO,
            kind: PointKind::Corner,
        }
    }

    pub fn smooth(anchor: Point, left_direction: Vec2, right_direction: Vec2) -> Self {
        Self {
            anchor,
            left_direction,
            right_direction,
            kind: PointKind::Smooth,
        }
    }

    /// Absolute position of the incoming handle.
    pub fn left_handle(&self) -> Point {
        self.anchor + self.left_direction
    }

    /// Absolute position of the outgoing handle.
    pub fn right_handle(&self) -> Point {
        self.anchor + self.right_direction
    }

    pub fn is_finite(&self) -> bool {
        [
            self.anchor.x,
            self.anchor.y,
            self.left_direction.x,
            self.left_direction.y,
            self.right_direction.x,
            self.right_direction.y,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Reference point of a node's bounds that stays fixed during an anchored resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Pins the top edge and the vertical midline.
    TopCenter,
    Center,
}

impl Anchor {
    pub fn resolve(&self, bounds: &Bounds) -> Point {
        match self {
            Anchor::TopCenter => bounds.top_center(),
            Anchor::Center => bounds.center(),
        }
    }
}
