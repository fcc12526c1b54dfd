//! # Turnaround Core
//!
//! `turnaround-core` builds the turn-around frames of a rigged 2D character
//! (front, three-quarter, profile and back) from a single frontal pose.
//!
//! The character lives in an arena [`SceneGraph`] of named layers holding vector
//! shapes, embedded raster/plugin items and groups. Every pose is a deep
//! duplicate of an earlier pose whose features are then moved, squeezed,
//! rotated and mirrored according to per-stage placement tables.
//!
//! ## Core Features
//!
//! *   **Scene Model**: Layers with stacking order, y-up bounds and leaf-level geometry.
//! *   **Tree Operations**: Pre-order lookup, deep duplication and reordering.
//! *   **Geometry**: Anchored resize, mirroring, eased rotation and stepped squeezes.
//! *   **Pose Engine**: Staged head turn and eased body turn.
//! *   **Driver**: Validation, measurement and orchestration of a full run.
//! *   **Utilities**: Shape morphing and batch layer renaming/visibility.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use turnaround_core::{CollectedDiagnostics, Driver, SceneGraph, StaticInput};
//!
//! let mut scene = SceneGraph::new();
//! // ... populate `Head` and `Body` ...
//! let mut diagnostics = CollectedDiagnostics::default();
//! let summary = Driver::new().run(&mut scene, &StaticInput::new("4", false), &mut diagnostics);
//! ```

/// Easing curves and stepped scale ramps.
pub mod animation;

/// Run configuration and cancellation.
pub mod config;

/// The top-level orchestration of a turn-around run.
pub mod driver;

pub mod errors;

/// Node-level transforms.
pub mod geometry;

/// Shapes, embedded items and groups.
pub mod item;

/// Batch layer utilities.
pub mod layers;

/// Shape morphing.
pub mod morph;

/// Head and body pose engines.
pub mod pose;

/// The Scene Graph Data Structure.
pub mod scene;

/// Traversal, lookup and duplication.
pub mod tree;

/// Shared data structures used across the engine.
pub mod types;

pub use config::{CancelFlag, RunContext, TurnConfig};
pub use driver::{
    parse_frame_count, CollectedDiagnostics, Diagnostics, Driver, InputProvider, RunSummary,
    StaticInput, TracingDiagnostics,
};
pub use errors::{ItemCopyError, TurnError};
pub use item::{EmbeddedItem, EmbeddedKind, Group, Item, Shape};
pub use scene::{SceneGraph, SceneNode};
pub use tree::{Duplicate, SkippedItem};
pub use types::{Anchor, Bounds, NodeId, PathPoint, PointKind};
