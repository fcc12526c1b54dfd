//! # Pose Transform Engine
//!
//! Drives the rig's features through the named poses of a turn-around.
//!
//! ## Responsibilities
//! - **Placement tables**: where each feature ends up per stage (`placement.rs`).
//! - **Head turn**: staged state machine, front to back (`head.rs`).
//! - **Body turn**: single eased loop over `2n + 2` frames (`body.rs`).
//!
//! Every frame is a fresh duplicate of a prior pose, mutated in place and never
//! touched again once the engine moves on.

pub mod body;
pub mod head;
pub mod placement;
pub mod rig;

pub use placement::{body_placements, head_placements, Placement, PlacementTable, ReferenceMeasurements};

use crate::config::RunContext;
use crate::errors::TurnError;
use crate::item::{Item, Shape};
use crate::scene::SceneGraph;
use crate::tree::SkippedItem;
use crate::types::NodeId;
use tracing::debug;

/// Stages of the head turn, numbered as the rig's authors numbered them.
///
/// There is no stage 5; the gap is kept so indices stay stable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HeadStage {
    QuarterTurns,
    Profile,
    ProfileFrames,
    BackTransition,
    Back,
}

impl HeadStage {
    /// Execution order.
    pub const ALL: [HeadStage; 5] = [
        HeadStage::QuarterTurns,
        HeadStage::Profile,
        HeadStage::ProfileFrames,
        HeadStage::BackTransition,
        HeadStage::Back,
    ];

    pub fn index(&self) -> u8 {
        match self {
            HeadStage::QuarterTurns => 1,
            HeadStage::Profile => 2,
            HeadStage::ProfileFrames => 3,
            HeadStage::BackTransition => 4,
            HeadStage::Back => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<HeadStage> {
        Self::ALL.into_iter().find(|stage| stage.index() == index)
    }

    /// Number of frames the stage produces for `n` in-betweens.
    pub fn frame_count(&self, n: usize) -> usize {
        match self {
            HeadStage::QuarterTurns => n,
            HeadStage::Profile | HeadStage::Back => 1,
            HeadStage::ProfileFrames => profile_frame_count(n),
            HeadStage::BackTransition => n.div_ceil(2).saturating_sub(1),
        }
    }
}

/// `ceil((n + 1) / 2)`: frames between the profile and the back transition.
pub fn profile_frame_count(n: usize) -> usize {
    (n + 1).div_ceil(2)
}

/// Total head frames for `n` in-betweens.
pub fn head_frame_count(n: usize) -> usize {
    HeadStage::ALL.iter().map(|s| s.frame_count(n)).sum()
}

/// Total body frames for `n` in-betweens.
pub fn body_frame_count(n: usize) -> usize {
    2 * n + 2
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Head(HeadStage),
    Body,
}

/// A generated pose node.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub id: NodeId,
    pub name: String,
    pub part: Part,
}

/// What an engine run produced.
#[derive(Clone, Debug, Default)]
pub struct PoseOutput {
    pub frames: Vec<Frame>,
    /// Items that could not be copied while duplicating poses.
    pub skipped: Vec<SkippedItem>,
}

impl PoseOutput {
    pub fn extend(&mut self, other: PoseOutput) {
        self.frames.extend(other.frames);
        self.skipped.extend(other.skipped);
    }

    /// Duplicates `source` as `name` and stops at the cancellation point.
    ///
    /// A frame created right before a cancellation is removed again, so no
    /// untransformed pose is left behind.
    fn start_frame(
        &mut self,
        scene: &mut SceneGraph,
        source: NodeId,
        name: String,
        part: Part,
        ctx: &RunContext,
    ) -> Result<NodeId, TurnError> {
        let duplicate = scene.duplicate(source, &name)?;
        self.skipped.extend(duplicate.skipped);
        if ctx.cancel.is_cancelled() {
            scene.remove(duplicate.id);
            return Err(TurnError::Cancelled(name));
        }
        debug!(frame = %name, "Frame duplicated");
        self.frames.push(Frame {
            id: duplicate.id,
            name,
            part,
        });
        Ok(duplicate.id)
    }
}

/// Pupil shape of an eye layer: first shape of its third sub-layer.
pub(crate) fn pupil_mut(scene: &mut SceneGraph, eye: NodeId) -> Result<&mut Shape, TurnError> {
    let pupil_name = format!("{} pupil", scene.name(eye));
    let missing = || TurnError::MissingNode(pupil_name.clone());
    let layer = *scene
        .children(eye)
        .get(rig::PUPIL_LAYER_INDEX)
        .ok_or_else(missing)?;
    scene
        .node_mut(layer)?
        .items
        .iter_mut()
        .find_map(|item| match item {
            Item::Path(shape) => Some(shape),
            _ => None,
        })
        .ok_or_else(missing)
}

/// Moves an eye's pupil sideways to suggest gaze.
pub(crate) fn shift_pupil(scene: &mut SceneGraph, eye: NodeId, dx: f64) -> Result<(), TurnError> {
    let pupil = pupil_mut(scene, eye)?;
    pupil.apply(kurbo::Affine::translate((dx, 0.0)));
    Ok(())
}

/// Deletes the named features from a frame; each must exist.
pub(crate) fn remove_features(
    scene: &mut SceneGraph,
    frame: NodeId,
    features: &[&str],
) -> Result<(), TurnError> {
    for feature in features {
        let id = scene.require_by_name(frame, feature)?;
        scene.remove(id);
    }
    Ok(())
}

/// Reorders a frame's layer to the bottom, noting when it is not a direct child.
pub(crate) fn send_to_back(scene: &mut SceneGraph, frame: NodeId, layer: NodeId) {
    if !scene.move_to_back(frame, layer) {
        tracing::warn!(
            frame = %scene.name(frame),
            layer = %scene.name(layer),
            "Layer is not a direct child of its frame, stacking order unchanged"
        );
    }
}
