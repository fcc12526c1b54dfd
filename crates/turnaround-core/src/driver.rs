//! # Animation Driver
//!
//! Runs a complete turn-around on a rigged document:
//! validate the rig, measure it, read the inputs, run the head and body
//! engines, then hand the document back with fresh empty `Head`/`Body` layers.
//!
//! Inputs arrive through an [`InputProvider`] and failures leave through a
//! [`Diagnostics`] sink, so the engines never prompt or alert themselves.

use crate::config::{CancelFlag, RunContext, TurnConfig, MIN_FRAMES};
use crate::errors::TurnError;
use crate::pose::{self, body, head, pupil_mut, rig, Frame, ReferenceMeasurements};
use crate::scene::{SceneGraph, SceneNode};
use crate::tree::SkippedItem;
use crate::types::NodeId;
use tracing::{info, instrument};

/// Source of the two user inputs of a run.
pub trait InputProvider {
    /// Raw frame count as typed by the user, `None` when dismissed.
    fn frame_count(&self) -> Option<String>;
    fn nose_points_right(&self) -> bool;
}

/// Sink for user-facing warnings and errors.
pub trait Diagnostics {
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Inputs fixed up front, e.g. from command-line flags.
#[derive(Clone, Debug, Default)]
pub struct StaticInput {
    pub frames: Option<String>,
    pub nose_points_right: bool,
}

impl StaticInput {
    pub fn new(frames: impl Into<String>, nose_points_right: bool) -> Self {
        Self {
            frames: Some(frames.into()),
            nose_points_right,
        }
    }
}

impl InputProvider for StaticInput {
    fn frame_count(&self) -> Option<String> {
        self.frames.clone()
    }

    fn nose_points_right(&self) -> bool {
        self.nose_points_right
    }
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Keeps every message, for callers that report them later.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectedDiagnostics {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Diagnostics for CollectedDiagnostics {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Validates a user-typed frame count.
pub fn parse_frame_count(raw: &str) -> Result<usize, TurnError> {
    let frames: usize = raw
        .trim()
        .parse()
        .map_err(|_| TurnError::InvalidInput(format!("'{}' is not a frame count", raw.trim())))?;
    if frames < MIN_FRAMES {
        return Err(TurnError::InvalidInput(format!(
            "frame count must be at least {}, got {}",
            MIN_FRAMES, frames
        )));
    }
    Ok(frames)
}

/// Reads and validates both inputs.
pub fn read_config(input: &dyn InputProvider) -> Result<TurnConfig, TurnError> {
    let raw = input
        .frame_count()
        .ok_or_else(|| TurnError::InvalidInput("no frame count was given".to_string()))?;
    Ok(TurnConfig {
        frames: parse_frame_count(&raw)?,
        nose_points_right: input.nose_points_right(),
    })
}

/// Takes the reference measurements from the frontal head and body.
pub fn measure(
    scene: &SceneGraph,
    head: NodeId,
    body: NodeId,
) -> Result<ReferenceMeasurements, TurnError> {
    let bounds = |parent: NodeId, name: &str| {
        scene
            .require_by_name(parent, name)
            .and_then(|id| scene.require_bounds(id))
    };
    let background = bounds(head, rig::BACKGROUND)?;
    Ok(ReferenceMeasurements {
        bg_left: background.left,
        bg_right: background.right,
        eye_width: bounds(head, rig::LEFT_EYE)?.width(),
        nose_width: bounds(head, rig::NOSE)?.width(),
        mouth_width: bounds(head, rig::MOUTH)?.width(),
        right_arm_x: bounds(body, rig::RIGHT_ARM)?.center().x,
        left_arm_x: bounds(body, rig::LEFT_ARM)?.center().x,
        right_leg_x: bounds(body, rig::RIGHT_LEG)?.center().x,
        left_leg_x: bounds(body, rig::LEFT_LEG)?.center().x,
    })
}

/// Outcome of a completed run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub config: TurnConfig,
    pub measurements: ReferenceMeasurements,
    /// Head frames first, in creation order, then body frames.
    pub frames: Vec<Frame>,
    pub skipped: Vec<SkippedItem>,
    /// The fresh empty containers left for manual work.
    pub new_head: NodeId,
    pub new_body: NodeId,
}

impl RunSummary {
    pub fn head_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames
            .iter()
            .filter(|frame| matches!(frame.part, pose::Part::Head(_)))
    }

    pub fn body_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames
            .iter()
            .filter(|frame| frame.part == pose::Part::Body)
    }
}

/// Orchestrates one turn-around run.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    cancel: CancelFlag,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares `cancel` with the run; setting it stops at the next frame.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs the full turn-around, reporting any failure to `diagnostics` before returning it.
    ///
    /// Nothing in the scene is touched until the rig and the inputs are validated.
    #[instrument(level = "info", skip_all)]
    pub fn run(
        &self,
        scene: &mut SceneGraph,
        input: &dyn InputProvider,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<RunSummary, TurnError> {
        self.execute(scene, input, diagnostics)
            .inspect_err(|err| diagnostics.error(&err.to_string()))
    }

    fn execute(
        &self,
        scene: &mut SceneGraph,
        input: &dyn InputProvider,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<RunSummary, TurnError> {
        let root = scene.root();
        let head = scene.require_by_name(root, rig::HEAD)?;
        let body = scene.require_by_name(root, rig::BODY)?;
        for feature in rig::HEAD_FEATURES {
            scene.require_by_name(head, feature)?;
        }
        for feature in rig::BODY_FEATURES {
            scene.require_by_name(body, feature)?;
        }
        for eye in [rig::LEFT_EYE, rig::RIGHT_EYE] {
            let id = scene.require_by_name(head, eye)?;
            pupil_mut(scene, id)?;
        }

        let measurements = measure(scene, head, body)?;
        let config = read_config(input)?;
        info!(
            frames = config.frames,
            nose_points_right = config.nose_points_right,
            "Starting turn-around"
        );

        let ctx = RunContext::new(config, measurements).with_cancel(self.cancel.clone());
        let mut output = head::run(scene, head, &ctx)?;
        output.extend(body::run(scene, body, &ctx)?);
        for skipped in &output.skipped {
            diagnostics.warn(&skipped.to_string());
        }

        scene.rename(head, rig::FRONTAL)?;
        scene.rename(body, rig::FRONTAL)?;
        let new_body = scene.add_node(SceneNode::new(rig::BODY));
        scene.insert_child(root, 0, new_body);
        let new_head = scene.add_node(SceneNode::new(rig::HEAD));
        scene.insert_child(root, 0, new_head);

        info!(
            frames = output.frames.len(),
            skipped = output.skipped.len(),
            "Turn-around complete"
        );
        Ok(RunSummary {
            config,
            measurements,
            frames: output.frames,
            skipped: output.skipped,
            new_head,
            new_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_parsing() {
        assert_eq!(parse_frame_count("4"), Ok(4));
        assert_eq!(parse_frame_count(" 2 "), Ok(2));
        assert!(matches!(parse_frame_count("1"), Err(TurnError::InvalidInput(_))));
        assert!(matches!(parse_frame_count("abc"), Err(TurnError::InvalidInput(_))));
        assert!(matches!(parse_frame_count("-3"), Err(TurnError::InvalidInput(_))));
    }

    #[test]
    fn missing_frame_count_is_invalid() {
        let input = StaticInput::default();
        assert!(matches!(read_config(&input), Err(TurnError::InvalidInput(_))));
    }
}
