//! Head turn.
//!
//! Stages run in `HeadStage::ALL` order:
//! 1. `n` quarter turns, each duplicated from the frontal head.
//! 2. One profile, duplicated from the last quarter turn; the far-side features are dropped.
//! 3. `ceil((n + 1) / 2)` profile frames, each duplicated from the profile.
//! 4. `ceil(n / 2) - 1` back-transition frames, duplicated from the last profile frame.
//! 6. One back view, duplicated from the frontal head with the face removed.

use super::placement::{head_placements, PlacementTable};
use super::{profile_frame_count, remove_features, rig, send_to_back, shift_pupil, HeadStage, Part, PoseOutput};
use crate::animation::TurnEasing;
use crate::config::RunContext;
use crate::errors::TurnError;
use crate::geometry::{mirror_horizontally, rotate_about, translate_and_scale_x};
use crate::scene::SceneGraph;
use crate::types::NodeId;
use std::f64::consts::PI;
use tracing::info;

/// Generates every head frame from the frontal `head` layer.
pub fn run(scene: &mut SceneGraph, head: NodeId, ctx: &RunContext) -> Result<PoseOutput, TurnError> {
    let mut turn = HeadTurn {
        scene,
        head,
        ctx,
        out: PoseOutput::default(),
    };

    // Pose each stage continues from; starts at the frontal head.
    let mut cursor = head;
    let mut profile = head;
    for stage in HeadStage::ALL {
        info!(stage = stage.index(), frames = stage.frame_count(ctx.n()), "Head stage");
        let table = head_placements(stage, &ctx.measurements).unwrap_or_default();
        match stage {
            HeadStage::QuarterTurns => cursor = turn.quarter_turns(&table)?,
            HeadStage::Profile => {
                profile = turn.profile(cursor, &table)?;
                cursor = profile;
            }
            HeadStage::ProfileFrames => cursor = turn.profile_frames(profile, &table)?,
            HeadStage::BackTransition => turn.back_transition(cursor, &table)?,
            HeadStage::Back => turn.back()?,
        }
    }
    Ok(turn.out)
}

struct HeadTurn<'a> {
    scene: &'a mut SceneGraph,
    head: NodeId,
    ctx: &'a RunContext,
    out: PoseOutput,
}

impl HeadTurn<'_> {
    fn start(&mut self, source: NodeId, name: String, stage: HeadStage) -> Result<NodeId, TurnError> {
        self.out
            .start_frame(self.scene, source, name, Part::Head(stage), self.ctx)
    }

    fn quarter_turns(&mut self, table: &PlacementTable) -> Result<NodeId, TurnError> {
        let n = self.ctx.n();
        let eye_width = self.ctx.measurements.eye_width;
        let mut last = self.head;
        for j in 1..=n {
            let frame = self.start(
                self.head,
                format!("{} {}", rig::QUARTER_PREFIX, j),
                HeadStage::QuarterTurns,
            )?;
            let gaze = TurnEasing::QuarterSine.at_step(j, n);

            for id in self.scene.collect_all(frame) {
                let name = self.scene.name(id).to_string();
                let Some(placement) = table.get(&name) else {
                    continue;
                };
                let x = self.scene.position(id)?.x;
                let dx = -(j as f64 * (x - placement.target_x) / n as f64);
                translate_and_scale_x(self.scene, id, dx, placement.scale_percent, j, n)?;

                let squeeze = placement.scale_percent / 100.0;
                match name.as_str() {
                    rig::MOUTH => {
                        rotate_about(self.scene, id, rig::MOUTH_TILT_DEGREES, j, n)?;
                        // Mouth shapes are squeezed again in place to cancel the drift of the tilt.
                        for child in self.scene.children(id).to_vec() {
                            translate_and_scale_x(self.scene, child, 0.0, placement.scale_percent, j, n)?;
                        }
                    }
                    rig::RIGHT_EYE => {
                        shift_pupil(self.scene, id, -gaze * squeeze * eye_width / 8.0)?;
                    }
                    rig::LEFT_EYE => {
                        shift_pupil(self.scene, id, -gaze * squeeze * eye_width / 4.0)?;
                    }
                    _ => {}
                }
            }

            if !self.ctx.config.nose_points_right {
                let nose = self.scene.require_by_name(frame, rig::NOSE)?;
                mirror_horizontally(self.scene, nose)?;
            }
            let far_ear = self.scene.require_by_name(frame, rig::RIGHT_EAR)?;
            send_to_back(self.scene, frame, far_ear);
            last = frame;
        }
        Ok(last)
    }

    fn profile(&mut self, last_quarter: NodeId, table: &PlacementTable) -> Result<NodeId, TurnError> {
        let n = self.ctx.n();
        let frame = self.start(last_quarter, rig::PROFILE_NAME.to_string(), HeadStage::Profile)?;
        for id in self.scene.collect_all(frame) {
            let Some(placement) = table.get(self.scene.name(id)) else {
                continue;
            };
            let x = self.scene.position(id)?.x;
            translate_and_scale_x(
                self.scene,
                id,
                placement.target_x - x,
                placement.scale_percent,
                n,
                n,
            )?;
        }
        remove_features(
            self.scene,
            frame,
            &[rig::RIGHT_EYE, rig::RIGHT_EYEBROW, rig::MOUTH, rig::RIGHT_EAR],
        )?;
        Ok(frame)
    }

    fn profile_frames(&mut self, profile: NodeId, table: &PlacementTable) -> Result<NodeId, TurnError> {
        let n = self.ctx.n();
        let count = profile_frame_count(n);
        let eye_width = self.ctx.measurements.eye_width;
        let mut last = profile;
        for j in 1..=count {
            let frame = self.start(
                profile,
                format!("{} {}", rig::PROFILE_NAME, j),
                HeadStage::ProfileFrames,
            )?;
            for id in self.scene.collect_all(frame) {
                let name = self.scene.name(id).to_string();
                let Some(placement) = table.get(&name) else {
                    continue;
                };
                let x = self.scene.position(id)?.x;
                let dx = -(j as f64 * (x - placement.target_x) / n as f64);
                translate_and_scale_x(self.scene, id, dx, placement.scale_percent, j, n)?;

                // The eye glances back once the stage is past its midpoint.
                if name == rig::LEFT_EYE && j as f64 > count as f64 / 2.0 {
                    let glance = (PI * (j - 1) as f64 / count as f64).sin();
                    shift_pupil(self.scene, id, glance * eye_width / 8.0)?;
                }
            }
            let nose = self.scene.require_by_name(frame, rig::NOSE)?;
            send_to_back(self.scene, frame, nose);
            last = frame;
        }
        Ok(last)
    }

    fn back_transition(&mut self, source: NodeId, table: &PlacementTable) -> Result<(), TurnError> {
        let n = self.ctx.n();
        let offset = profile_frame_count(n);
        for j in 1..=HeadStage::BackTransition.frame_count(n) {
            let frame = self.start(
                source,
                format!("{} {}", rig::PROFILE_NAME, j + offset),
                HeadStage::BackTransition,
            )?;
            for id in self.scene.collect_all(frame) {
                let Some(placement) = table.get(self.scene.name(id)) else {
                    continue;
                };
                let x = self.scene.position(id)?.x;
                let dx = -((j + 1) as f64 * (x - placement.target_x) / n as f64);
                translate_and_scale_x(self.scene, id, dx, placement.scale_percent, j, n)?;
                mirror_horizontally(self.scene, id)?;
            }
            remove_features(self.scene, frame, &[rig::LEFT_EYE, rig::LEFT_EYEBROW, rig::NOSE])?;
        }
        Ok(())
    }

    fn back(&mut self) -> Result<(), TurnError> {
        let frame = self.start(self.head, rig::BACK_NAME.to_string(), HeadStage::Back)?;
        remove_features(
            self.scene,
            frame,
            &[
                rig::LEFT_EYE,
                rig::LEFT_EYEBROW,
                rig::RIGHT_EYE,
                rig::RIGHT_EYEBROW,
                rig::NOSE,
                rig::MOUTH,
            ],
        )?;
        mirror_horizontally(self.scene, frame)
    }
}
