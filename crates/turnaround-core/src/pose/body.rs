//! Body turn: one eased loop over `2n + 2` frames, quarter to back.
//!
//! Limbs slide towards their opposite's frontal position. Every frame is
//! duplicated from the frontal body and sent to the bottom of the body's parent.

use super::placement::body_placements;
use super::{body_frame_count, rig, send_to_back, Part, PoseOutput};
use crate::animation::TurnEasing;
use crate::config::RunContext;
use crate::errors::TurnError;
use crate::geometry::{mirror_horizontally, resize_from_anchor, translate_and_scale_x};
use crate::scene::SceneGraph;
use crate::types::{Anchor, NodeId};
use keyframe::EasingFunction;
use tracing::info;

/// Name of body frame `k` (1-based) for `n` in-betweens.
pub fn frame_name(k: usize, n: usize) -> String {
    if k == n + 1 {
        rig::PROFILE_NAME.to_string()
    } else if k == body_frame_count(n) {
        rig::BACK_NAME.to_string()
    } else if k > n + 1 {
        format!("{} {}", rig::PROFILE_NAME, k - n)
    } else {
        format!("{} {}", rig::QUARTER_PREFIX, k)
    }
}

/// Generates every body frame from the frontal `body` layer.
pub fn run(scene: &mut SceneGraph, body: NodeId, ctx: &RunContext) -> Result<PoseOutput, TurnError> {
    let n = ctx.n();
    let total = body_frame_count(n);
    let table = body_placements(&ctx.measurements);
    let stack = scene
        .parent(body)
        .ok_or_else(|| TurnError::DetachedNode(scene.name(body).to_string()))?;
    info!(frames = total, "Body turn");

    let mut out = PoseOutput::default();
    for j in 0..total {
        let k = j + 1;
        let name = frame_name(k, n);
        let is_back = k == total;
        let frame = out.start_frame(scene, body, name, Part::Body, ctx)?;
        send_to_back(scene, stack, frame);

        // Past the profile both arms are seen from behind.
        let arms_turned = j > n + 1;
        let progress = TurnEasing::EaseInOutSine.y((j + 2) as f64 / (total + 1) as f64);
        for id in scene.collect_all(frame) {
            let limb = scene.name(id).to_string();
            let Some(placement) = table.get(&limb) else {
                continue;
            };
            let x = scene.position(id)?.x;
            let dx = -progress * (x - placement.target_x);
            translate_and_scale_x(scene, id, dx, placement.scale_percent, 0, n)?;
            if arms_turned && (limb == rig::LEFT_ARM || limb == rig::RIGHT_ARM) {
                mirror_horizontally(scene, id)?;
            }
        }

        let right_arm = scene.require_by_name(frame, rig::RIGHT_ARM)?;
        let right_leg = scene.require_by_name(frame, rig::RIGHT_LEG)?;
        let left_arm = scene.require_by_name(frame, rig::LEFT_ARM)?;
        let left_leg = scene.require_by_name(frame, rig::LEFT_LEG)?;

        mirror_horizontally(scene, left_leg)?;
        send_to_back(scene, frame, right_leg);
        send_to_back(scene, frame, right_arm);
        if is_back {
            send_to_back(scene, frame, left_arm);
        }
        resize_from_anchor(scene, right_arm, rig::FAR_LIMB_SCALE, Anchor::TopCenter)?;
        resize_from_anchor(scene, right_leg, rig::FAR_LIMB_SCALE, Anchor::TopCenter)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_names_for_three_in_betweens() {
        let names: Vec<_> = (1..=body_frame_count(3)).map(|k| frame_name(k, 3)).collect();
        assert_eq!(
            names,
            [
                "Left Quarter 1",
                "Left Quarter 2",
                "Left Quarter 3",
                "Left Profile",
                "Left Profile 2",
                "Left Profile 3",
                "Left Profile 4",
                "Left Profile Dos",
            ]
        );
    }
}
