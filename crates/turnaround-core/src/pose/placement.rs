//! Per-feature placement tables and the reference measurements they are derived from.

use super::rig;
use super::HeadStage;
use serde::{Deserialize, Serialize};

/// Where a feature should end up once its stage completes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Final horizontal center, in document units.
    pub target_x: f64,
    /// Final horizontal scale, in percent.
    pub scale_percent: f64,
}

impl Placement {
    pub fn new(target_x: f64, scale_percent: f64) -> Self {
        Self {
            target_x,
            scale_percent,
        }
    }
}

/// Ordered mapping from feature name to placement.
///
/// Small and looked up by linear scan, like every other name lookup in the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacementTable {
    entries: Vec<(&'static str, Placement)>,
}

impl PlacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: &'static str, placement: Placement) -> Self {
        self.entries.push((feature, placement));
        self
    }

    pub fn get(&self, feature: &str) -> Option<Placement> {
        self.entries
            .iter()
            .find(|(name, _)| *name == feature)
            .map(|(_, placement)| *placement)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Measurements taken once from the frontal pose at the start of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMeasurements {
    /// Left edge of the head background.
    pub bg_left: f64,
    /// Right edge of the head background.
    pub bg_right: f64,
    pub eye_width: f64,
    pub nose_width: f64,
    pub mouth_width: f64,
    /// Horizontal centers of the limbs.
    pub right_arm_x: f64,
    pub left_arm_x: f64,
    pub right_leg_x: f64,
    pub left_leg_x: f64,
}

/// Fixed nudge, in document units, applied to the profile nose and the last ear position.
const PROFILE_NUDGE: f64 = 6.0;

/// Share of the background width, from the left edge, where the far ear settles.
const FAR_EAR_RATIO: f64 = 0.90;

/// Placement table for a head stage. `None` for stages that move nothing.
pub fn head_placements(stage: HeadStage, m: &ReferenceMeasurements) -> Option<PlacementTable> {
    let left = m.bg_left;
    let eye = m.eye_width;
    match stage {
        HeadStage::QuarterTurns => {
            let left_eye = left + 5.0 / 4.0 * eye;
            let right_eye = left + 1.0 / 3.0 * eye;
            let far_ear = FAR_EAR_RATIO * left + (1.0 - FAR_EAR_RATIO) * m.bg_right;
            Some(
                PlacementTable::new()
                    .with(rig::LEFT_EYE, Placement::new(left_eye, 100.0))
                    .with(rig::RIGHT_EYE, Placement::new(right_eye, 50.0))
                    .with(rig::NOSE, Placement::new(left + m.nose_width, 100.0))
                    .with(rig::MOUTH, Placement::new(left + m.mouth_width / 2.0, 87.0))
                    .with(
                        rig::LEFT_EAR,
                        Placement::new((left + m.bg_right) / 2.0 + eye / 2.0, 100.0),
                    )
                    .with(rig::RIGHT_EAR, Placement::new(far_ear, 100.0))
                    .with(rig::LEFT_EYEBROW, Placement::new(left_eye, 100.0))
                    .with(rig::RIGHT_EYEBROW, Placement::new(right_eye, 50.0)),
            )
        }
        HeadStage::Profile => {
            let left_eye = left + eye;
            Some(
                PlacementTable::new()
                    .with(
                        rig::NOSE,
                        Placement::new(left - m.nose_width / 2.0 + PROFILE_NUDGE, 100.0),
                    )
                    .with(rig::LEFT_EYE, Placement::new(left_eye, 100.0))
                    .with(rig::LEFT_EYEBROW, Placement::new(left_eye, 100.0))
                    .with(rig::LEFT_EAR, Placement::new(left + 2.0 * eye, 100.0)),
            )
        }
        HeadStage::ProfileFrames => {
            let left_eye = left + eye / 4.0;
            Some(
                PlacementTable::new()
                    .with(rig::NOSE, Placement::new(left + m.nose_width, 50.0))
                    .with(rig::LEFT_EYE, Placement::new(left_eye, 25.0))
                    .with(rig::LEFT_EYEBROW, Placement::new(left_eye, 25.0))
                    .with(rig::LEFT_EAR, Placement::new(left + eye / 2.0, 100.0)),
            )
        }
        HeadStage::BackTransition => Some(
            PlacementTable::new()
                .with(rig::LEFT_EAR, Placement::new(left + PROFILE_NUDGE, 100.0)),
        ),
        HeadStage::Back => None,
    }
}

/// Placement table for the body turn: each limb heads for its opposite's frontal center.
pub fn body_placements(m: &ReferenceMeasurements) -> PlacementTable {
    PlacementTable::new()
        .with(rig::RIGHT_ARM, Placement::new(m.left_arm_x, 100.0))
        .with(rig::LEFT_ARM, Placement::new(m.right_arm_x, 100.0))
        .with(rig::LEFT_LEG, Placement::new(m.right_leg_x, 100.0))
        .with(rig::RIGHT_LEG, Placement::new(m.left_leg_x, 100.0))
}
