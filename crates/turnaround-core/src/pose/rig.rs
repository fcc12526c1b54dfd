//! Layer names the character rig is expected to carry. Matching is exact and case-sensitive.

pub const HEAD: &str = "Head";
pub const BODY: &str = "Body";
/// Name given to the exhausted source poses once the run completes.
pub const FRONTAL: &str = "Frontal";
/// Container created by the character template.
pub const CHARACTER: &str = "+Perso";

pub const BACKGROUND: &str = "BG";
pub const LEFT_EYE: &str = "+Left Eye";
pub const RIGHT_EYE: &str = "+Right Eye";
pub const LEFT_EYEBROW: &str = "+Left Eyebrow";
pub const RIGHT_EYEBROW: &str = "+Right Eyebrow";
pub const NOSE: &str = "Nose";
pub const MOUTH: &str = "Bouches";
pub const LEFT_EAR: &str = "Left Ear";
pub const RIGHT_EAR: &str = "Right Ear";
pub const HAIR: &str = "Cheveux";

pub const HIPS: &str = "Hips";
pub const TORSO: &str = "Torso";
pub const LEFT_ARM: &str = "+Left Arm";
pub const RIGHT_ARM: &str = "+Right Arm";
pub const LEFT_LEG: &str = "+Left Leg";
pub const RIGHT_LEG: &str = "+Right Leg";

/// Features every head pose must carry.
pub const HEAD_FEATURES: [&str; 9] = [
    BACKGROUND,
    LEFT_EYE,
    RIGHT_EYE,
    LEFT_EYEBROW,
    RIGHT_EYEBROW,
    NOSE,
    MOUTH,
    LEFT_EAR,
    RIGHT_EAR,
];

/// Features every body pose must carry.
pub const BODY_FEATURES: [&str; 6] = [HIPS, TORSO, RIGHT_ARM, LEFT_ARM, LEFT_LEG, RIGHT_LEG];

/// The pupil is the first shape of the eye's third sub-layer.
pub const PUPIL_LAYER_INDEX: usize = 2;

/// Tilt applied to the mouth over the quarter turns, in degrees.
pub const MOUTH_TILT_DEGREES: f64 = -4.5;

/// Foreshortening applied to the far limbs of every body frame.
pub const FAR_LIMB_SCALE: f64 = 90.0;

/// Frame name prefixes.
pub const QUARTER_PREFIX: &str = "Left Quarter";
pub const PROFILE_NAME: &str = "Left Profile";
pub const BACK_NAME: &str = "Left Profile Dos";
