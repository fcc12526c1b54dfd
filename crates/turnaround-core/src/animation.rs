use keyframe::EasingFunction;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Easing curves used to spread a turn across in-between frames.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEasing {
    Linear,
    /// `sin(x * pi / 2)`: reaches full intensity only at `x = 1`.
    QuarterSine,
    /// `(sin((x - 0.5) * pi) + 1) / 2`.
    EaseInOutSine,
}

impl EasingFunction for TurnEasing {
    fn y(&self, x: f64) -> f64 {
        match self {
            TurnEasing::Linear => keyframe::functions::Linear.y(x),
            TurnEasing::QuarterSine => (x * PI / 2.0).sin(),
            TurnEasing::EaseInOutSine => ease_in_out_sine(x),
        }
    }
}

impl TurnEasing {
    /// Evaluates the curve at `step` out of `total` steps.
    pub fn at_step(&self, step: usize, total: usize) -> f64 {
        self.y(step as f64 / total as f64)
    }
}

/// Symmetric sine ease between 0 and 1, used by the body turn.
pub fn ease_in_out_sine(x: f64) -> f64 {
    (((x - 0.5) * PI).sin() + 1.0) / 2.0
}

/// Horizontal scale for `step` of a linear ramp from 100% to `target` over `total` steps.
pub fn stepped_scale(target: f64, step: usize, total: usize) -> f64 {
    100.0 - TurnEasing::Linear.at_step(step, total) * (100.0 - target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_sine_fixed_points() {
        assert_eq!(ease_in_out_sine(0.0), 0.0);
        assert_eq!(ease_in_out_sine(1.0), 1.0);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ease_in_out_sine_is_monotonic() {
        let mut last = ease_in_out_sine(0.0);
        for i in 1..=1000 {
            let y = ease_in_out_sine(i as f64 / 1000.0);
            assert!(y >= last, "dropped at {}", i);
            last = y;
        }
    }

    #[test]
    fn quarter_sine_hits_full_angle_on_last_step() {
        assert_eq!(TurnEasing::QuarterSine.at_step(4, 4), 1.0);
        assert_eq!(TurnEasing::QuarterSine.at_step(0, 4), 0.0);
    }

    #[test]
    fn stepped_scale_ramps_to_target() {
        assert_eq!(stepped_scale(50.0, 0, 4), 100.0);
        assert_eq!(stepped_scale(50.0, 2, 4), 75.0);
        assert_eq!(stepped_scale(50.0, 4, 4), 50.0);
    }

    #[test]
    fn linear_is_proportional() {
        assert_eq!(TurnEasing::Linear.at_step(1, 4), 0.25);
        assert_eq!(TurnEasing::Linear.at_step(3, 4), 0.75);
    }
}
