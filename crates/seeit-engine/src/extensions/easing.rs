// extensions/easing.rs
//
// Easing and interpolation used by renderers to turn journey intensity and
// renderer-local timers into visual parameters. Pure math.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Easing curve applied to a normalized time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start and end; used for the precision target's lagging drift.
    QuadInOut,
    /// Smooth sine; used for distractor wander legs.
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]. NaN reads as 0.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two points.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Interpolate points with easing.
#[inline]
pub fn ease_vec2(a: Vec2, b: Vec2, t: f32, easing: Easing) -> Vec2 {
    lerp_vec2(a, b, easing.apply(t))
}
