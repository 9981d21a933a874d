//! 2D vector helpers on top of `glam::Vec2`
//!
//! glam already covers add/sub/scale, `length`, `length_squared`, `normalize_or_zero`,
//! `distance` and `distance_squared`. The duel also needs heading math in the
//! atan2 convention used by every actor, plus a soft magnitude limit.

use glam::Vec2;

use crate::polar_to_cartesian;

/// Vector from an angle and magnitude
#[inline]
pub fn from_angle(angle: f32, magnitude: f32) -> Vec2 {
    polar_to_cartesian(magnitude, angle)
}

pub trait VecExt {
    /// Angle of the line from `self` to `other` (`atan2(dy, dx)`).
    ///
    /// Not `Vec2::angle_to`, which measures the rotation between two directions.
    fn heading_to(self, other: Vec2) -> f32;
    /// Rescale to `max` only if the current magnitude exceeds it
    fn limit(self, max: f32) -> Vec2;
    /// Overwrite both components in place
    fn set(&mut self, x: f32, y: f32);
}

impl VecExt for Vec2 {
    #[inline]
    fn heading_to(self, other: Vec2) -> f32 {
        let d = other - self;
        d.y.atan2(d.x)
    }

    #[inline]
    fn limit(self, max: f32) -> Vec2 {
        if self.length_squared() > max * max {
            self.normalize_or_zero() * max
        } else {
            self
        }
    }

    #[inline]
    fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}
