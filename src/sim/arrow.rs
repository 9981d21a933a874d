//! Projectile variants
//!
//! Shortbow arrows leave fast and bleed speed toward a slow terminal speed; a
//! longbow shot is a rigid formation of six fast lethal segments.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::vector::from_angle;

pub const SHORTBOW_LAUNCH_SPEED: f32 = 24.0;
pub const SHORTBOW_TERMINAL_SPEED: f32 = 8.0;
/// Fraction of the gap to terminal speed closed each tick
pub const SHORTBOW_DRAG: f32 = 0.1;
pub const SHORTBOW_RADIUS: f32 = 8.0;
pub const SHORTBOW_HALF_LENGTH: f32 = 20.0;

pub const LONGBOW_SPEED: f32 = 64.0;
pub const LONGBOW_RADIUS: f32 = 16.0;
pub const LONGBOW_HALF_LENGTH: f32 = 16.0;
/// Segments per longbow volley (5 shafts + 1 head)
pub const LONGBOW_SEGMENTS: usize = 6;
pub const LONGBOW_SPACING: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowKind {
    Shortbow,
    /// One segment of a longbow formation; `head` marks the leading segment
    Longbow { head: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub kind: ArrowKind,
    pub half_length: f32,
}

impl Arrow {
    pub fn shortbow() -> Self {
        Self {
            kind: ArrowKind::Shortbow,
            half_length: SHORTBOW_HALF_LENGTH,
        }
    }

    pub fn longbow(head: bool) -> Self {
        Self {
            kind: ArrowKind::Longbow { head },
            half_length: LONGBOW_HALF_LENGTH,
        }
    }

    pub fn radius(&self) -> f32 {
        match self.kind {
            ArrowKind::Shortbow => SHORTBOW_RADIUS,
            ArrowKind::Longbow { .. } => LONGBOW_RADIUS,
        }
    }

    pub fn launch_speed(&self) -> f32 {
        match self.kind {
            ArrowKind::Shortbow => SHORTBOW_LAUNCH_SPEED,
            ArrowKind::Longbow { .. } => LONGBOW_SPEED,
        }
    }

    /// A lethal hit eliminates the target; a non-lethal one stuns it
    pub fn is_lethal(&self) -> bool {
        matches!(self.kind, ArrowKind::Longbow { .. })
    }

    /// Launch body at `origin` travelling along `angle`
    pub fn launch_body(&self, origin: Vec2, angle: f32) -> Body {
        let mut body = Body::new(origin);
        body.heading = angle;
        body.speed = self.launch_speed();
        body.vel = from_angle(angle, body.speed);
        body
    }

    /// One tick of projectile physics. Heading is locked at spawn; only speed changes.
    pub fn step(&self, body: &mut Body) {
        if self.kind == ArrowKind::Shortbow {
            body.speed += (SHORTBOW_TERMINAL_SPEED - body.speed) * SHORTBOW_DRAG;
        }
        body.vel = from_angle(body.heading, body.speed);
        body.integrate();
    }

    /// Whether `pos` has left the arena extended by this arrow's half-length
    pub fn is_out_of_bounds(&self, pos: Vec2, arena_size: f32) -> bool {
        let lo = -self.half_length;
        let hi = arena_size + self.half_length;
        pos.x < lo || pos.x > hi || pos.y < lo || pos.y > hi
    }
}

/// A request to fire, produced by a player's decision step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shot {
    Shortbow { origin: Vec2, angle: f32 },
    Longbow { origin: Vec2, angle: f32 },
}

impl Shot {
    /// Arrows (with their launch bodies) making up this shot, tail first
    pub fn arrows(&self) -> Vec<(Arrow, Body)> {
        match *self {
            Shot::Shortbow { origin, angle } => {
                let arrow = Arrow::shortbow();
                vec![(arrow, arrow.launch_body(origin, angle))]
            }
            Shot::Longbow { origin, angle } => (0..LONGBOW_SEGMENTS)
                .map(|i| {
                    let arrow = Arrow::longbow(i == LONGBOW_SEGMENTS - 1);
                    let pos = origin + from_angle(angle, i as f32 * LONGBOW_SPACING);
                    (arrow, arrow.launch_body(pos, angle))
                })
                .collect(),
        }
    }
}
