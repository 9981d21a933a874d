//! Bow Duel - A top-down two-player bow duel
//!
//! Core modules:
//! - `sim`: Fixed-tick combat simulation (actors, AI, collisions, match flow)
//! - `input`: Per-tick input snapshot and button cue tracking
//! - `clock`: Fixed timestep accumulator for variable-rate hosts
//! - `settings`: Match configuration
//! - `scoreboard`: In-process tally of match results

pub mod clock;
pub mod input;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use scoreboard::Scoreboard;
pub use settings::{ControllerKind, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate every tick-denominated duration assumes
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep (seconds)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default square arena side length
    pub const DEFAULT_ARENA_SIZE: f32 = 800.0;

    /// Player body size (square sprite, collision circle inscribed)
    pub const BODY_SIZE: f32 = 40.0;
    pub const HALF_BODY: f32 = BODY_SIZE / 2.0;

    /// Movement force per tick at full strength
    pub const MOVE_FORCE: f32 = 1.0;
    /// Force multiplier while a bow is drawn
    pub const DRAW_FORCE_SCALE: f32 = 0.25;
    /// Velocity snapped to on direction reversal (times the intent)
    pub const REVERSAL_SPEED: f32 = 3.0;
    pub const MAX_SPEED_X: f32 = 10.0;
    pub const MAX_SPEED_Y: f32 = 7.0;
    pub const FRICTION: f32 = 0.92;
    /// Velocity factor applied on an arena wall bounce
    pub const WALL_RESTITUTION: f32 = -0.5;

    /// Damage stun: 0.3 s worth of ticks
    pub const DAMAGE_TICKS: u32 = 18;
    /// Longbow charge needed to release a volley
    pub const HUMAN_LONGBOW_CHARGE: u32 = 30;
    pub const AI_LONGBOW_CHARGE: u32 = 120;
    /// Ticks between shortbow arrows while the draw is sustained
    pub const SHORTBOW_CADENCE: u32 = 12;

    /// Exponential screen shake falloff (per second), about 0.9 per tick
    pub const SHAKE_FALLOFF: f32 = 6.0;
    /// Linear screen shake decay (units per second) on top of the falloff,
    /// so the shake settles at exactly zero
    pub const SHAKE_DECAY: f32 = 50.0;
}

/// Normalize an angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
