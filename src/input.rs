//! Per-tick input snapshot
//!
//! Key mapping happens in the host; the core only sees axis intents and
//! button cues. The trackers here turn raw "is held" flags into those cues.

use serde::{Deserialize, Serialize};

use crate::sim::player::PlayerIntent;

/// Ticks the shortbow button must be held before it counts as continuous fire
pub const SUSTAIN_AFTER_TICKS: u32 = 6;

/// Shortbow trigger as seen by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShortbowCue {
    #[default]
    None,
    /// Button went down this tick: single shot
    Tap,
    /// Button held past the sustain threshold: continuous fire
    Sustain,
}

/// Input for one player for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub move_x: i8,
    pub move_y: i8,
    pub shortbow: ShortbowCue,
    pub longbow_held: bool,
    pub reset: bool,
}

impl InputSnapshot {
    pub fn intent(&self) -> PlayerIntent {
        PlayerIntent {
            move_x: self.move_x.signum(),
            move_y: self.move_y.signum(),
            shortbow: self.shortbow,
            longbow_held: self.longbow_held,
            cancel_draw: false,
        }
    }
}

/// Turns a raw shortbow "held" flag into [`ShortbowCue`]s
#[derive(Debug, Clone, Default)]
pub struct ShortbowTracker {
    held_ticks: u32,
}

impl ShortbowTracker {
    pub fn update(&mut self, held: bool) -> ShortbowCue {
        if !held {
            self.held_ticks = 0;
            return ShortbowCue::None;
        }
        self.held_ticks += 1;
        if self.held_ticks == 1 {
            ShortbowCue::Tap
        } else if self.held_ticks > SUSTAIN_AFTER_TICKS {
            ShortbowCue::Sustain
        } else {
            ShortbowCue::None
        }
    }
}

/// Rising-edge detector for one-shot buttons (reset)
#[derive(Debug, Clone, Default)]
pub struct EdgeTracker {
    was_held: bool,
}

impl EdgeTracker {
    pub fn pressed(&mut self, held: bool) -> bool {
        let edge = held && !self.was_held;
        self.was_held = held;
        edge
    }
}
