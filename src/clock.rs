//! Fixed timestep accumulator
//!
//! Hosts run at whatever frame rate they like and feed elapsed wall time in;
//! the simulation only ever advances in whole [`SIM_DT`] ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame the accumulator will account for (seconds)
pub const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds of wall time and return how many ticks to run.
    ///
    /// Long frames are clamped and at most [`MAX_SUBSTEPS`] ticks are handed out
    /// per call, so a stalled host cannot spiral.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / SIM_DT).clamp(0.0, 1.0)
    }

    /// Drop any banked time (after a pause or a reset)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
