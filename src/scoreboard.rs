//! Match result tally
//!
//! Kept in memory for the life of the process; serializable so a host can
//! persist it however it likes.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::sim::{MatchOutcome, Side};

/// Maximum number of recent results to keep
pub const MAX_RECENT_RESULTS: usize = 10;

/// A single finished match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub outcome: MatchOutcome,
    /// Ticks from the start of the countdown to resolution
    pub duration_ticks: u64,
}

impl MatchRecord {
    pub fn duration_secs(&self) -> f32 {
        self.duration_ticks as f32 / TICK_RATE as f32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Wins indexed by [`Side::index`]
    pub wins: [u32; 2],
    pub draws: u32,
    /// Most recent first
    pub recent: Vec<MatchRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: MatchOutcome, duration_ticks: u64) {
        match outcome {
            MatchOutcome::Winner(side) => self.wins[side.index()] += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
        self.recent.insert(
            0,
            MatchRecord {
                outcome,
                duration_ticks,
            },
        );
        self.recent.truncate(MAX_RECENT_RESULTS);
        log::info!(
            "Score {} - {} ({} draws)",
            self.wins[0],
            self.wins[1],
            self.draws
        );
    }

    pub fn wins(&self, side: Side) -> u32 {
        self.wins[side.index()]
    }

    pub fn matches_played(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.draws
    }

    /// Side with more wins, if any
    pub fn leader(&self) -> Option<Side> {
        match self.wins[0].cmp(&self.wins[1]) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches_played() == 0
    }
}
