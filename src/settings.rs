//! Match configuration
//!
//! Plain serde struct with defaults for every field, so a partial JSON document
//! is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ARENA_SIZE, SHAKE_DECAY};

/// Who drives a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControllerKind {
    #[default]
    Human,
    Ai,
}

impl ControllerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Human => "Human",
            ControllerKind::Ai => "AI",
        }
    }
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side length of the square arena
    pub arena_size: f32,
    /// RNG seed; `None` draws a fresh one per run
    pub seed: Option<u64>,
    pub left: ControllerKind,
    pub right: ControllerKind,
    /// Let AI players use the longbow on long-range kill plans
    pub ai_longbow: bool,
    /// Screen shake decay (units per second)
    pub shake_decay: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_size: DEFAULT_ARENA_SIZE,
            seed: None,
            left: ControllerKind::Human,
            right: ControllerKind::Ai,
            ai_longbow: false,
            shake_decay: SHAKE_DECAY,
        }
    }
}

impl Settings {
    /// AI on both sides
    pub fn demo() -> Self {
        Self {
            left: ControllerKind::Ai,
            right: ControllerKind::Ai,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded settings: arena {}, {} vs {}",
            settings.arena_size,
            settings.left.as_str(),
            settings.right.as_str()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// The configured seed, or a random one
    pub fn match_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
