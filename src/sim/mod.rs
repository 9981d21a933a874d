//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (arena handle order, firing order within a group)
//! - No rendering or platform dependencies

pub mod ai;
pub mod arrow;
pub mod body;
pub mod collision;
pub mod group;
pub mod player;
pub mod state;
pub mod tick;
pub mod vector;

pub use ai::{AiBrain, Plan};
pub use arrow::{Arrow, ArrowKind, Shot};
pub use body::{Actor, ActorArena, ActorId, ActorKind, ActorTag, Body, Side};
pub use collision::{Clash, first_arrow_hit, resolve_arrow_clashes};
pub use group::{ActorGroup, ArrowView, OpponentView};
pub use player::{Player, PlayerIntent, PlayerState};
pub use state::{
    ActorPose, EffectRequest, MatchOutcome, MatchPhase, MatchState, PoseState, RenderFrame,
};
pub use tick::{TickInput, tick};
