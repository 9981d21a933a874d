//! Actor groups: one player plus the arrows it fired
//!
//! A group only holds handles into the [`ActorArena`]. The opposing group is
//! addressed by [`Side`], and anything a player needs to know about it is read
//! through an [`OpponentView`] snapshot taken before the mutation phases.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arrow::{Arrow, Shot};
use super::body::{Actor, ActorArena, ActorId, ActorKind, Body, Side};

/// Read-only view of an arrow for AI threat assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowView {
    pub pos: Vec2,
    pub heading: f32,
}

/// Snapshot of the opposing group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpponentView {
    pub pos: Vec2,
    pub alive: bool,
    pub damaged: bool,
    pub arrows: Vec<ArrowView>,
}

impl OpponentView {
    /// Nearest arrow to `from` with its squared distance
    pub fn nearest_arrow(&self, from: Vec2) -> Option<(f32, ArrowView)> {
        self.arrows
            .iter()
            .map(|a| (a.pos.distance_squared(from), *a))
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

#[derive(Debug, Clone)]
pub struct ActorGroup {
    side: Side,
    player: ActorId,
    arrows: Vec<ActorId>,
    pending_removal: Vec<ActorId>,
}

impl ActorGroup {
    pub fn new(side: Side, player: ActorId) -> Self {
        Self {
            side,
            player,
            arrows: Vec::new(),
            pending_removal: Vec::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Side of the opposing group
    pub fn enemy(&self) -> Side {
        self.side.opponent()
    }

    pub fn player(&self) -> ActorId {
        self.player
    }

    /// Fired arrows in firing order
    pub fn arrows(&self) -> &[ActorId] {
        &self.arrows
    }

    pub fn add_arrow(&mut self, id: ActorId) {
        self.arrows.push(id);
    }

    /// Spawn every arrow of `shot` into the arena and track it
    pub fn spawn_shot(&mut self, arena: &mut ActorArena, shot: &Shot) -> usize {
        let side = self.side;
        let arrows = shot.arrows();
        let count = arrows.len();
        for (arrow, body) in arrows {
            let id = arena.insert_with(|id| arrow_actor(id, side, arrow, body));
            self.add_arrow(id);
        }
        count
    }

    /// Request removal at the next compaction. Repeated requests are ignored.
    pub fn remove_arrow(&mut self, id: ActorId) {
        if self.arrows.contains(&id) && !self.pending_removal.contains(&id) {
            self.pending_removal.push(id);
        }
    }

    pub fn is_pending_removal(&self, id: ActorId) -> bool {
        self.pending_removal.contains(&id)
    }

    /// Live arrows not yet flagged for removal, in firing order
    pub fn active_arrows(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.arrows
            .iter()
            .copied()
            .filter(|id| !self.pending_removal.contains(id))
    }

    /// Apply pending removals; returns how many arrows were dropped
    pub fn compact(&mut self, arena: &mut ActorArena) -> usize {
        if self.pending_removal.is_empty() {
            return 0;
        }
        let pending = std::mem::take(&mut self.pending_removal);
        self.arrows.retain(|id| !pending.contains(id));
        for id in &pending {
            arena.remove(*id);
        }
        pending.len()
    }

    /// Snapshot of this group as its opponent sees it
    pub fn view(&self, arena: &ActorArena) -> OpponentView {
        let player = arena.get(self.player);
        let arrows = self
            .active_arrows()
            .filter_map(|id| arena.get(id))
            .map(|a| ArrowView {
                pos: a.body.pos,
                heading: a.body.heading,
            })
            .collect();
        OpponentView {
            pos: player.map(|p| p.body.pos).unwrap_or_default(),
            alive: player.is_some_and(|p| !p.is_eliminated()),
            damaged: player
                .and_then(|a| a.player())
                .is_some_and(|p| p.is_damaged()),
            arrows,
        }
    }
}

fn arrow_actor(id: ActorId, side: Side, arrow: Arrow, body: Body) -> Actor {
    let mut actor = Actor::new(id, side, body, arrow.radius(), ActorKind::Arrow(arrow));
    actor.rotation = body.heading;
    actor
}
