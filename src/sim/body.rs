//! Kinematic bodies, tagged actors and the handle-indexed actor arena
//!
//! Every simulated thing is an [`Actor`]: a [`Body`] plus rotation, collision radius
//! and the [`Side`] of the group that owns it. What the actor *is* lives in
//! [`ActorKind`], and behavior is dispatched by matching on it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arrow::{Arrow, ArrowKind};
use super::player::{Player, PlayerState};
use super::state::{ActorPose, PoseState};

/// Stable handle into the [`ActorArena`]: slot index plus the slot's generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId {
    index: u32,
    generation: u32,
}

impl ActorId {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Which group an actor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Position/velocity state integrated with an explicit Euler step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Direction of travel (radians), meaningful for bodies with a locked heading
    pub heading: f32,
    /// Scalar speed along `heading`
    pub speed: f32,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        assert!(pos.is_finite(), "body position must be finite, got {pos:?}");
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            speed: 0.0,
        }
    }

    /// `pos += vel`
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Kind discriminator, mostly for rendering and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorTag {
    HumanPlayer,
    AiPlayer,
    NullPlayer,
    ShortbowArrow,
    LongbowArrow,
}

/// Variant payload of an actor
#[derive(Debug, Clone)]
pub enum ActorKind {
    Player(Box<Player>),
    /// An eliminated player. Never collides, acts or renders.
    Eliminated,
    Arrow(Arrow),
}

/// A simulated entity
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub body: Body,
    pub rotation: f32,
    pub radius: f32,
    side: Side,
    pub kind: ActorKind,
}

impl Actor {
    pub fn new(id: ActorId, side: Side, body: Body, radius: f32, kind: ActorKind) -> Self {
        assert!(
            radius > 0.0 || matches!(kind, ActorKind::Eliminated),
            "collision radius must be positive, got {radius}"
        );
        Self {
            id,
            body,
            rotation: 0.0,
            radius,
            side,
            kind,
        }
    }

    /// Owning group, fixed at construction
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn tag(&self) -> ActorTag {
        match &self.kind {
            ActorKind::Player(p) if p.is_human() => ActorTag::HumanPlayer,
            ActorKind::Player(_) => ActorTag::AiPlayer,
            ActorKind::Eliminated => ActorTag::NullPlayer,
            ActorKind::Arrow(a) => match a.kind {
                ArrowKind::Shortbow => ActorTag::ShortbowArrow,
                ArrowKind::Longbow { .. } => ActorTag::LongbowArrow,
            },
        }
    }

    pub fn player(&self) -> Option<&Player> {
        match &self.kind {
            ActorKind::Player(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            ActorKind::Player(p) => Some(p.as_mut()),
            _ => None,
        }
    }

    /// Split borrow of a live player and its body
    pub fn player_and_body_mut(&mut self) -> Option<(&mut Player, &mut Body)> {
        match &mut self.kind {
            ActorKind::Player(p) => Some((p.as_mut(), &mut self.body)),
            _ => None,
        }
    }

    pub fn arrow(&self) -> Option<&Arrow> {
        match &self.kind {
            ActorKind::Arrow(a) => Some(a),
            _ => None,
        }
    }

    pub fn is_eliminated(&self) -> bool {
        matches!(self.kind, ActorKind::Eliminated)
    }

    /// Replace a player with the eliminated sentinel
    pub fn eliminate(&mut self) {
        if self.player().is_some() {
            self.kind = ActorKind::Eliminated;
            self.body.vel = Vec2::ZERO;
        }
    }

    /// Circle overlap test. Eliminated actors never overlap anything.
    pub fn overlaps(&self, other: &Actor) -> bool {
        if self.is_eliminated() || other.is_eliminated() {
            return false;
        }
        let reach = self.radius + other.radius;
        self.body.pos.distance_squared(other.body.pos) < reach * reach
    }

    /// Apply damage to a player; a no-op for anything else
    pub fn take_damage(&mut self, opponent_pos: Vec2) {
        if let ActorKind::Player(p) = &mut self.kind {
            p.take_damage(&mut self.body, opponent_pos);
        }
    }

    /// Advance the physics of this actor by one tick
    pub fn update_physics(&mut self, arena_size: f32) {
        match &mut self.kind {
            ActorKind::Player(_) => {
                super::player::step_body(&mut self.body, &mut self.rotation, arena_size);
            }
            ActorKind::Arrow(arrow) => {
                arrow.step(&mut self.body);
                self.rotation = self.body.heading;
            }
            ActorKind::Eliminated => {}
        }
    }

    /// Snapshot for the rendering collaborator
    pub fn pose(&self) -> Option<ActorPose> {
        let state = match &self.kind {
            ActorKind::Eliminated => return None,
            ActorKind::Arrow(a) => PoseState::Arrow {
                lethal: a.is_lethal(),
                head: matches!(a.kind, ArrowKind::Longbow { head: true }),
                half_length: a.half_length,
            },
            ActorKind::Player(p) => match p.state() {
                PlayerState::Move => PoseState::Move,
                PlayerState::DrawShortbow => PoseState::DrawShortbow { aim: p.aim() },
                PlayerState::DrawLongbow => PoseState::DrawLongbow {
                    aim: p.aim(),
                    charge: p.charge_ratio(),
                },
                PlayerState::Damaged => PoseState::Damaged {
                    remaining: p.damage_ratio(),
                },
            },
        };
        Some(ActorPose {
            id: self.id,
            side: self.side,
            tag: self.tag(),
            pos: self.body.pos,
            rotation: self.rotation,
            radius: self.radius,
            state,
        })
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

/// Slot storage for actors.
///
/// Freed slots are reused (most recently freed first) under a bumped generation,
/// so a handle to a removed actor never resolves to its successor.
#[derive(Debug, Clone, Default)]
pub struct ActorArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ActorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle and store the actor built for it
    pub fn insert_with(&mut self, build: impl FnOnce(ActorId) -> Actor) -> ActorId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = ActorId {
            index,
            generation: slot.generation,
        };
        let actor = build(id);
        debug_assert_eq!(actor.id, id);
        slot.actor = Some(actor);
        self.live += 1;
        id
    }

    fn slot(&self, id: ActorId) -> Option<&Slot> {
        self.slots
            .get(id.index())
            .filter(|s| s.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ActorId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slot(id).and_then(|s| s.actor.as_ref())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slot_mut(id).and_then(|s| s.actor.as_mut())
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        let slot = self.slot_mut(id)?;
        let actor = slot.actor.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(actor)
    }

    /// Live actors in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.slots.iter().filter_map(|s| s.actor.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.slots.iter_mut().filter_map(|s| s.actor.as_mut())
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Slots allocated so far, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
