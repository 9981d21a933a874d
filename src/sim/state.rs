//! Match state and render handoff types
//!
//! Everything the match controller owns lives in [`MatchState`]. A reset throws
//! it all away and builds fresh groups, so nothing leaks between matches.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiBrain;
use super::body::{Actor, ActorArena, ActorId, ActorKind, ActorTag, Body, Side};
use super::group::ActorGroup;
use super::player::Player;
use crate::consts::*;
use crate::settings::{ControllerKind, Settings};

/// Ticks per countdown step (one second)
pub const COUNTDOWN_STEP_TICKS: u64 = TICK_RATE as u64;
pub const COUNTDOWN_START: u32 = 3;
/// How long the "Go!" banner stays up
pub const GO_MESSAGE_TICKS: u32 = TICK_RATE;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// 3-2-1 before combat; bodies update but nobody acts
    Countdown,
    /// Combat
    Active,
    /// Someone is down; waiting for a reset
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(Side),
    /// Both players eliminated in the same tick
    Draw,
}

/// Visual state of one actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PoseState {
    Move,
    DrawShortbow { aim: f32 },
    DrawLongbow { aim: f32, charge: f32 },
    Damaged { remaining: f32 },
    Arrow { lethal: bool, head: bool, half_length: f32 },
}

/// Per-actor snapshot for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorPose {
    pub id: ActorId,
    pub side: Side,
    pub tag: ActorTag,
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub state: PoseState,
}

/// One-shot particle burst for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub origin: Vec2,
    pub count: u32,
    pub size: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Particle lifetime (seconds)
    pub lifetime: f32,
    /// Added to the running screen shake
    pub shake: f32,
}

impl EffectRequest {
    /// Two arrows annihilating each other
    pub fn clash(origin: Vec2) -> Self {
        Self {
            origin,
            count: 8,
            size: 3.0,
            speed_min: 1.0,
            speed_max: 4.0,
            lifetime: 0.3,
            shake: 4.0,
        }
    }

    /// Non-lethal hit on a player
    pub fn stagger(origin: Vec2) -> Self {
        Self {
            origin,
            count: 16,
            size: 4.0,
            speed_min: 2.0,
            speed_max: 6.0,
            lifetime: 0.4,
            shake: 10.0,
        }
    }

    /// Player eliminated
    pub fn elimination(origin: Vec2) -> Self {
        Self {
            origin,
            count: 64,
            size: 6.0,
            speed_min: 3.0,
            speed_max: 12.0,
            lifetime: 1.0,
            shake: 30.0,
        }
    }
}

/// Everything the rendering collaborator needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub phase: MatchPhase,
    pub frame: u64,
    pub countdown: u32,
    pub message: Option<String>,
    pub screen_shake: f32,
    pub actors: Vec<ActorPose>,
    pub effects: Vec<EffectRequest>,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub settings: Settings,
    /// Seed for this run (AI brains and hit perturbation derive from it)
    pub seed: u64,
    /// Matches started since construction (0 for the first)
    pub round: u32,
    pub phase: MatchPhase,
    /// Tick counter, reset only by a match reset
    pub frame: u64,
    pub countdown: u32,
    pub screen_shake: f32,
    pub message: Option<String>,
    /// Ticks until `message` clears (0 keeps it up)
    pub message_ticks: u32,
    pub outcome: Option<MatchOutcome>,
    pub arena: ActorArena,
    pub groups: [ActorGroup; 2],
    /// Effects requested during the last tick
    pub effects: Vec<EffectRequest>,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    pub fn new(settings: Settings) -> Self {
        let seed = settings.match_seed();
        Self::with_seed(settings, seed)
    }

    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        assert!(
            settings.arena_size.is_finite() && settings.arena_size > BODY_SIZE * 4.0,
            "arena size {} is too small",
            settings.arena_size
        );
        let (arena, groups) = build_groups(&settings, seed, 0);
        log::info!(
            "New match: arena {}, seed {}, {:?} vs {:?}",
            settings.arena_size,
            seed,
            settings.left,
            settings.right
        );
        Self {
            settings,
            seed,
            round: 0,
            phase: MatchPhase::Countdown,
            frame: 0,
            countdown: COUNTDOWN_START,
            screen_shake: 0.0,
            message: None,
            message_ticks: 0,
            outcome: None,
            arena,
            groups,
            effects: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Discard the match and start a fresh countdown with new players
    pub fn reset(&mut self) {
        self.round += 1;
        let round_seed = self.seed.wrapping_add(self.round as u64);
        let (arena, groups) = build_groups(&self.settings, self.seed, self.round);
        self.arena = arena;
        self.groups = groups;
        self.phase = MatchPhase::Countdown;
        self.frame = 0;
        self.countdown = COUNTDOWN_START;
        self.screen_shake = 0.0;
        self.message = None;
        self.message_ticks = 0;
        self.outcome = None;
        self.effects.clear();
        self.rng = Pcg32::seed_from_u64(round_seed);
        log::info!("Match reset (round {})", self.round);
    }

    pub fn arena_size(&self) -> f32 {
        self.settings.arena_size
    }

    pub fn group(&self, side: Side) -> &ActorGroup {
        &self.groups[side.index()]
    }

    pub fn group_mut(&mut self, side: Side) -> &mut ActorGroup {
        &mut self.groups[side.index()]
    }

    /// The player actor of `side` (possibly eliminated)
    pub fn player_actor(&self, side: Side) -> Option<&Actor> {
        self.arena.get(self.group(side).player())
    }

    pub fn player_actor_mut(&mut self, side: Side) -> Option<&mut Actor> {
        let id = self.group(side).player();
        self.arena.get_mut(id)
    }

    pub fn player(&self, side: Side) -> Option<&Player> {
        self.player_actor(side).and_then(|a| a.player())
    }

    pub fn is_eliminated(&self, side: Side) -> bool {
        self.player_actor(side).is_none_or(Actor::is_eliminated)
    }

    pub fn is_human(&self, side: Side) -> bool {
        self.controller(side) == ControllerKind::Human
    }

    pub fn controller(&self, side: Side) -> ControllerKind {
        match side {
            Side::Left => self.settings.left,
            Side::Right => self.settings.right,
        }
    }

    /// Queue an effect and feed its shake into the running value
    pub fn request_effect(&mut self, effect: EffectRequest) {
        self.screen_shake += effect.shake;
        self.effects.push(effect);
    }

    pub fn set_message(&mut self, text: impl Into<String>, ticks: u32) {
        self.message = Some(text.into());
        self.message_ticks = ticks;
    }

    /// Winner/loser banner for `outcome`, phrased for a lone human if there is one
    pub fn outcome_message(&self, outcome: MatchOutcome) -> String {
        match outcome {
            MatchOutcome::Draw => "Draw!".to_string(),
            MatchOutcome::Winner(side) => {
                let humans = Side::BOTH.map(|s| self.is_human(s));
                match humans {
                    [true, false] | [false, true] => {
                        if humans[side.index()] {
                            "You win!".to_string()
                        } else {
                            "You lose!".to_string()
                        }
                    }
                    _ => format!("{} wins!", side.label()),
                }
            }
        }
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            phase: self.phase,
            frame: self.frame,
            countdown: self.countdown,
            message: self.message.clone(),
            screen_shake: self.screen_shake,
            actors: self.arena.iter().filter_map(Actor::pose).collect(),
            effects: self.effects.clone(),
        }
    }
}

/// Build both groups for a new match, players facing each other across the arena
fn build_groups(settings: &Settings, seed: u64, round: u32) -> (ActorArena, [ActorGroup; 2]) {
    let size = settings.arena_size;
    let mut arena = ActorArena::new();
    let groups = Side::BOTH.map(|side| {
        let (x, controller) = match side {
            Side::Left => (size * 0.25, settings.left),
            Side::Right => (size * 0.75, settings.right),
        };
        let player = match controller {
            ControllerKind::Human => Player::human(),
            ControllerKind::Ai => {
                Player::ai(AiBrain::new(brain_seed(seed, round, side), settings.ai_longbow))
            }
        };
        let id = arena.insert_with(|id| {
            let mut actor = Actor::new(
                id,
                side,
                Body::new(Vec2::new(x, size / 2.0)),
                HALF_BODY,
                ActorKind::Player(Box::new(player)),
            );
            actor.rotation = if side == Side::Left { 0.0 } else { std::f32::consts::PI };
            actor
        });
        ActorGroup::new(side, id)
    });
    (arena, groups)
}

fn brain_seed(seed: u64, round: u32, side: Side) -> u64 {
    seed.wrapping_add(((round as u64) << 1) | side.index() as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_starts_in_countdown() {
        let state = MatchState::with_seed(Settings::default(), 1);
        assert_eq!(state.phase, MatchPhase::Countdown);
        assert_eq!(state.frame, 0);
        assert_eq!(state.countdown, 3);
        assert_eq!(state.arena.len(), 2);
        assert_eq!(
            state.player_actor(Side::Left).map(Actor::tag),
            Some(ActorTag::HumanPlayer)
        );
        assert_eq!(
            state.player_actor(Side::Right).map(Actor::tag),
            Some(ActorTag::AiPlayer)
        );
    }

    #[test]
    fn test_outcome_messages() {
        let state = MatchState::with_seed(Settings::default(), 1);
        assert_eq!(state.outcome_message(MatchOutcome::Winner(Side::Left)), "You win!");
        assert_eq!(state.outcome_message(MatchOutcome::Winner(Side::Right)), "You lose!");
        assert_eq!(state.outcome_message(MatchOutcome::Draw), "Draw!");

        let settings = Settings {
            left: ControllerKind::Ai,
            ..Settings::default()
        };
        let state = MatchState::with_seed(settings, 1);
        assert_eq!(
            state.outcome_message(MatchOutcome::Winner(Side::Right)),
            "Right wins!"
        );
    }

    #[test]
    fn test_effects_feed_screen_shake() {
        let mut state = MatchState::with_seed(Settings::default(), 1);
        state.request_effect(EffectRequest::clash(Vec2::ZERO));
        state.request_effect(EffectRequest::elimination(Vec2::ZERO));
        assert_eq!(state.effects.len(), 2);
        assert!((state.screen_shake - 34.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_frame_skips_eliminated() {
        let mut state = MatchState::with_seed(Settings::default(), 1);
        assert_eq!(state.render_frame().actors.len(), 2);
        if let Some(actor) = state.player_actor_mut(Side::Right) {
            actor.eliminate();
        }
        let frame = state.render_frame();
        assert_eq!(frame.actors.len(), 1);
        assert_eq!(frame.actors[0].side, Side::Left);
        assert_eq!(frame.actors[0].state, PoseState::Move);
    }

    #[test]
    #[should_panic]
    fn test_tiny_arena_panics() {
        let settings = Settings {
            arena_size: 50.0,
            ..Settings::default()
        };
        let _ = MatchState::with_seed(settings, 1);
    }

    #[test]
    fn test_brain_seeds_differ_per_side_and_round() {
        let a = brain_seed(5, 0, Side::Left);
        let b = brain_seed(5, 0, Side::Right);
        let c = brain_seed(5, 1, Side::Left);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }
}
