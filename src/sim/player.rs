//! Player actor: movement physics and the per-tick state machine
//!
//! A player is always in exactly one [`PlayerState`]. `act` evaluates the
//! transition for the current tick once, applies movement (which includes
//! friction) and returns the shot to spawn, if any. Physics (`step_body`) runs
//! separately in the physics phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::ai::{AiBrain, SelfView};
use super::arrow::Shot;
use super::body::Body;
use super::group::OpponentView;
use super::vector::{VecExt, from_angle};
use crate::consts::*;
use crate::input::ShortbowCue;
use crate::normalize_angle;

/// Impulse a stunned AI player gets away from its opponent
pub const FLINCH_IMPULSE: f32 = 5.0;
/// Longbow aim turn rate for AI players (radians per tick)
pub const AI_AIM_TURN_RATE: f32 = 0.1 * TAU / TICK_RATE as f32;
/// Aim error under which an AI longbow draw counts as on target
pub const AIM_TOLERANCE: f32 = PI / 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Move,
    DrawShortbow,
    DrawLongbow,
    Damaged,
}

/// What a controller wants this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIntent {
    /// Horizontal intent in {-1, 0, 1}
    pub move_x: i8,
    /// Vertical intent in {-1, 0, 1}
    pub move_y: i8,
    pub shortbow: ShortbowCue,
    pub longbow_held: bool,
    /// Abandon a longbow draw without firing, regardless of charge
    pub cancel_draw: bool,
}

#[derive(Debug, Clone)]
pub enum Controller {
    Human,
    Ai(AiBrain),
}

#[derive(Debug, Clone)]
pub struct Player {
    state: PlayerState,
    aim: f32,
    charged_ticks: u32,
    damage_ticks: u32,
    /// Ticks until the next shortbow arrow may leave; survives state changes
    shortbow_cooldown: u32,
    longbow_was_held: bool,
    controller: Controller,
}

impl Player {
    pub fn new(controller: Controller) -> Self {
        Self {
            state: PlayerState::Move,
            aim: 0.0,
            charged_ticks: 0,
            damage_ticks: 0,
            shortbow_cooldown: 0,
            longbow_was_held: false,
            controller,
        }
    }

    pub fn human() -> Self {
        Self::new(Controller::Human)
    }

    pub fn ai(brain: AiBrain) -> Self {
        Self::new(Controller::Ai(brain))
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }

    pub fn brain(&self) -> Option<&AiBrain> {
        match &self.controller {
            Controller::Ai(brain) => Some(brain),
            Controller::Human => None,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn aim(&self) -> f32 {
        self.aim
    }

    pub fn charged_ticks(&self) -> u32 {
        self.charged_ticks
    }

    pub fn damage_ticks(&self) -> u32 {
        self.damage_ticks
    }

    pub fn is_damaged(&self) -> bool {
        self.state == PlayerState::Damaged
    }

    /// Longbow charge needed to release; AI players need four times longer
    pub fn charge_threshold(&self) -> u32 {
        if self.is_human() {
            HUMAN_LONGBOW_CHARGE
        } else {
            AI_LONGBOW_CHARGE
        }
    }

    pub fn has_completed_longbow_charge(&self) -> bool {
        self.charged_ticks >= self.charge_threshold()
    }

    /// Charge progress in [0, 1] while drawing the longbow
    pub fn charge_ratio(&self) -> f32 {
        (self.charged_ticks as f32 / self.charge_threshold() as f32).min(1.0)
    }

    /// Remaining stun in [0, 1]
    pub fn damage_ratio(&self) -> f32 {
        self.damage_ticks as f32 / DAMAGE_TICKS as f32
    }

    /// Enter the stunned state. AI players also flinch away from the opponent.
    pub fn take_damage(&mut self, body: &mut Body, opponent_pos: Vec2) {
        self.state = PlayerState::Damaged;
        self.damage_ticks = DAMAGE_TICKS;
        self.charged_ticks = 0;
        if !self.is_human() {
            let away = body.pos.heading_to(opponent_pos) + PI;
            body.vel += from_angle(away, FLINCH_IMPULSE);
        }
    }

    /// Ask the controller for this tick's intent. Humans use `input` as is.
    pub fn decide(
        &mut self,
        body: &Body,
        input: &PlayerIntent,
        opponent: &OpponentView,
        frame: u64,
        arena_size: f32,
    ) -> PlayerIntent {
        let me = SelfView {
            pos: body.pos,
            state: self.state,
            aim: self.aim,
            charge_complete: self.has_completed_longbow_charge(),
        };
        match &mut self.controller {
            Controller::Human => *input,
            Controller::Ai(brain) => brain.decide(&me, opponent, frame, arena_size),
        }
    }

    /// Run one tick of the state machine; returns the shot to spawn, if any
    pub fn act(
        &mut self,
        body: &mut Body,
        intent: &PlayerIntent,
        opponent: &OpponentView,
    ) -> Option<Shot> {
        let press_edge = intent.longbow_held && !self.longbow_was_held;
        self.longbow_was_held = intent.longbow_held;
        self.shortbow_cooldown = self.shortbow_cooldown.saturating_sub(1);

        match self.state {
            PlayerState::Damaged => {
                apply_movement(body, 0, 0, MOVE_FORCE);
                self.damage_ticks = self.damage_ticks.saturating_sub(1);
                if self.damage_ticks == 0 {
                    self.state = PlayerState::Move;
                }
                None
            }
            PlayerState::Move => {
                apply_movement(body, intent.move_x, intent.move_y, MOVE_FORCE);
                if intent.shortbow != ShortbowCue::None {
                    self.state = PlayerState::DrawShortbow;
                    self.track_aim(body.pos, opponent);
                    return self.fire_shortbow(body.pos);
                }
                if press_edge {
                    self.state = PlayerState::DrawLongbow;
                    self.charged_ticks = 0;
                    self.track_aim(body.pos, opponent);
                }
                None
            }
            PlayerState::DrawShortbow => {
                apply_movement(body, intent.move_x, intent.move_y, MOVE_FORCE * DRAW_FORCE_SCALE);
                self.track_aim(body.pos, opponent);
                if intent.shortbow == ShortbowCue::None {
                    self.state = PlayerState::Move;
                    return None;
                }
                self.fire_shortbow(body.pos)
            }
            PlayerState::DrawLongbow => {
                apply_movement(body, intent.move_x, intent.move_y, MOVE_FORCE * DRAW_FORCE_SCALE);
                if self.is_human() {
                    self.track_aim(body.pos, opponent);
                } else {
                    self.turn_aim(body.pos, opponent);
                }
                if intent.cancel_draw {
                    self.state = PlayerState::Move;
                    self.charged_ticks = 0;
                    return None;
                }
                if !intent.longbow_held {
                    let complete = self.has_completed_longbow_charge();
                    self.state = PlayerState::Move;
                    self.charged_ticks = 0;
                    return complete.then(|| Shot::Longbow {
                        origin: body.pos,
                        angle: self.aim,
                    });
                }
                self.charged_ticks += 1;
                None
            }
        }
    }

    /// Put the player straight into a longbow draw (charge 0)
    pub fn begin_longbow_draw(&mut self) {
        if self.state != PlayerState::Damaged {
            self.state = PlayerState::DrawLongbow;
            self.charged_ticks = 0;
            self.longbow_was_held = true;
        }
    }

    /// One arrow per [`SHORTBOW_CADENCE`] ticks, however the draw was entered
    fn fire_shortbow(&mut self, origin: Vec2) -> Option<Shot> {
        if self.shortbow_cooldown > 0 {
            return None;
        }
        self.shortbow_cooldown = SHORTBOW_CADENCE;
        Some(Shot::Shortbow {
            origin,
            angle: self.aim,
        })
    }

    /// Snap aim onto the opponent
    fn track_aim(&mut self, pos: Vec2, opponent: &OpponentView) {
        if opponent.alive {
            self.aim = pos.heading_to(opponent.pos);
        }
    }

    /// Turn aim toward the opponent at a fixed rate
    fn turn_aim(&mut self, pos: Vec2, opponent: &OpponentView) {
        if !opponent.alive {
            return;
        }
        let error = normalize_angle(pos.heading_to(opponent.pos) - self.aim);
        if error.abs() > AIM_TOLERANCE {
            self.aim = normalize_angle(self.aim + AI_AIM_TURN_RATE.copysign(error));
        }
    }
}

/// Convert axis intents into velocity, clamp, then apply friction
pub fn apply_movement(body: &mut Body, move_x: i8, move_y: i8, force: f32) {
    body.vel.x = accelerate_axis(body.vel.x, move_x, force).clamp(-MAX_SPEED_X, MAX_SPEED_X);
    body.vel.y = accelerate_axis(body.vel.y, move_y, force).clamp(-MAX_SPEED_Y, MAX_SPEED_Y);
    body.vel *= FRICTION;
}

fn accelerate_axis(v: f32, intent: i8, force: f32) -> f32 {
    let intent = intent.signum() as f32;
    if intent == 0.0 {
        v
    } else if v != 0.0 && v.signum() != intent {
        // Immediate reversal
        intent * REVERSAL_SPEED
    } else {
        v + intent * force
    }
}

/// Player physics: integrate, bounce off arena walls, spin
pub fn step_body(body: &mut Body, rotation: &mut f32, arena_size: f32) {
    body.integrate();

    let lo = HALF_BODY;
    let hi = arena_size - HALF_BODY;
    if body.pos.x < lo {
        body.pos.x = lo;
        body.vel.x *= WALL_RESTITUTION;
    } else if body.pos.x > hi {
        body.pos.x = hi;
        body.vel.x *= WALL_RESTITUTION;
    }
    if body.pos.y < lo {
        body.pos.y = lo;
        body.vel.y *= WALL_RESTITUTION;
    } else if body.pos.y > hi {
        body.pos.y = hi;
        body.vel.y *= WALL_RESTITUTION;
    }

    let spin = (0.1 + 0.04 * body.vel.length_squared()) * TAU / TICK_RATE as f32;
    *rotation = (*rotation + spin).rem_euclid(TAU);
}
