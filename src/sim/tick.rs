//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one tick. Within an active tick the
//! phases always run in this order: decisions, physics, collisions, compaction,
//! win check. Collisions see post-integration positions, and nothing is removed
//! from a group until every phase that might flag it has finished.

use glam::Vec2;
use rand::Rng;

use super::arrow::Shot;
use super::body::Side;
use super::collision::{first_arrow_hit, resolve_arrow_clashes};
use super::state::{
    COUNTDOWN_STEP_TICKS, EffectRequest, GO_MESSAGE_TICKS, MatchOutcome, MatchPhase, MatchState,
};
use super::vector::{VecExt, from_angle};
use crate::consts::*;
use crate::input::InputSnapshot;
use crate::sim::player::apply_movement;

/// Knockback from a non-lethal hit
pub const HIT_KNOCKBACK: f32 = 8.0;
/// Maximum random deviation of the knockback angle (radians)
pub const HIT_KNOCKBACK_SPREAD: f32 = 0.5;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: InputSnapshot,
    pub right: InputSnapshot,
}

impl TickInput {
    pub fn for_side(&self, side: Side) -> &InputSnapshot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn reset(&self) -> bool {
        self.left.reset || self.right.reset
    }
}

impl From<InputSnapshot> for TickInput {
    /// Single local player on the left side
    fn from(left: InputSnapshot) -> Self {
        Self {
            left,
            right: InputSnapshot::default(),
        }
    }
}

/// Advance the match by one fixed tick
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if input.reset() && state.phase == MatchPhase::Resolved {
        state.reset();
        return;
    }

    state.effects.clear();
    state.frame += 1;

    state.screen_shake = decay_shake(state.screen_shake, state.settings.shake_decay);
    if state.message_ticks > 0 {
        state.message_ticks -= 1;
        if state.message_ticks == 0 {
            state.message = None;
        }
    }

    match state.phase {
        MatchPhase::Countdown => {
            coast_players(state);
            if state.frame.is_multiple_of(COUNTDOWN_STEP_TICKS) {
                state.countdown = state.countdown.saturating_sub(1);
                if state.countdown == 0 {
                    state.phase = MatchPhase::Active;
                    state.set_message("Go!", GO_MESSAGE_TICKS);
                    log::info!("Match active at frame {}", state.frame);
                }
            }
        }
        MatchPhase::Active => decide_and_act(state, input),
        MatchPhase::Resolved => coast_players(state),
    }

    integrate_all(state);

    if state.phase == MatchPhase::Active {
        resolve_collisions(state);
    }

    for group in &mut state.groups {
        group.compact(&mut state.arena);
    }

    if state.phase == MatchPhase::Active {
        check_win(state);
    }
}

/// One tick of screen shake decay: exponential falloff plus a linear floor
fn decay_shake(shake: f32, linear_rate: f32) -> f32 {
    (shake * (-SHAKE_FALLOFF * SIM_DT).exp() - linear_rate * SIM_DT).max(0.0)
}

/// Players that are not acting still feel friction
fn coast_players(state: &mut MatchState) {
    for side in Side::BOTH {
        let id = state.group(side).player();
        if let Some((_, body)) = state
            .arena
            .get_mut(id)
            .and_then(|a| a.player_and_body_mut())
        {
            apply_movement(body, 0, 0, MOVE_FORCE);
        }
    }
}

/// Decision phase: every player decides against a snapshot of its opponent
fn decide_and_act(state: &mut MatchState, input: &TickInput) {
    let views = [
        state.groups[0].view(&state.arena),
        state.groups[1].view(&state.arena),
    ];
    let frame = state.frame;
    let arena_size = state.arena_size();
    let mut shots: Vec<(Side, Shot)> = Vec::new();

    for side in Side::BOTH {
        let opponent = &views[side.opponent().index()];
        let id = state.group(side).player();
        let Some((player, body)) = state
            .arena
            .get_mut(id)
            .and_then(|a| a.player_and_body_mut())
        else {
            continue;
        };
        let raw = input.for_side(side).intent();
        let intent = player.decide(body, &raw, opponent, frame, arena_size);
        if let Some(shot) = player.act(body, &intent, opponent) {
            shots.push((side, shot));
        }
    }

    for (side, shot) in shots {
        let group = &mut state.groups[side.index()];
        let count = group.spawn_shot(&mut state.arena, &shot);
        log::debug!("{} fired {} arrow(s) at frame {}", side.label(), count, frame);
    }
}

/// Physics phase; arrows that leave the extended arena are flagged, not removed
fn integrate_all(state: &mut MatchState) {
    let arena_size = state.arena_size();
    for actor in state.arena.iter_mut() {
        actor.update_physics(arena_size);
    }

    for group in &mut state.groups {
        let gone: Vec<_> = group
            .active_arrows()
            .filter(|id| {
                state.arena.get(*id).is_some_and(|a| {
                    a.arrow()
                        .is_some_and(|arrow| arrow.is_out_of_bounds(a.body.pos, arena_size))
                })
            })
            .collect();
        for id in gone {
            group.remove_arrow(id);
        }
    }
}

/// Collision phase: arrow clashes first, then at most one hit per player
fn resolve_collisions(state: &mut MatchState) {
    let clashes = resolve_arrow_clashes(&state.arena, &mut state.groups);
    for clash in clashes {
        state.request_effect(EffectRequest::clash(clash.point));
    }

    for side in Side::BOTH {
        let target_side = side.opponent();
        let target = state.group(target_side).player();
        let Some(arrow_id) = first_arrow_hit(&state.arena, state.group(side), target) else {
            continue;
        };
        state.group_mut(side).remove_arrow(arrow_id);

        let Some((lethal, arrow_pos)) = state
            .arena
            .get(arrow_id)
            .and_then(|a| a.arrow().map(|arrow| (arrow.is_lethal(), a.body.pos)))
        else {
            continue;
        };
        let shooter_pos = state
            .player_actor(side)
            .map_or(Vec2::ZERO, |a| a.body.pos);
        let spread = state
            .rng
            .random_range(-HIT_KNOCKBACK_SPREAD..=HIT_KNOCKBACK_SPREAD);

        let Some(victim) = state.arena.get_mut(target) else {
            continue;
        };
        let hit_pos = victim.body.pos;
        if lethal {
            victim.eliminate();
            log::info!(
                "{} eliminated by {} longbow at frame {}",
                target_side.label(),
                side.label(),
                state.frame
            );
            state.request_effect(EffectRequest::elimination(hit_pos));
        } else {
            victim.take_damage(shooter_pos);
            let away = arrow_pos.heading_to(hit_pos) + spread;
            victim.body.vel += from_angle(away, HIT_KNOCKBACK);
            log::debug!(
                "{} hit by {} shortbow at frame {}",
                target_side.label(),
                side.label(),
                state.frame
            );
            state.request_effect(EffectRequest::stagger(hit_pos));
        }
    }
}

/// Win-check phase
fn check_win(state: &mut MatchState) {
    let outcome = match (
        state.is_eliminated(Side::Left),
        state.is_eliminated(Side::Right),
    ) {
        (false, false) => return,
        (true, true) => MatchOutcome::Draw,
        (true, false) => MatchOutcome::Winner(Side::Right),
        (false, true) => MatchOutcome::Winner(Side::Left),
    };
    let message = state.outcome_message(outcome);
    log::info!("Match resolved at frame {}: {}", state.frame, message);
    state.outcome = Some(outcome);
    state.phase = MatchPhase::Resolved;
    state.set_message(message, 0);
}
