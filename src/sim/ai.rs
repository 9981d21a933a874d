//! AI opponent: periodic planning, target steering and rate-limited firing
//!
//! The brain re-plans every [`REPLAN_TICKS`] ticks and turns its plan into the
//! same [`PlayerIntent`] a human would produce. All randomness comes from the
//! brain's own seeded RNG, so a match with a fixed seed replays identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use super::group::OpponentView;
use super::player::{AIM_TOLERANCE, PlayerIntent, PlayerState};
use super::vector::{VecExt, from_angle};
use crate::input::ShortbowCue;
use crate::normalize_angle;

pub const REPLAN_TICKS: u64 = 10;

/// Squared distance at which an incoming arrow triggers an escape
const THREAT_DIST_SQ: f32 = 40_000.0;
/// Squared distance under which the opponent counts as close
const CLOSE_DIST_SQ: f32 = 100_000.0;
const LONG_RANGE: f32 = 400.0;
const ESCAPE_DISTANCE: f32 = 200.0;
/// Keep planned targets this far inside the arena walls
const TARGET_MARGIN: f32 = 50.0;

const TACTICAL_MIN_OFFSET: f32 = 20.0;
const TACTICAL_MAX_OFFSET: f32 = 300.0;
const TACTICAL_MIN_TRAVEL: f32 = 150.0;
const TACTICAL_PUSH: f32 = 200.0;

const ESCAPE_DEAD_ZONE: f32 = 50.0;
const DEAD_ZONE: f32 = 100.0;

const ESCAPE_FIRE_TICKS: u64 = 15;
const KILL_FIRE_TICKS: u64 = 30;
const JAB_FIRE_TICKS: u64 = 12;
/// Counter-attack while escaping only if the opponent is this close
const COUNTER_RANGE: f32 = 500.0;
/// ...and no enemy arrow is within this squared distance
const COUNTER_CLEAR_DIST_SQ: f32 = 30_000.0;

const KILL_ON_STUN_CHANCE: f64 = 0.7;
const LONG_RANGE_KILL_CHANCE: f64 = 0.3;
const FAR_MOVE_CHANCE: f64 = 0.3;
const COUNTER_CHANCE: f64 = 0.2;
const LONGBOW_RELEASE_CHANCE: f64 = 0.05;

/// High-level intent of the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    /// Get out of the way of danger
    Escape,
    /// Press an advantage
    Kill,
    /// Reposition and poke
    Jab,
    /// Reposition only
    Move,
}

/// What the brain knows about its own body
#[derive(Debug, Clone, Copy)]
pub struct SelfView {
    pub pos: Vec2,
    pub state: PlayerState,
    pub aim: f32,
    pub charge_complete: bool,
}

#[derive(Debug, Clone)]
pub struct AiBrain {
    plan: Plan,
    move_target: Vec2,
    last_shot_frame: u64,
    longbow_enabled: bool,
    /// False until the first replan; the spawn tick is rarely on the replan cadence
    planned: bool,
    rng: Pcg32,
}

impl AiBrain {
    pub fn new(seed: u64, longbow_enabled: bool) -> Self {
        Self {
            plan: Plan::Move,
            move_target: Vec2::ZERO,
            last_shot_frame: 0,
            longbow_enabled,
            planned: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn move_target(&self) -> Vec2 {
        self.move_target
    }

    pub fn last_shot_frame(&self) -> u64 {
        self.last_shot_frame
    }

    /// Produce this tick's intent
    pub fn decide(
        &mut self,
        me: &SelfView,
        opponent: &OpponentView,
        frame: u64,
        arena_size: f32,
    ) -> PlayerIntent {
        if !self.planned || frame.is_multiple_of(REPLAN_TICKS) {
            self.replan(me, opponent, arena_size);
            self.planned = true;
        }
        if self.plan == Plan::Kill && opponent.alive {
            self.move_target = opponent.pos;
        }

        let dead_zone = if self.plan == Plan::Escape {
            ESCAPE_DEAD_ZONE
        } else {
            DEAD_ZONE
        };
        let mut intent = PlayerIntent {
            move_x: axis_intent(self.move_target.x - me.pos.x, dead_zone),
            move_y: axis_intent(self.move_target.y - me.pos.y, dead_zone),
            ..Default::default()
        };

        if !opponent.alive {
            return intent;
        }

        match me.state {
            PlayerState::Damaged | PlayerState::DrawShortbow => {}
            PlayerState::DrawLongbow => self.hold_longbow(me, opponent, frame, &mut intent),
            PlayerState::Move => {
                if self.wants_to_fire(me, opponent, frame) {
                    self.last_shot_frame = frame;
                    if self.plan == Plan::Kill && self.longbow_enabled {
                        intent.longbow_held = true;
                    } else {
                        intent.shortbow = ShortbowCue::Tap;
                    }
                }
            }
        }
        intent
    }

    fn replan(&mut self, me: &SelfView, opponent: &OpponentView, arena_size: f32) {
        let previous = self.plan;
        let threat = opponent
            .nearest_arrow(me.pos)
            .filter(|(dist_sq, _)| *dist_sq < THREAT_DIST_SQ);

        if me.state == PlayerState::Damaged {
            self.plan = Plan::Escape;
            let away_line = opponent.pos.heading_to(me.pos);
            self.move_target = self.sidestep(me.pos, away_line, arena_size);
        } else if opponent.damaged && self.rng.random_bool(KILL_ON_STUN_CHANCE) {
            self.plan = Plan::Kill;
            self.move_target = opponent.pos;
        } else if let Some((_, arrow)) = threat {
            self.plan = Plan::Escape;
            self.move_target = self.sidestep(me.pos, arrow.heading, arena_size);
        } else {
            let dist_sq = me.pos.distance_squared(opponent.pos);
            self.plan = if dist_sq < CLOSE_DIST_SQ {
                if self.rng.random_bool(0.5) {
                    Plan::Move
                } else {
                    Plan::Jab
                }
            } else if dist_sq.sqrt() > LONG_RANGE && self.rng.random_bool(LONG_RANGE_KILL_CHANCE) {
                Plan::Kill
            } else if self.rng.random_bool(FAR_MOVE_CHANCE) {
                Plan::Move
            } else {
                Plan::Jab
            };
            self.move_target = if self.plan == Plan::Kill {
                opponent.pos
            } else {
                self.tactical_target(me.pos, opponent.pos, arena_size)
            };
        }

        if previous != self.plan {
            log::trace!(
                "AI plan {:?} -> {:?}, target ({:.0}, {:.0})",
                previous,
                self.plan,
                self.move_target.x,
                self.move_target.y
            );
        }
    }

    /// Point 200 units to a random side of `heading`, kept inside the arena
    fn sidestep(&mut self, pos: Vec2, heading: f32, arena_size: f32) -> Vec2 {
        let side = if self.rng.random_bool(0.5) {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        };
        clamp_to_arena(pos + from_angle(heading + side, ESCAPE_DISTANCE), arena_size)
    }

    /// Spot in the quadrant diagonally opposite the opponent
    fn tactical_target(&mut self, pos: Vec2, opponent_pos: Vec2, arena_size: f32) -> Vec2 {
        let center = Vec2::splat(arena_size / 2.0);
        let rel = opponent_pos - center;
        let sx = self.opposite_sign(rel.x);
        let sy = self.opposite_sign(rel.y);
        let ox = self
            .rng
            .random_range(TACTICAL_MIN_OFFSET..=TACTICAL_MAX_OFFSET);
        let oy = self
            .rng
            .random_range(TACTICAL_MIN_OFFSET..=TACTICAL_MAX_OFFSET);
        let mut target = center + Vec2::new(sx * ox, sy * oy);

        if target.distance(pos) < TACTICAL_MIN_TRAVEL {
            let heading = pos.heading_to(target);
            target += from_angle(heading, TACTICAL_PUSH);
        }
        clamp_to_arena(target, arena_size)
    }

    fn opposite_sign(&mut self, v: f32) -> f32 {
        if v > 0.0 {
            -1.0
        } else if v < 0.0 {
            1.0
        } else if self.rng.random_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }

    fn wants_to_fire(&mut self, me: &SelfView, opponent: &OpponentView, frame: u64) -> bool {
        let since = frame.saturating_sub(self.last_shot_frame);
        let dist = me.pos.distance(opponent.pos);
        match self.plan {
            Plan::Escape => since >= ESCAPE_FIRE_TICKS && self.safe_to_counter(me, opponent, dist),
            Plan::Kill => since >= KILL_FIRE_TICKS && dist > LONG_RANGE,
            Plan::Jab => since >= JAB_FIRE_TICKS,
            Plan::Move => false,
        }
    }

    fn safe_to_counter(&mut self, me: &SelfView, opponent: &OpponentView, dist: f32) -> bool {
        if dist >= COUNTER_RANGE {
            return false;
        }
        if opponent
            .nearest_arrow(me.pos)
            .is_some_and(|(dist_sq, _)| dist_sq < COUNTER_CLEAR_DIST_SQ)
        {
            return false;
        }
        let escape = me.pos.heading_to(self.move_target);
        let attack = me.pos.heading_to(opponent.pos);
        normalize_angle(escape - attack).abs() > FRAC_PI_2
            || opponent.damaged
            || self.rng.random_bool(COUNTER_CHANCE)
    }

    /// Longbow draw: keep holding, level out while turning, release or bail
    fn hold_longbow(
        &mut self,
        me: &SelfView,
        opponent: &OpponentView,
        frame: u64,
        intent: &mut PlayerIntent,
    ) {
        if me.pos.distance(opponent.pos) < LONG_RANGE {
            intent.cancel_draw = true;
            return;
        }
        let error = normalize_angle(me.pos.heading_to(opponent.pos) - me.aim);
        if error.abs() > AIM_TOLERANCE {
            intent.move_y = 0;
            intent.longbow_held = true;
            return;
        }
        let release = me.charge_complete && self.rng.random_bool(LONGBOW_RELEASE_CHANCE);
        intent.longbow_held = !release;
        if release {
            self.last_shot_frame = frame;
        }
    }
}

/// Discretize an offset into {-1, 0, 1} with a dead zone
fn axis_intent(delta: f32, dead_zone: f32) -> i8 {
    if delta > dead_zone {
        1
    } else if delta < -dead_zone {
        -1
    } else {
        0
    }
}

fn clamp_to_arena(p: Vec2, arena_size: f32) -> Vec2 {
    let lo = TARGET_MARGIN;
    let hi = (arena_size - TARGET_MARGIN).max(lo);
    p.clamp(Vec2::splat(lo), Vec2::splat(hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_ARENA_SIZE;
    use crate::sim::group::ArrowView;
    use std::f32::consts::PI;

    const ARENA: f32 = DEFAULT_ARENA_SIZE;

    fn me_at(pos: Vec2) -> SelfView {
        SelfView {
            pos,
            state: PlayerState::Move,
            aim: 0.0,
            charge_complete: false,
        }
    }

    fn opponent_at(pos: Vec2) -> OpponentView {
        OpponentView {
            pos,
            alive: true,
            damaged: false,
            arrows: Vec::new(),
        }
    }

    /// Brain that already has `plan` and will not replan off-cadence
    fn brain_with_plan(seed: u64, longbow: bool, plan: Plan) -> AiBrain {
        let mut brain = AiBrain::new(seed, longbow);
        brain.plan = plan;
        brain.planned = true;
        brain
    }

    /// Plans chosen by `seeds` brains on their first decision
    fn first_plans(seeds: u64, me: &SelfView, opp: &OpponentView) -> Vec<Plan> {
        (0..seeds)
            .map(|seed| {
                let mut brain = AiBrain::new(seed, false);
                brain.decide(me, opp, 0, ARENA);
                brain.plan()
            })
            .collect()
    }

    fn share(plans: &[Plan], plan: Plan) -> f64 {
        plans.iter().filter(|p| **p == plan).count() as f64 / plans.len() as f64
    }

    #[test]
    fn test_axis_intent_dead_zone() {
        assert_eq!(axis_intent(101.0, 100.0), 1);
        assert_eq!(axis_intent(-99.0, 100.0), 0);
        assert_eq!(axis_intent(-51.0, 50.0), -1);
    }

    #[test]
    fn test_damaged_plans_escape() {
        let mut brain = AiBrain::new(11, false);
        let me = SelfView {
            state: PlayerState::Damaged,
            ..me_at(Vec2::new(400.0, 400.0))
        };
        let opp = opponent_at(Vec2::new(600.0, 400.0));
        let intent = brain.decide(&me, &opp, 0, ARENA);
        assert_eq!(brain.plan(), Plan::Escape);
        // Lateral retreat: perpendicular to the line to the opponent
        let target = brain.move_target();
        assert!((target.x - 400.0).abs() < 1e-3);
        assert!((target.y - 400.0).abs() > 199.0);
        assert_eq!(intent.shortbow, ShortbowCue::None);
    }

    #[test]
    fn test_incoming_arrow_triggers_escape() {
        let mut brain = AiBrain::new(5, false);
        let me = me_at(Vec2::new(400.0, 400.0));
        let mut opp = opponent_at(Vec2::new(700.0, 700.0));
        opp.arrows.push(ArrowView {
            pos: Vec2::new(300.0, 400.0),
            heading: 0.0,
        });
        brain.decide(&me, &opp, 10, ARENA);
        assert_eq!(brain.plan(), Plan::Escape);
        let target = brain.move_target();
        assert!((target.x - 400.0).abs() < 1e-3);
        assert!((target.y - 200.0).abs() < 1e-3 || (target.y - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_escape_target_is_clamped() {
        let mut brain = AiBrain::new(9, false);
        let me = me_at(Vec2::new(60.0, 60.0));
        let mut opp = opponent_at(Vec2::new(700.0, 700.0));
        opp.arrows.push(ArrowView {
            pos: Vec2::new(60.0, 0.0),
            heading: FRAC_PI_2,
        });
        brain.decide(&me, &opp, 0, ARENA);
        let t = brain.move_target();
        assert!(t.x >= TARGET_MARGIN && t.x <= ARENA - TARGET_MARGIN);
        assert!(t.y >= TARGET_MARGIN && t.y <= ARENA - TARGET_MARGIN);
    }

    #[test]
    fn test_tactical_target_opposite_quadrant() {
        for seed in 0..20 {
            let mut brain = AiBrain::new(seed, false);
            let me = me_at(Vec2::new(600.0, 650.0));
            let opp = opponent_at(Vec2::new(450.0, 550.0));
            brain.decide(&me, &opp, 0, ARENA);
            assert!(matches!(brain.plan(), Plan::Move | Plan::Jab));
            let t = brain.move_target();
            // Opponent is right/below center, so the target is left/above
            assert!(t.x < 400.0);
            assert!(t.y < 400.0);
            assert!(t.distance(me.pos) >= TACTICAL_MIN_TRAVEL);
        }
    }

    #[test]
    fn test_jab_fires_on_cadence() {
        // Find a seed whose first close-range plan is a jab
        let me = me_at(Vec2::new(300.0, 300.0));
        let opp = opponent_at(Vec2::new(450.0, 450.0));
        let mut brain = (0..100)
            .map(|seed| AiBrain::new(seed, false))
            .find_map(|mut brain| {
                brain.decide(&me, &opp, 0, ARENA);
                (brain.plan() == Plan::Jab).then_some(brain)
            })
            .expect("some seed plans a jab");
        // Nothing fired yet: frame 0 is inside the cadence window
        assert_eq!(brain.last_shot_frame(), 0);
        assert_eq!(brain.decide(&me, &opp, 11, ARENA).shortbow, ShortbowCue::None);
        let fired = brain.decide(&me, &opp, 12, ARENA);
        assert_eq!(fired.shortbow, ShortbowCue::Tap);
        assert_eq!(brain.last_shot_frame(), 12);
    }

    #[test]
    fn test_kill_waits_for_long_range() {
        let mut brain = brain_with_plan(2, false, Plan::Kill);
        let me = me_at(Vec2::new(100.0, 100.0));
        let near = opponent_at(Vec2::new(300.0, 100.0));
        let far = opponent_at(Vec2::new(700.0, 100.0));
        // Off-cycle frames keep the plan
        assert_eq!(brain.decide(&me, &near, 31, ARENA).shortbow, ShortbowCue::None);
        assert_eq!(brain.decide(&me, &far, 32, ARENA).shortbow, ShortbowCue::Tap);
        assert_eq!(brain.decide(&me, &far, 33, ARENA).shortbow, ShortbowCue::None);
        assert_eq!(brain.move_target(), far.pos);
    }

    #[test]
    fn test_kill_with_longbow_enabled_draws() {
        let mut brain = brain_with_plan(2, true, Plan::Kill);
        let me = me_at(Vec2::new(100.0, 100.0));
        let far = opponent_at(Vec2::new(700.0, 100.0));
        let intent = brain.decide(&me, &far, 31, ARENA);
        assert!(intent.longbow_held);
        assert_eq!(intent.shortbow, ShortbowCue::None);
    }

    #[test]
    fn test_longbow_cancelled_when_opponent_closes() {
        let mut brain = AiBrain::new(4, true);
        let me = SelfView {
            state: PlayerState::DrawLongbow,
            ..me_at(Vec2::new(100.0, 100.0))
        };
        let near = opponent_at(Vec2::new(300.0, 100.0));
        let intent = brain.decide(&me, &near, 1, ARENA);
        assert!(intent.cancel_draw);
    }

    #[test]
    fn test_longbow_turning_levels_out() {
        let mut brain = AiBrain::new(4, true);
        brain.move_target = Vec2::new(100.0, 700.0);
        let me = SelfView {
            state: PlayerState::DrawLongbow,
            aim: 0.0,
            ..me_at(Vec2::new(100.0, 100.0))
        };
        let far = opponent_at(Vec2::new(100.0, 700.0));
        let intent = brain.decide(&me, &far, 1, ARENA);
        assert!(intent.longbow_held);
        assert_eq!(intent.move_y, 0);
    }

    #[test]
    fn test_longbow_release_needs_charge() {
        let mut brain = AiBrain::new(4, true);
        let aimed = SelfView {
            state: PlayerState::DrawLongbow,
            aim: 0.0,
            charge_complete: false,
            ..me_at(Vec2::new(100.0, 100.0))
        };
        let far = opponent_at(Vec2::new(700.0, 100.0));
        assert!((1..500).all(|f| brain.decide(&aimed, &far, f, ARENA).longbow_held));

        let charged = SelfView {
            charge_complete: true,
            ..aimed
        };
        let released = (1..2000).any(|f| !brain.decide(&charged, &far, f, ARENA).longbow_held);
        assert!(released);
    }

    #[test]
    fn test_first_decision_plans_immediately() {
        let mut brain = AiBrain::new(8, false);
        let me = me_at(Vec2::new(200.0, 400.0));
        let opp = opponent_at(Vec2::new(600.0, 400.0));
        // Off the replan cadence, as the first active tick usually is
        brain.decide(&me, &opp, 181, ARENA);
        let t = brain.move_target();
        assert_ne!(t, Vec2::ZERO);
        assert!(t.x >= TARGET_MARGIN && t.y >= TARGET_MARGIN);

        // Later off-cadence ticks keep the plan
        let before = (brain.plan(), brain.move_target());
        brain.decide(&me, &opp, 182, ARENA);
        if before.0 != Plan::Kill {
            assert_eq!((brain.plan(), brain.move_target()), before);
        }
    }

    #[test]
    fn test_stunned_opponent_invites_kill() {
        let me = me_at(Vec2::new(300.0, 300.0));
        let mut opp = opponent_at(Vec2::new(450.0, 450.0));
        opp.damaged = true;
        let plans = first_plans(300, &me, &opp);
        let kill = share(&plans, Plan::Kill);
        assert!((0.55..0.85).contains(&kill), "kill share {kill}");
        // The rest fall through to the close-range choice
        assert!(plans.iter().all(|p| matches!(p, Plan::Kill | Plan::Move | Plan::Jab)));

        opp.damaged = false;
        let plans = first_plans(300, &me, &opp);
        assert_eq!(share(&plans, Plan::Kill), 0.0);
    }

    #[test]
    fn test_stunned_self_escapes_before_kill() {
        let me = SelfView {
            state: PlayerState::Damaged,
            ..me_at(Vec2::new(300.0, 300.0))
        };
        let mut opp = opponent_at(Vec2::new(450.0, 450.0));
        opp.damaged = true;
        let plans = first_plans(50, &me, &opp);
        assert!(plans.iter().all(|p| *p == Plan::Escape));
    }

    #[test]
    fn test_long_range_plans() {
        let me = me_at(Vec2::new(100.0, 100.0));
        let opp = opponent_at(Vec2::new(700.0, 700.0));
        let plans = first_plans(400, &me, &opp);
        let kill = share(&plans, Plan::Kill);
        assert!((0.18..0.42).contains(&kill), "kill share {kill}");
        assert!(!plans.contains(&Plan::Escape));
        let rest: Vec<Plan> = plans.into_iter().filter(|p| *p != Plan::Kill).collect();
        let moves = share(&rest, Plan::Move);
        assert!((0.18..0.42).contains(&moves), "move share {moves}");
    }

    #[test]
    fn test_mid_range_never_kills() {
        // Beyond the close radius (~316) but inside long range (400)
        let me = me_at(Vec2::new(200.0, 400.0));
        let opp = opponent_at(Vec2::new(560.0, 400.0));
        let plans = first_plans(400, &me, &opp);
        assert_eq!(share(&plans, Plan::Kill), 0.0);
        let moves = share(&plans, Plan::Move);
        assert!((0.18..0.42).contains(&moves), "move share {moves}");
        assert!((0.58..0.82).contains(&share(&plans, Plan::Jab)));
    }

    /// Escaping left from an opponent on the right
    fn escaping_brain(seed: u64) -> (AiBrain, SelfView, OpponentView) {
        let mut brain = brain_with_plan(seed, false, Plan::Escape);
        brain.move_target = Vec2::new(200.0, 400.0);
        (
            brain,
            me_at(Vec2::new(400.0, 400.0)),
            opponent_at(Vec2::new(600.0, 400.0)),
        )
    }

    #[test]
    fn test_escape_counter_waits_fifteen_ticks() {
        let (mut brain, me, opp) = escaping_brain(1);
        assert_eq!(brain.decide(&me, &opp, 14, ARENA).shortbow, ShortbowCue::None);
        assert_eq!(brain.decide(&me, &opp, 15, ARENA).shortbow, ShortbowCue::Tap);
        assert_eq!(brain.last_shot_frame(), 15);
        assert_eq!(brain.decide(&me, &opp, 29, ARENA).shortbow, ShortbowCue::None);
    }

    #[test]
    fn test_escape_counter_needs_range_and_clear_air() {
        let (mut brain, me, _) = escaping_brain(1);
        let far = opponent_at(Vec2::new(400.0 + COUNTER_RANGE, 400.0));
        assert!(!brain.safe_to_counter(&me, &far, COUNTER_RANGE));

        let mut covered = opponent_at(Vec2::new(600.0, 400.0));
        covered.arrows.push(ArrowView {
            pos: Vec2::new(500.0, 400.0),
            heading: PI,
        });
        assert!(!brain.safe_to_counter(&me, &covered, 200.0));
        // An arrow outside the clear radius does not block
        covered.arrows[0].pos = Vec2::new(400.0, 700.0);
        assert!(brain.safe_to_counter(&me, &covered, 200.0));
    }

    #[test]
    fn test_escape_counter_angle_and_stun() {
        let (mut brain, me, opp) = escaping_brain(1);
        // Retreating directly away: angle between escape and attack is 180 degrees
        assert!((0..50).all(|_| brain.safe_to_counter(&me, &opp, 200.0)));

        // Retreating towards the opponent's side: only a stunned opponent guarantees a shot
        brain.move_target = Vec2::new(550.0, 500.0);
        let mut stunned = opp.clone();
        stunned.damaged = true;
        assert!((0..50).all(|_| brain.safe_to_counter(&me, &stunned, 200.0)));
    }

    #[test]
    fn test_escape_counter_otherwise_rolls() {
        let me = me_at(Vec2::new(400.0, 400.0));
        let opp = opponent_at(Vec2::new(600.0, 400.0));
        let hits = (0..400)
            .filter(|seed| {
                let mut brain = brain_with_plan(*seed, false, Plan::Escape);
                brain.move_target = Vec2::new(550.0, 500.0);
                brain.safe_to_counter(&me, &opp, 200.0)
            })
            .count();
        let rate = hits as f64 / 400.0;
        assert!((0.1..0.3).contains(&rate), "counter rate {rate}");
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let me = me_at(Vec2::new(200.0, 600.0));
        let opp = opponent_at(Vec2::new(600.0, 200.0));
        let mut a = AiBrain::new(42, false);
        let mut b = AiBrain::new(42, false);
        for frame in 0..300 {
            assert_eq!(
                a.decide(&me, &opp, frame, ARENA),
                b.decide(&me, &opp, frame, ARENA)
            );
        }
        assert_eq!(a.move_target(), b.move_target());
    }
}
