//! Collision detection and its ordering rules
//!
//! The order in which pairs are checked decides outcomes, so it is fixed here:
//! left-side arrows are walked in firing order against right-side arrows, and
//! each side's arrows are walked in firing order against the opposing player.
//! Detection only flags arrows for removal; the group compacts them later.

use glam::Vec2;

use super::body::{ActorArena, ActorId};
use super::group::ActorGroup;

/// A pair of arrows that destroyed each other
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clash {
    pub left: ActorId,
    pub right: ActorId,
    /// Midpoint between the two arrows
    pub point: Vec2,
}

/// Annihilate overlapping opposing arrows.
///
/// Each left arrow is consumed by at most one right arrow (the first in firing
/// order that overlaps it), and an arrow already consumed this tick is skipped.
pub fn resolve_arrow_clashes(arena: &ActorArena, groups: &mut [ActorGroup; 2]) -> Vec<Clash> {
    let [left, right] = groups;
    let mut clashes = Vec::new();
    let own: Vec<ActorId> = left.active_arrows().collect();

    for left_id in own {
        let Some(a) = arena.get(left_id) else {
            continue;
        };
        let hit = right
            .active_arrows()
            .find(|id| arena.get(*id).is_some_and(|b| a.overlaps(b)));
        if let Some(right_id) = hit {
            left.remove_arrow(left_id);
            right.remove_arrow(right_id);
            let b = arena.get(right_id).map_or(a.body.pos, |b| b.body.pos);
            clashes.push(Clash {
                left: left_id,
                right: right_id,
                point: (a.body.pos + b) * 0.5,
            });
        }
    }
    clashes
}

/// First arrow of `attackers` (in firing order) overlapping `target`.
///
/// At most one arrow can hit a player per tick, however many overlap it.
pub fn first_arrow_hit(
    arena: &ActorArena,
    attackers: &ActorGroup,
    target: ActorId,
) -> Option<ActorId> {
    let target = arena.get(target)?;
    if target.is_eliminated() {
        return None;
    }
    attackers
        .active_arrows()
        .find(|id| arena.get(*id).is_some_and(|a| a.overlaps(target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arrow::Shot;
    use crate::sim::body::{Actor, ActorKind, Body, Side};
    use crate::sim::player::Player;

    fn setup() -> (ActorArena, [ActorGroup; 2]) {
        let mut arena = ActorArena::new();
        let groups = Side::BOTH.map(|side| {
            let x = if side == Side::Left { 100.0 } else { 700.0 };
            let id = arena.insert_with(|id| {
                Actor::new(
                    id,
                    side,
                    Body::new(Vec2::new(x, 400.0)),
                    20.0,
                    ActorKind::Player(Box::new(Player::human())),
                )
            });
            ActorGroup::new(side, id)
        });
        (arena, groups)
    }

    fn shoot(arena: &mut ActorArena, group: &mut ActorGroup, origin: Vec2) -> ActorId {
        group.spawn_shot(arena, &Shot::Shortbow { origin, angle: 0.0 });
        *group.arrows().last().unwrap()
    }

    #[test]
    fn test_clash_consumes_one_pair_per_arrow() {
        let (mut arena, mut groups) = setup();
        let [left, right] = &mut groups;
        let l1 = shoot(&mut arena, left, Vec2::new(400.0, 400.0));
        let r1 = shoot(&mut arena, right, Vec2::new(405.0, 400.0));
        let r2 = shoot(&mut arena, right, Vec2::new(402.0, 400.0));

        let clashes = resolve_arrow_clashes(&arena, &mut groups);
        assert_eq!(clashes.len(), 1);
        assert_eq!(clashes[0].left, l1);
        // First in firing order wins, even though r2 is closer
        assert_eq!(clashes[0].right, r1);
        assert!(groups[1].is_pending_removal(r1));
        assert!(!groups[1].is_pending_removal(r2));
        assert!(groups[0].is_pending_removal(l1));
    }

    #[test]
    fn test_consumed_arrow_cannot_clash_twice() {
        let (mut arena, mut groups) = setup();
        let [left, right] = &mut groups;
        let l1 = shoot(&mut arena, left, Vec2::new(400.0, 400.0));
        let l2 = shoot(&mut arena, left, Vec2::new(401.0, 400.0));
        let r1 = shoot(&mut arena, right, Vec2::new(402.0, 400.0));

        let clashes = resolve_arrow_clashes(&arena, &mut groups);
        assert_eq!(clashes.len(), 1);
        assert_eq!((clashes[0].left, clashes[0].right), (l1, r1));
        assert!(!groups[0].is_pending_removal(l2));
    }

    #[test]
    fn test_only_first_overlapping_arrow_hits() {
        let (mut arena, mut groups) = setup();
        let target = groups[1].player();
        let first = shoot(&mut arena, &mut groups[0], Vec2::new(695.0, 400.0));
        shoot(&mut arena, &mut groups[0], Vec2::new(700.0, 400.0));
        shoot(&mut arena, &mut groups[0], Vec2::new(705.0, 400.0));
        assert_eq!(first_arrow_hit(&arena, &groups[0], target), Some(first));

        groups[0].remove_arrow(first);
        assert_ne!(first_arrow_hit(&arena, &groups[0], target), Some(first));
    }

    #[test]
    fn test_eliminated_player_is_never_hit() {
        let (mut arena, mut groups) = setup();
        let target = groups[1].player();
        shoot(&mut arena, &mut groups[0], Vec2::new(700.0, 400.0));
        arena.get_mut(target).unwrap().eliminate();
        assert_eq!(first_arrow_hit(&arena, &groups[0], target), None);
    }
}
