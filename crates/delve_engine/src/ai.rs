//! Enemy decision making.
//!
//! Runs once per round over every AI-driven entity, in id order. Target
//! choice, movement and special attacks are dispatched on the closed
//! [`AiBehavior`] and [`SpecialKind`] enums.

use delve_dungeon::Map;
use delve_foundation::{Direction, EntityId, GameRng, Point, roll_percent};
use delve_storage::{
    ActiveEffect, AiBehavior, AiDescriptor, ComponentKind, Health, Position, SpecialAttack,
    SpecialKind, StatusKind, Store,
};
use log::debug;
use rand::Rng;

use crate::combat::{self, CombatResult};
use crate::effects;
use crate::world::{blocker_at, is_alive, position_of};

/// A special attack that landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialOutcome {
    /// What it was.
    pub kind: SpecialKind,
    /// Magnitude applied.
    pub magnitude: i32,
    /// Duration of the effect, for timed kinds.
    pub duration: u32,
    /// Health moved from target to attacker, for lifedrain.
    pub drained: i32,
    /// The special finished off the target.
    pub killed: bool,
}

/// What one AI entity did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiAction {
    /// Stunned; did nothing.
    Stunned,
    /// No target in sight.
    Idle,
    /// Stepped toward its target.
    Moved {
        /// Old position.
        from: Point,
        /// New position.
        to: Point,
    },
    /// Wanted to move but every step was blocked.
    Blocked,
    /// Hit its target.
    Attacked {
        /// The hit.
        result: CombatResult,
        /// Special attack that triggered, if any.
        special: Option<SpecialOutcome>,
    },
}

/// One entry of the per-round AI report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiOutcome {
    /// The acting entity.
    pub entity: EntityId,
    /// Its target, if one was chosen.
    pub target: Option<EntityId>,
    /// What it did.
    pub action: AiAction,
}

/// Picks the target for this round.
///
/// Candidates are the live, visible, positioned `actors`. A lone candidate is
/// chosen outright; with several, the one nearest `centroid` wins, ties going
/// to the earlier actor.
#[must_use]
pub fn choose_target(store: &Store, actors: &[EntityId], centroid: Point) -> Option<EntityId> {
    let candidates: Vec<(EntityId, Point)> = actors
        .iter()
        .filter(|a| is_alive(store, **a))
        .filter(|a| !effects::has(store, **a, StatusKind::Invisible))
        .filter_map(|a| position_of(store, *a).map(|p| (*a, p)))
        .collect();
    match candidates.as_slice() {
        [] => None,
        [(only, _)] => Some(*only),
        many => many
            .iter()
            .min_by_key(|(_, p)| p.distance_sq(centroid))
            .map(|(id, _)| *id),
    }
}

/// Runs every AI entity once.
pub fn run_ai(
    store: &mut Store,
    map: &Map,
    actors: &[EntityId],
    centroid: Point,
    rng: &mut GameRng,
) -> Vec<AiOutcome> {
    let mut target = choose_target(store, actors, centroid);
    let mut outcomes = Vec::new();

    for entity in store.query(&[ComponentKind::Ai, ComponentKind::Position, ComponentKind::Health]) {
        if !is_alive(store, entity) {
            continue;
        }
        let Some(ai) = store.get::<AiDescriptor>(entity).copied() else {
            continue;
        };
        if effects::is_stunned(store, entity) {
            outcomes.push(AiOutcome {
                entity,
                target: None,
                action: AiAction::Stunned,
            });
            continue;
        }
        // Targets can die mid-pass; the survivors are candidates again.
        if target.is_some_and(|t| !is_alive(store, t)) {
            target = choose_target(store, actors, centroid);
        }
        let action = match target {
            Some(t) => decide(store, map, entity, &ai, t, rng),
            None => AiAction::Idle,
        };
        if let AiAction::Attacked { result, special } = &action {
            debug!(
                "{entity} hit {} for {} ({} left){}",
                result.defender,
                result.damage,
                result.remaining,
                special.map_or(String::new(), |s| format!(", {:?}", s.kind))
            );
        }
        outcomes.push(AiOutcome {
            entity,
            target,
            action,
        });
    }
    outcomes
}

fn decide(
    store: &mut Store,
    map: &Map,
    entity: EntityId,
    ai: &AiDescriptor,
    target: EntityId,
    rng: &mut GameRng,
) -> AiAction {
    let (Some(here), Some(there)) = (position_of(store, entity), position_of(store, target)) else {
        return AiAction::Idle;
    };
    if here.chebyshev(there) > ai.sight_range {
        return AiAction::Idle;
    }

    if here.is_adjacent(there) {
        let Some(result) = combat::attack(store, entity, target, rng) else {
            return AiAction::Idle;
        };
        let special = match ai.special {
            Some(special) if roll_percent(rng, special.chance) && !result.killed => {
                Some(apply_special(store, entity, target, special))
            }
            _ => None,
        };
        return AiAction::Attacked { result, special };
    }

    let step = match ai.behavior {
        AiBehavior::Guard => return AiAction::Idle,
        AiBehavior::Chase => greedy_step(store, map, here, there),
        AiBehavior::Erratic => {
            if rng.gen_bool(0.5) {
                let d = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                let to = here.step(d);
                is_open(store, map, to).then_some(to)
            } else {
                greedy_step(store, map, here, there)
            }
        }
    };
    match step {
        Some(to) => {
            store.add(entity, Position(to));
            AiAction::Moved { from: here, to }
        }
        None => AiAction::Blocked,
    }
}

fn is_open(store: &Store, map: &Map, p: Point) -> bool {
    map.is_walkable(p) && blocker_at(store, p).is_none()
}

/// The open neighbour that brings `from` strictly closer to `to`, scanning
/// directions clockwise from north and keeping the first best.
fn greedy_step(store: &Store, map: &Map, from: Point, to: Point) -> Option<Point> {
    let current = from.distance_sq(to);
    let mut best: Option<(i64, Point)> = None;
    for d in Direction::ALL {
        let next = from.step(d);
        let dist = next.distance_sq(to);
        if dist >= current || !is_open(store, map, next) {
            continue;
        }
        if best.is_none_or(|(b, _)| dist < b) {
            best = Some((dist, next));
        }
    }
    best.map(|(_, p)| p)
}

fn apply_special(
    store: &mut Store,
    attacker: EntityId,
    target: EntityId,
    special: SpecialAttack,
) -> SpecialOutcome {
    let mut outcome = SpecialOutcome {
        kind: special.kind,
        magnitude: special.magnitude,
        duration: special.duration,
        drained: 0,
        killed: false,
    };
    let timed = |kind| ActiveEffect::new(kind, special.magnitude, special.duration);
    match special.kind {
        SpecialKind::Poison => {
            effects::apply_effect(store, target, timed(StatusKind::Poison));
        }
        SpecialKind::Weaken => {
            effects::apply_effect(store, target, timed(StatusKind::Weaken));
        }
        SpecialKind::Stun => {
            effects::apply_effect(store, target, timed(StatusKind::Stun));
        }
        SpecialKind::ArmorBreak => {
            effects::apply_effect(store, target, timed(StatusKind::ArmorBreak));
        }
        SpecialKind::Lifedrain => {
            let taken = store
                .get_mut::<Health>(target)
                .map_or(0, |h| h.damage(special.magnitude));
            if let Some(h) = store.get_mut::<Health>(attacker) {
                h.heal(taken);
            }
            outcome.drained = taken;
            outcome.killed = !is_alive(store, target);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_dungeon::TileKind;
    use delve_foundation::seeded;
    use delve_storage::{Blocking, CombatStats, Player, StatusEffects};

    fn open_map() -> Map {
        Map::filled(20, 20, TileKind::Floor)
    }

    fn hero(store: &mut Store, at: Point) -> EntityId {
        let id = store.create();
        store.add(id, Position(at));
        store.add(id, Player);
        store.add(id, Blocking);
        store.add(id, Health::full(30));
        store.add(id, CombatStats { attack: 3, defense: 0 });
        store.add(id, StatusEffects::default());
        id
    }

    fn monster(store: &mut Store, at: Point, behavior: AiBehavior, special: Option<SpecialAttack>) -> EntityId {
        let id = store.create();
        store.add(id, Position(at));
        store.add(id, Blocking);
        store.add(id, Health::full(10));
        store.add(id, CombatStats { attack: 2, defense: 0 });
        store.add(id, StatusEffects::default());
        store.add(
            id,
            AiDescriptor {
                behavior,
                sight_range: 8,
                special,
            },
        );
        id
    }

    #[test]
    fn solo_target_is_the_lone_actor() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(1, 1));
        assert_eq!(choose_target(&store, &[h], Point::new(15, 15)), Some(h));
    }

    #[test]
    fn coop_target_is_nearest_to_centroid() {
        let mut store = Store::new();
        let a = hero(&mut store, Point::new(1, 1));
        let b = hero(&mut store, Point::new(10, 10));
        // b is nearer to the centroid even though a may be nearer to enemies.
        assert_eq!(choose_target(&store, &[a, b], Point::new(9, 9)), Some(b));
    }

    #[test]
    fn invisible_and_dead_actors_are_skipped() {
        let mut store = Store::new();
        let a = hero(&mut store, Point::new(1, 1));
        let b = hero(&mut store, Point::new(10, 10));
        effects::apply_effect(&mut store, b, ActiveEffect::new(StatusKind::Invisible, 0, 3));
        assert_eq!(choose_target(&store, &[a, b], Point::new(9, 9)), Some(a));
        if let Some(h) = store.get_mut::<Health>(a) {
            h.damage(100);
        }
        assert_eq!(choose_target(&store, &[a, b], Point::new(9, 9)), None);
    }

    #[test]
    fn chaser_steps_closer() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(2, 2));
        let m = monster(&mut store, Point::new(6, 2), AiBehavior::Chase, None);
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        assert_eq!(
            out[0].action,
            AiAction::Moved {
                from: Point::new(6, 2),
                to: Point::new(5, 2)
            }
        );
        assert_eq!(position_of(&store, m), Some(Point::new(5, 2)));
    }

    #[test]
    fn guard_holds_position() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(2, 2));
        monster(&mut store, Point::new(6, 2), AiBehavior::Guard, None);
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        assert_eq!(out[0].action, AiAction::Idle);
    }

    #[test]
    fn out_of_sight_is_idle() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(0, 0));
        monster(&mut store, Point::new(19, 19), AiBehavior::Chase, None);
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        assert_eq!(out[0].action, AiAction::Idle);
    }

    #[test]
    fn adjacent_monster_attacks() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(2, 2));
        monster(&mut store, Point::new(3, 3), AiBehavior::Chase, None);
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        let AiAction::Attacked { result, special } = out[0].action else {
            panic!("expected attack, got {:?}", out[0].action);
        };
        assert_eq!(result.defender, h);
        assert!(special.is_none());
        assert_eq!(store.get::<Health>(h).map(|x| x.current), Some(30 - result.damage));
    }

    #[test]
    fn certain_poison_special_applies() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(2, 2));
        let special = SpecialAttack {
            kind: SpecialKind::Poison,
            chance: 100,
            magnitude: 2,
            duration: 3,
        };
        monster(&mut store, Point::new(2, 3), AiBehavior::Chase, Some(special));
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        assert!(matches!(out[0].action, AiAction::Attacked { special: Some(_), .. }));
        assert_eq!(effects::total(&store, h, StatusKind::Poison), 2);
    }

    #[test]
    fn lifedrain_moves_health() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(2, 2));
        let special = SpecialAttack {
            kind: SpecialKind::Lifedrain,
            chance: 100,
            magnitude: 4,
            duration: 0,
        };
        let m = monster(&mut store, Point::new(2, 3), AiBehavior::Chase, Some(special));
        if let Some(x) = store.get_mut::<Health>(m) {
            x.damage(5);
        }
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        let AiAction::Attacked { special: Some(s), .. } = out[0].action else {
            panic!("expected drain");
        };
        assert_eq!(s.drained, 4);
        assert_eq!(store.get::<Health>(m).map(|x| x.current), Some(9));
    }

    #[test]
    fn survivors_are_targeted_after_a_kill() {
        let mut store = Store::new();
        let a = hero(&mut store, Point::new(2, 2));
        let b = hero(&mut store, Point::new(12, 12));
        if let Some(h) = store.get_mut::<Health>(a) {
            h.current = 1;
        }
        let first = monster(&mut store, Point::new(2, 3), AiBehavior::Chase, None);
        let second = monster(&mut store, Point::new(12, 13), AiBehavior::Chase, None);
        for m in [first, second] {
            store.add(m, CombatStats { attack: 50, defense: 0 });
        }

        let out = run_ai(&mut store, &open_map(), &[a, b], Point::new(2, 2), &mut seeded(1));
        assert_eq!(out[0].target, Some(a));
        assert!(matches!(out[0].action, AiAction::Attacked { result, .. } if result.killed));
        assert_eq!(out[1].target, Some(b));
        assert!(matches!(out[1].action, AiAction::Attacked { result, .. } if result.defender == b));
        assert!(store.get::<Health>(b).is_some_and(|h| h.current < 30));
    }

    #[test]
    fn fatal_lifedrain_is_flagged() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(2, 2));
        store.add(h, CombatStats { attack: 3, defense: 10 });
        if let Some(x) = store.get_mut::<Health>(h) {
            x.current = 2;
        }
        let special = SpecialAttack {
            kind: SpecialKind::Lifedrain,
            chance: 100,
            magnitude: 4,
            duration: 0,
        };
        monster(&mut store, Point::new(2, 3), AiBehavior::Chase, Some(special));
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        let AiAction::Attacked { result, special: Some(s) } = out[0].action else {
            panic!("expected drain, got {:?}", out[0].action);
        };
        assert_eq!(result.damage, 1);
        assert!(!result.killed);
        assert_eq!(s.drained, 1);
        assert!(s.killed);
        assert!(!is_alive(&store, h));
    }

    #[test]
    fn stunned_monster_skips() {
        let mut store = Store::new();
        let h = hero(&mut store, Point::new(2, 2));
        let m = monster(&mut store, Point::new(2, 3), AiBehavior::Chase, None);
        effects::apply_effect(&mut store, m, ActiveEffect::new(StatusKind::Stun, 0, 1));
        let out = run_ai(&mut store, &open_map(), &[h], Point::new(0, 0), &mut seeded(1));
        assert_eq!(out[0].action, AiAction::Stunned);
        assert_eq!(store.get::<Health>(h).map(|x| x.current), Some(30));
    }

    #[test]
    fn walls_and_blockers_stop_steps() {
        let mut store = Store::new();
        let mut map = open_map();
        let h = hero(&mut store, Point::new(2, 5));
        // Monster boxed in on the side facing the hero.
        for y in 4..=6 {
            map.set_kind(Point::new(5, y), TileKind::Wall);
        }
        monster(&mut store, Point::new(6, 5), AiBehavior::Chase, None);
        let out = run_ai(&mut store, &map, &[h], Point::new(0, 0), &mut seeded(1));
        assert_eq!(out[0].action, AiAction::Blocked);
    }

    #[test]
    fn no_target_no_action() {
        let mut store = Store::new();
        monster(&mut store, Point::new(6, 5), AiBehavior::Chase, None);
        let out = run_ai(&mut store, &open_map(), &[], Point::new(0, 0), &mut seeded(1));
        assert_eq!(out[0].action, AiAction::Idle);
        assert_eq!(out[0].target, None);
    }
}
