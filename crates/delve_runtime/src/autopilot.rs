//! A simple automatic player for unattended runs.
//!
//! Each turn the pilot picks the first of: take the stairs, pick up what is
//! underfoot, drink a heal when low, strike an adjacent enemy, close in on
//! the nearest visible enemy, head for the stairs. When the round asks the
//! same actor again (its last choice was refused or bumped a wall) it
//! tries a random direction instead.

use delve_engine::world::{find_at, is_alive, position_of};
use delve_engine::{Action, ActionSource, GameState};
use delve_foundation::{Direction, EntityId, GameRng, Point, seeded};
use delve_storage::{ComponentKind, Consumable, ConsumableEffect, Health, Inventory};
use rand::Rng;

/// Picks actions for every actor it is asked about.
#[derive(Debug, Clone)]
pub struct AutoPilot {
    rng: GameRng,
    last: Option<(EntityId, u64)>,
}

impl AutoPilot {
    /// Creates a pilot with its own random source.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: seeded(seed),
            last: None,
        }
    }

    fn is_retry(&mut self, actor: EntityId, round: u64) -> bool {
        let key = (actor, round);
        let retry = self.last == Some(key);
        self.last = Some(key);
        retry
    }
}

fn step_towards(from: Point, to: Point) -> Option<Action> {
    Direction::from_delta(to.x - from.x, to.y - from.y).map(Action::Move)
}

fn healing_item(state: &GameState, actor: EntityId) -> Option<EntityId> {
    let store = state.store();
    let health = store.get::<Health>(actor)?;
    if health.current * 3 > health.max {
        return None;
    }
    store
        .get::<Inventory>(actor)?
        .items
        .iter()
        .copied()
        .find(|i| {
            matches!(
                store.get::<Consumable>(*i).map(|c| c.effect),
                Some(ConsumableEffect::Heal(_))
            )
        })
}

fn nearest_enemy(state: &GameState, actor: EntityId, pos: Point) -> Option<Point> {
    let store = state.store();
    let view = state.viewshed(actor)?;
    store
        .query(&[ComponentKind::Ai, ComponentKind::Position])
        .into_iter()
        .filter(|e| is_alive(store, *e))
        .filter_map(|e| position_of(store, e))
        .filter(|p| view.sees(*p))
        .min_by_key(|p| p.distance_sq(pos))
}

impl ActionSource for AutoPilot {
    fn next_action(&mut self, actor: EntityId, state: &GameState) -> Option<Action> {
        if self.is_retry(actor, state.round()) {
            let dir = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            return Some(Action::Move(dir));
        }
        let store = state.store();
        let Some(pos) = position_of(store, actor) else {
            return Some(Action::Wait);
        };

        if pos == state.level().stairs_down {
            return Some(Action::Descend);
        }
        let pack_full = store.get::<Inventory>(actor).is_none_or(Inventory::is_full);
        if !pack_full && find_at(store, pos, ComponentKind::Item).is_some() {
            return Some(Action::PickUp);
        }
        if let Some(item) = healing_item(state, actor) {
            return Some(Action::Use(item));
        }
        if let Some(enemy) = nearest_enemy(state, actor, pos) {
            return step_towards(pos, enemy);
        }
        step_towards(pos, state.level().stairs_down).or(Some(Action::Wait))
    }
}
