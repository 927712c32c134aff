//! Status-effect lifecycle.
//!
//! The tick only counts down. Damage from poison and self-burn is read from
//! [`periodic_damage`] by the caller before the tick, so every source of
//! damage can be attributed separately.

use delve_foundation::EntityId;
use delve_storage::{ActiveEffect, StatusEffects, StatusKind, Store};

/// Adds `effect` to `id`, creating the effect list if needed.
///
/// Returns `false` for dead or unknown ids.
pub fn apply_effect(store: &mut Store, id: EntityId, effect: ActiveEffect) -> bool {
    if let Some(list) = store.get_mut::<StatusEffects>(id) {
        list.effects.push(effect);
        return true;
    }
    store.add(
        id,
        StatusEffects {
            effects: vec![effect],
        },
    )
}

/// Summed magnitude of active effects of `kind` on `id`.
#[must_use]
pub fn total(store: &Store, id: EntityId, kind: StatusKind) -> i32 {
    store.get::<StatusEffects>(id).map_or(0, |e| e.total(kind))
}

/// True if `id` carries an active effect of `kind`.
#[must_use]
pub fn has(store: &Store, id: EntityId, kind: StatusKind) -> bool {
    store.get::<StatusEffects>(id).is_some_and(|e| e.has(kind))
}

/// True if `id` must skip its next action.
#[must_use]
pub fn is_stunned(store: &Store, id: EntityId) -> bool {
    has(store, id, StatusKind::Stun)
}

/// Per-turn damage from poison and self-burn.
#[must_use]
pub fn periodic_damage(store: &Store, id: EntityId) -> PeriodicDamage {
    PeriodicDamage {
        poison: total(store, id, StatusKind::Poison).max(0),
        burn: total(store, id, StatusKind::SelfBurn).max(0),
    }
}

/// Damage owed for one turn, split by source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeriodicDamage {
    /// From poison.
    pub poison: i32,
    /// From self-burn.
    pub burn: i32,
}

impl PeriodicDamage {
    /// Combined damage.
    #[must_use]
    pub const fn total(&self) -> i32 {
        self.poison + self.burn
    }
}

/// Advances every effect on `id` by one turn. Returns the kinds that expired.
pub fn advance(store: &mut Store, id: EntityId) -> Vec<StatusKind> {
    store
        .get_mut::<StatusEffects>(id)
        .map(StatusEffects::advance)
        .unwrap_or_default()
}

/// Removes every effect of `kind` from `id`; returns how many were removed.
pub fn cure(store: &mut Store, id: EntityId, kind: StatusKind) -> usize {
    store
        .get_mut::<StatusEffects>(id)
        .map_or(0, |e| e.clear(kind))
}
