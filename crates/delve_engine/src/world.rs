//! Read helpers over the store shared by every system.

use delve_foundation::{EntityId, Point};
use delve_storage::{ComponentKind, Equipment, Health, Player, Position, Store, Vision};

/// Grid position of `id`.
#[must_use]
pub fn position_of(store: &Store, id: EntityId) -> Option<Point> {
    store.get::<Position>(id).map(|p| p.0)
}

/// True if `id` exists and has health left.
#[must_use]
pub fn is_alive(store: &Store, id: EntityId) -> bool {
    store.get::<Health>(id).is_some_and(Health::is_alive)
}

/// True if `id` is human-controlled.
#[must_use]
pub fn is_player(store: &Store, id: EntityId) -> bool {
    store.get::<Player>(id).is_some()
}

/// Players and non-players are on opposite sides; everyone else is an ally.
#[must_use]
pub fn are_allies(store: &Store, a: EntityId, b: EntityId) -> bool {
    is_player(store, a) == is_player(store, b)
}

/// Every positioned entity standing on `p`, in id order.
#[must_use]
pub fn entities_at(store: &Store, p: Point) -> Vec<EntityId> {
    store
        .query(&[ComponentKind::Position])
        .into_iter()
        .filter(|id| position_of(store, *id) == Some(p))
        .collect()
}

/// The first entity on `p` carrying `kind`.
#[must_use]
pub fn find_at(store: &Store, p: Point, kind: ComponentKind) -> Option<EntityId> {
    store
        .query(&[kind, ComponentKind::Position])
        .into_iter()
        .find(|id| position_of(store, *id) == Some(p))
}

/// The blocking entity on `p`, if any.
#[must_use]
pub fn blocker_at(store: &Store, p: Point) -> Option<EntityId> {
    find_at(store, p, ComponentKind::Blocking)
}

/// Sight radius including equipment.
#[must_use]
pub fn vision_radius(store: &Store, id: EntityId) -> Option<i32> {
    let base = store.get::<Vision>(id)?.radius;
    let bonus = store
        .get::<Equipment>(id)
        .map_or(0, |e| e.modifiers().vision);
    Some((base + bonus).max(0))
}
