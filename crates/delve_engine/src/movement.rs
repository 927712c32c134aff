//! Movement and bump classification.

use delve_dungeon::{Map, TileKind};
use delve_foundation::{Direction, EntityId};
use delve_storage::{ComponentKind, Furniture, Health, Position, Store};
use log::trace;

use crate::action::{BlockReason, MoveResult};
use crate::world::{are_allies, blocker_at, position_of};

/// Resolves a step of `actor` in `direction`.
///
/// Checks run in order: bounds, closed doors (opened in place), blocking
/// occupants (furniture, allies, hostiles), then the tile itself. Only a
/// `Moved` result changes the actor's position; an opened door changes the
/// map. Actors without a position are reported as out of bounds.
pub fn resolve_move(
    store: &mut Store,
    map: &mut Map,
    actor: EntityId,
    direction: Direction,
) -> MoveResult {
    let Some(from) = position_of(store, actor) else {
        return MoveResult::Blocked(BlockReason::OutOfBounds);
    };
    let to = from.step(direction);

    if !map.in_bounds(to) {
        return MoveResult::Blocked(BlockReason::OutOfBounds);
    }
    if map.kind(to) == TileKind::Door {
        map.set_kind(to, TileKind::Floor);
        trace!("{actor} opened door at {to}");
        return MoveResult::Blocked(BlockReason::DoorOpened(to));
    }
    if let Some(occupant) = blocker_at(store, to) {
        if store.has(occupant, ComponentKind::Furniture) {
            return MoveResult::Interact(occupant);
        }
        if store.get::<Health>(occupant).is_some() {
            if are_allies(store, actor, occupant) {
                return MoveResult::Blocked(BlockReason::Ally(occupant));
            }
            return MoveResult::Attack(occupant);
        }
        return MoveResult::Blocked(BlockReason::Wall);
    }
    if !map.is_walkable(to) {
        return MoveResult::Blocked(BlockReason::Wall);
    }

    store.add(actor, Position(to));
    MoveResult::Moved { from, to }
}

/// True if `furniture` is still unused.
#[must_use]
pub fn furniture_unused(store: &Store, furniture: EntityId) -> bool {
    store.get::<Furniture>(furniture).is_some_and(|f| !f.used)
}
