//! Backpack and equipment actions.
//!
//! Each operation either succeeds and returns the matching [`TurnOutcome`],
//! or returns [`TurnOutcome::Rejected`] without touching the store.

use delve_dungeon::{Map, Rect};
use delve_foundation::{EntityId, GameRng, Point};
use delve_storage::{
    ActiveEffect, ComponentKind, Consumable, ConsumableEffect, EquipSlot, Equipment, Equippable, Equipped,
    Health, Inventory, Position, StatusKind, Store,
};
use log::debug;
use rand::Rng;

use crate::action::{Rejection, TurnOutcome};
use crate::effects;
use crate::world::{blocker_at, find_at, position_of};

const fn reject(reason: Rejection) -> TurnOutcome {
    TurnOutcome::Rejected(reason)
}

/// Shifts maximum health by `delta`, moving current health with it.
///
/// Current health never drops below 1 from a lost bonus.
pub(crate) fn adjust_max_health(store: &mut Store, id: EntityId, delta: i32) {
    if delta == 0 {
        return;
    }
    if let Some(h) = store.get_mut::<Health>(id) {
        h.max = (h.max + delta).max(1);
        h.current = if delta > 0 {
            h.current + delta
        } else {
            h.current.min(h.max).max(1)
        };
    }
}

fn carried(store: &Store, actor: EntityId, item: EntityId) -> bool {
    store.get::<Inventory>(actor).is_some_and(|inv| inv.contains(item))
}

/// Moves the item lying under `actor` into its backpack.
pub fn pick_up(store: &mut Store, actor: EntityId) -> TurnOutcome {
    let Some(pos) = position_of(store, actor) else {
        return reject(Rejection::NotPlaced);
    };
    let Some(item) = find_at(store, pos, ComponentKind::Item) else {
        return reject(Rejection::NothingHere);
    };
    let Some(inventory) = store.get_mut::<Inventory>(actor) else {
        return reject(Rejection::InventoryFull);
    };
    if inventory.is_full() {
        return reject(Rejection::InventoryFull);
    }
    inventory.items.push(item);
    store.remove::<Position>(item);
    debug!("{actor} picked up {item}");
    TurnOutcome::PickedUp(item)
}

/// Uses a carried consumable, then destroys it.
///
/// Teleport moves the actor to a random open tile of a random room; with no
/// open tile in the chosen room the actor stays put but the item is still
/// spent.
pub fn use_item(
    store: &mut Store,
    map: &Map,
    rooms: &[Rect],
    actor: EntityId,
    item: EntityId,
    rng: &mut GameRng,
) -> TurnOutcome {
    if !carried(store, actor, item) {
        return reject(Rejection::NotCarried);
    }
    let Some(effect) = store.get::<Consumable>(item).map(|c| c.effect) else {
        return reject(Rejection::NotUsable);
    };

    match effect {
        ConsumableEffect::Heal(amount) => {
            if let Some(h) = store.get_mut::<Health>(actor) {
                h.heal(amount);
            }
        }
        ConsumableEffect::Buff { kind, magnitude, turns } => {
            effects::apply_effect(store, actor, ActiveEffect::new(kind, magnitude, turns));
        }
        ConsumableEffect::CurePoison => {
            effects::cure(store, actor, StatusKind::Poison);
        }
        ConsumableEffect::Teleport => {
            if let Some(to) = teleport_target(store, map, rooms, rng) {
                store.add(actor, Position(to));
            }
        }
    }

    if let Some(inv) = store.get_mut::<Inventory>(actor) {
        inv.remove(item);
    }
    store.destroy(item);
    debug!("{actor} used {item}: {effect:?}");
    TurnOutcome::Used { item, effect }
}

fn teleport_target(store: &Store, map: &Map, rooms: &[Rect], rng: &mut GameRng) -> Option<Point> {
    if rooms.is_empty() {
        return None;
    }
    let room = rooms[rng.gen_range(0..rooms.len())];
    let open: Vec<Point> = room
        .points()
        .filter(|p| map.is_walkable(*p) && blocker_at(store, *p).is_none())
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.gen_range(0..open.len())])
}

/// Wears a carried item, swapping any occupant of its slot back into the
/// backpack.
///
/// A two-handed item cannot be worn while the off hand is occupied, and an
/// off-hand item cannot be worn while a two-handed item is held.
pub fn equip(store: &mut Store, actor: EntityId, item: EntityId) -> TurnOutcome {
    if !carried(store, actor, item) {
        return reject(Rejection::NotCarried);
    }
    let Some(wearable) = store.get::<Equippable>(item).copied() else {
        return reject(Rejection::NotEquippable);
    };
    let mut equipment = store.get::<Equipment>(actor).cloned().unwrap_or_default();
    let conflict = (wearable.two_handed && equipment.get(EquipSlot::OffHand).is_some())
        || (wearable.slot == EquipSlot::OffHand && equipment.holds_two_hander());
    if conflict {
        return reject(Rejection::TwoHandedConflict);
    }

    let worn = Equipped {
        item,
        modifiers: wearable.modifiers,
        two_handed: wearable.two_handed,
    };
    let previous = equipment.slots.insert(wearable.slot, worn);
    let lost = previous.map_or(0, |p| p.modifiers.max_health);
    if let Some(inv) = store.get_mut::<Inventory>(actor) {
        inv.remove(item);
        if let Some(p) = previous {
            inv.items.push(p.item);
        }
    }
    store.add(actor, equipment);
    adjust_max_health(store, actor, wearable.modifiers.max_health - lost);

    debug!("{actor} equipped {item} in {:?}", wearable.slot);
    TurnOutcome::Equipped {
        item,
        slot: wearable.slot,
        swapped: previous.map(|p| p.item),
    }
}

/// Returns the item worn in `slot` to the backpack.
pub fn unequip(store: &mut Store, actor: EntityId, slot: EquipSlot) -> TurnOutcome {
    let Some(worn) = store
        .get::<Equipment>(actor)
        .and_then(|e| e.get(slot))
        .copied()
    else {
        return reject(Rejection::SlotEmpty);
    };
    match store.get_mut::<Inventory>(actor) {
        Some(inv) if !inv.is_full() => inv.items.push(worn.item),
        _ => return reject(Rejection::InventoryFull),
    }
    if let Some(e) = store.get_mut::<Equipment>(actor) {
        e.slots.remove(&slot);
    }
    adjust_max_health(store, actor, -worn.modifiers.max_health);
    TurnOutcome::Unequipped {
        item: worn.item,
        slot,
    }
}
