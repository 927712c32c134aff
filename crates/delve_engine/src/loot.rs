//! Death handling and loot drops.

use delve_foundation::{EntityId, GameRng, roll_percent};
use delve_storage::{LootTable, Store};
use log::{debug, warn};

use crate::factory::Factory;
use crate::world::{is_alive, is_player, position_of};

/// Rolls `id`'s loot table and spawns the winners at its position.
///
/// Every entry draws from `rng` once, in table order, whether or not an
/// earlier entry dropped. Glyphs with no matching template are skipped.
pub fn drop_loot(store: &mut Store, factory: &Factory<'_>, id: EntityId, rng: &mut GameRng) -> Vec<EntityId> {
    let (Some(pos), Some(table)) = (position_of(store, id), store.get::<LootTable>(id).cloned()) else {
        return Vec::new();
    };
    let mut dropped = Vec::new();
    for entry in &table.entries {
        if !roll_percent(rng, entry.chance) {
            continue;
        }
        match factory.tables().find_by_glyph(entry.glyph) {
            Some(target) => dropped.push(factory.spawn_loot(store, target, pos)),
            None => warn!("loot glyph {:?} matches no template", entry.glyph),
        }
    }
    dropped
}

/// Removes a dead non-player from the world, dropping its loot first.
///
/// Players and living entities are left alone. Returns the dropped items.
pub fn resolve_death(
    store: &mut Store,
    factory: &Factory<'_>,
    id: EntityId,
    rng: &mut GameRng,
) -> Vec<EntityId> {
    if !store.exists(id) || is_alive(store, id) || is_player(store, id) {
        return Vec::new();
    }
    let dropped = drop_loot(store, factory, id, rng);
    store.destroy(id);
    debug!("{id} died, dropped {}", dropped.len());
    dropped
}
