//! Integration tests for Layer 2: Engine
//!
//! Tests combat, status effects and rounds on small hand-built arenas
//! populated from the built-in content.

mod combat;
mod effects;
mod rounds;

use delve_dungeon::{GeneratorConfig, Level, Map, Rect, SpawnLists, TileKind};
use delve_engine::{Factory, GameState};
use delve_foundation::{EntityId, Point, seeded};
use delve_runtime::content;
use delve_storage::Store;

/// Stairs down in the arena's bottom-right corner.
pub const STAIRS: Point = Point::new(10, 3);

/// A 10x3 room with players in the top row from the left and the given
/// enemies placed from the built-in tables.
pub fn arena(classes: &[&str], enemies: &[(&str, Point)]) -> GameState {
    let mut map = Map::filled(12, 5, TileKind::Wall);
    let room = Rect::new(1, 1, 10, 3);
    for p in room.points() {
        map.set_kind(p, TileKind::Floor);
    }
    map.set_kind(STAIRS, TileKind::StairsDown);
    let level = Level {
        floor: 1,
        map,
        rooms: vec![room],
        start_room: 0,
        player_spawn: Point::new(1, 1),
        stairs_down: STAIRS,
        stairs_up: None,
        spawns: SpawnLists::default(),
    };

    let tables = content::builtin();
    let factory = Factory::new(&tables);
    let mut store = Store::new();
    let mut actors = Vec::new();
    for (x, class) in (1..).zip(classes) {
        actors.push(factory.spawn_player(&mut store, class, Point::new(x, 1)).unwrap());
    }
    for (id, pos) in enemies {
        factory.spawn_enemy(&mut store, id, *pos).unwrap();
    }

    let mut state = GameState::from_parts(level, store, actors, tables, GeneratorConfig::new(), seeded(3));
    state.refresh_visibility();
    state
}

/// The enemy standing at `p`.
pub fn enemy_at(state: &GameState, p: Point) -> EntityId {
    delve_engine::world::blocker_at(state.store(), p).unwrap()
}
