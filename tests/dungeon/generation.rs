//! Level generation with the built-in content set.

use delve_dungeon::{CorridorStyle, GeneratorConfig, TileKind, generate};
use delve_foundation::{ErrorKind, seeded};
use delve_runtime::content;

fn scenario() -> GeneratorConfig {
    GeneratorConfig::new()
        .with_size(40, 20)
        .with_leaf_sizes(8, 20)
}

#[test]
fn forty_by_twenty_seed_42() {
    let level = generate(&scenario(), &content::builtin(), &mut seeded(42)).unwrap();
    assert!(!level.rooms.is_empty());
    assert_eq!(level.map.find_all(TileKind::StairsDown).len(), 1);
    assert!(level.is_connected());
    assert_eq!(level.map.kind(level.stairs_down), TileKind::StairsDown);
}

#[test]
fn same_seed_same_tiles() {
    let tables = content::builtin();
    let a = generate(&scenario(), &tables, &mut seeded(42)).unwrap();
    let b = generate(&scenario(), &tables, &mut seeded(42)).unwrap();
    for (p, tile) in a.map.iter() {
        assert_eq!(tile.kind, b.map.kind(p), "tile {p} differs");
    }
    assert_eq!(a.spawns, b.spawns);
}

#[test]
fn spawns_land_on_walkable_tiles() {
    let tables = content::builtin();
    for seed in 0..10 {
        let level = generate(&GeneratorConfig::for_floor(3), &tables, &mut seeded(seed)).unwrap();
        for p in level.spawns.positions() {
            assert!(level.map.is_walkable(p), "seed {seed}: spawn at {p} is not walkable");
            assert_ne!(p, level.stairs_down);
        }
    }
}

#[test]
fn every_floor_has_an_elite() {
    let tables = content::builtin();
    for floor in 1..=6 {
        let level = generate(&GeneratorConfig::for_floor(floor), &tables, &mut seeded(7)).unwrap();
        assert_eq!(level.spawns.elites.len(), 1, "floor {floor}");
    }
}

#[test]
fn corridor_styles_connect_every_room() {
    let tables = content::builtin();
    for style in [CorridorStyle::LShaped, CorridorStyle::Straight, CorridorStyle::ZShaped] {
        for seed in 0..8 {
            let config = GeneratorConfig::new().with_corridor(style);
            let level = generate(&config, &tables, &mut seeded(seed)).unwrap();
            assert!(level.is_connected(), "{style:?} seed {seed}");
        }
    }
}

#[test]
fn next_floor_grows_the_budget() {
    let first = scenario();
    let second = first.next_floor();
    assert_eq!(second.floor, 2);
    assert_eq!((second.width, second.height), (40, 20));
    assert!(second.enemy_budget > GeneratorConfig::for_floor(1).enemy_budget);
    let level = generate(&second, &content::builtin(), &mut seeded(42)).unwrap();
    assert!(level.stairs_up.is_some());
}

#[test]
fn inverted_leaf_sizes_are_rejected() {
    let config = GeneratorConfig::new().with_leaf_sizes(20, 8);
    let err = generate(&config, &content::builtin(), &mut seeded(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig { .. }));
}
