//! Population pass: turns a carved map into spawn descriptors.
//!
//! Nothing here creates entities. Every placement lands on a distinct
//! walkable room tile, and every shortfall (no templates, no free tiles)
//! stops placement early instead of failing.

use std::collections::BTreeSet;

use delve_foundation::{GameRng, Point};
use log::{debug, warn};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::config::GeneratorConfig;
use crate::content::{ContentTables, Template};
use crate::level::{Spawn, SpawnLists};
use crate::map::{Map, Rect};
use crate::tile::TileKind;

/// Read-only view of a carved floor.
#[derive(Debug)]
pub struct Layout<'a> {
    /// Carved grid.
    pub map: &'a Map,
    /// Room interiors.
    pub rooms: &'a [Rect],
    /// Room holding the player spawn.
    pub start_room: usize,
    /// Room farthest from the start; hosts the elite.
    pub far_room: usize,
    /// Where players appear.
    pub player_spawn: Point,
    /// Tiles that must stay empty (spawn, stairs).
    pub reserved: Vec<Point>,
}

struct Placer<'a> {
    layout: &'a Layout<'a>,
    occupied: BTreeSet<Point>,
}

impl<'a> Placer<'a> {
    fn new(layout: &'a Layout<'a>) -> Self {
        Self {
            layout,
            occupied: layout.reserved.iter().copied().collect(),
        }
    }

    /// A random free tile in `room` passing `accept`, marked occupied.
    fn take(
        &mut self,
        room: usize,
        rng: &mut GameRng,
        accept: impl Fn(Point) -> bool,
    ) -> Option<Point> {
        let map = self.layout.map;
        let free: Vec<Point> = self.layout.rooms[room]
            .points()
            .filter(|p| map.kind(*p) == TileKind::Floor && !self.occupied.contains(p) && accept(*p))
            .collect();
        if free.is_empty() {
            return None;
        }
        let p = free[rng.gen_range(0..free.len())];
        self.occupied.insert(p);
        Some(p)
    }

    fn take_anywhere(&mut self, rng: &mut GameRng) -> Option<Point> {
        let rooms = self.layout.rooms.len();
        let room = rng.gen_range(0..rooms);
        self.take(room, rng, |_| true)
    }
}

fn choose<'t, T>(pool: &[&'t T], rng: &mut GameRng) -> &'t T {
    pool[rng.gen_range(0..pool.len())]
}

/// Produces spawn descriptors for a carved floor.
#[must_use]
pub fn populate(
    layout: &Layout<'_>,
    config: &GeneratorConfig,
    tables: &ContentTables,
    rng: &mut GameRng,
) -> SpawnLists {
    let mut lists = SpawnLists::default();
    if layout.rooms.is_empty() {
        debug!("floor {}: no rooms, nothing to populate", config.floor);
        return lists;
    }
    let mut placer = Placer::new(layout);

    place_enemies(&mut placer, config, tables, rng, &mut lists.enemies);
    place_elite(&mut placer, config, tables, rng, &mut lists.elites);

    let floor = config.floor;
    scatter(&mut placer, &tables.items_for(floor), config.item_count, rng, &mut lists.items);
    scatter(
        &mut placer,
        &tables.equipment_for(floor),
        config.equipment_count,
        rng,
        &mut lists.equipment,
    );
    scatter(
        &mut placer,
        &tables.inscriptions_for(floor),
        config.inscription_count,
        rng,
        &mut lists.inscriptions,
    );

    place_furniture(&mut placer, config, tables, rng, &mut lists.furniture);

    debug!(
        "floor {}: {} enemies, {} elites, {} items, {} equipment, {} inscriptions, {} furniture",
        floor,
        lists.enemies.len(),
        lists.elites.len(),
        lists.items.len(),
        lists.equipment.len(),
        lists.inscriptions.len(),
        lists.furniture.len()
    );
    lists
}

/// Spends the enemy budget without overshooting it. Rooms are weighted by
/// their distance from the player spawn; the start room is excluded unless
/// it is the only room.
fn place_enemies(
    placer: &mut Placer<'_>,
    config: &GeneratorConfig,
    tables: &ContentTables,
    rng: &mut GameRng,
    out: &mut Vec<Spawn>,
) {
    let pool: Vec<_> = tables
        .enemies_for(config.floor)
        .into_iter()
        .filter(|t| t.cost > 0)
        .collect();
    if pool.is_empty() || config.enemy_budget == 0 {
        return;
    }

    let layout = placer.layout;
    let candidates: Vec<usize> = if layout.rooms.len() == 1 {
        vec![0]
    } else {
        (0..layout.rooms.len()).filter(|i| *i != layout.start_room).collect()
    };
    let weights: Vec<u32> = candidates
        .iter()
        .map(|i| {
            let d = layout.player_spawn.chebyshev(layout.rooms[*i].center());
            u32::try_from(d.max(1)).unwrap_or(1)
        })
        .collect();
    let Ok(by_distance) = WeightedIndex::new(&weights) else {
        return;
    };

    let mut remaining = config.enemy_budget;
    let mut misses = 0;
    let max_misses = candidates.len() * 2;
    loop {
        let affordable: Vec<_> = pool.iter().copied().filter(|t| t.cost <= remaining).collect();
        if affordable.is_empty() {
            break;
        }
        let template = choose(&affordable, rng);
        let room = candidates[by_distance.sample(rng)];
        if let Some(pos) = placer.take(room, rng, |_| true) {
            out.push(Spawn::new(pos, &template.id));
            remaining -= template.cost;
            continue;
        }
        misses += 1;
        if misses > max_misses {
            warn!(
                "floor {}: ran out of room for enemies with {remaining} budget left",
                config.floor
            );
            break;
        }
    }
}

/// Places one elite in the room farthest from the start.
fn place_elite(
    placer: &mut Placer<'_>,
    config: &GeneratorConfig,
    tables: &ContentTables,
    rng: &mut GameRng,
    out: &mut Vec<Spawn>,
) {
    let pool = tables.elites_for(config.floor);
    if pool.is_empty() {
        return;
    }
    let template = choose(&pool, rng);
    let far = placer.layout.far_room;
    let pos = placer
        .take(far, rng, |_| true)
        .or_else(|| placer.take_anywhere(rng));
    match pos {
        Some(pos) => out.push(Spawn::new(pos, &template.id)),
        None => warn!("floor {}: no free tile for the elite", config.floor),
    }
}

/// Places up to `count` random templates from `pool` in random rooms.
fn scatter<T: Template>(
    placer: &mut Placer<'_>,
    pool: &[&T],
    count: u32,
    rng: &mut GameRng,
    out: &mut Vec<Spawn>,
) {
    if pool.is_empty() {
        return;
    }
    for _ in 0..count {
        let template = choose(pool, rng);
        if let Some(pos) = placer.take_anywhere(rng) {
            out.push(Spawn::new(pos, template.id()));
        }
    }
}

/// One or two pieces per room, each rare with 25% probability. Pieces never
/// sit next to a room opening so they cannot block a doorway.
fn place_furniture(
    placer: &mut Placer<'_>,
    config: &GeneratorConfig,
    tables: &ContentTables,
    rng: &mut GameRng,
    out: &mut Vec<Spawn>,
) {
    let (common, rare) = tables.furniture_for(config.floor);
    if common.is_empty() && rare.is_empty() {
        return;
    }
    let layout = placer.layout;
    for (index, room) in layout.rooms.iter().enumerate() {
        let openings: Vec<Point> = room
            .perimeter()
            .into_iter()
            .filter(|p| layout.map.kind(*p) != TileKind::Wall)
            .collect();
        let pieces = rng.gen_range(1..=2);
        for _ in 0..pieces {
            let wants_rare = rng.gen_bool(0.25);
            let pool = if (wants_rare && !rare.is_empty()) || common.is_empty() {
                &rare
            } else {
                &common
            };
            let template = choose(pool, rng);
            let clear_of_openings = |p: Point| openings.iter().all(|o| o.chebyshev(p) > 1);
            if let Some(pos) = placer.take(index, rng, clear_of_openings) {
                out.push(Spawn::new(pos, &template.id));
            }
        }
    }
}
