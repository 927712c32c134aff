//! Level generation: partition, carve, connect, place stairs, populate.

use delve_foundation::{GameRng, Point, Result};
use log::debug;
use rand::Rng;

use crate::bsp::{BspTree, SplitRules};
use crate::config::{CorridorStyle, GeneratorConfig};
use crate::content::ContentTables;
use crate::level::Level;
use crate::map::{Map, Rect};
use crate::populate::{Layout, populate};
use crate::tile::TileKind;

/// Generates one floor.
///
/// Identical config, tables and rng state produce an identical level.
///
/// # Errors
///
/// Returns `InvalidConfig` if `config` fails validation.
pub fn generate(
    config: &GeneratorConfig,
    tables: &ContentTables,
    rng: &mut GameRng,
) -> Result<Level> {
    config.validate()?;

    let rules = SplitRules {
        min_leaf: config.min_leaf,
        max_leaf: config.max_leaf,
        split_ratio: config.split_ratio,
    };
    let tree = BspTree::build(Rect::new(0, 0, config.width, config.height), rules, rng);

    let mut carver = Carver::new(config.width, config.height);
    let leaves = tree.leaves();
    let mut room_of_node = vec![None; tree.len()];
    for &leaf in &leaves {
        let room = carve_room(tree.node(leaf).rect, config, rng);
        room_of_node[leaf] = Some(carver.add_room(room));
    }
    debug!(
        "floor {}: {} leaves, {} rooms",
        config.floor,
        leaves.len(),
        carver.rooms.len()
    );

    for node in tree.internal_post_order() {
        let Some((a, b)) = tree.node(node).children else {
            continue;
        };
        let left: Vec<usize> = tree.leaves_under(a).iter().filter_map(|l| room_of_node[*l]).collect();
        let right: Vec<usize> = tree.leaves_under(b).iter().filter_map(|l| room_of_node[*l]).collect();
        if left.is_empty() || right.is_empty() {
            continue;
        }
        let from = left[rng.gen_range(0..left.len())];
        let to = right[rng.gen_range(0..right.len())];
        carver.connect(from, to, config.corridor, rng);
    }

    carver.place_doors(rng);

    let Carver { mut map, rooms, .. } = carver;

    let start_room = rng.gen_range(0..rooms.len());
    let player_spawn = rooms[start_room].center();
    let down_room = farthest_room(&rooms, start_room);
    let stairs_down = if down_room == start_room {
        pick_tile(&rooms[down_room], &[player_spawn], rng).unwrap_or(player_spawn)
    } else {
        rooms[down_room].center()
    };
    map.set_kind(stairs_down, TileKind::StairsDown);

    let stairs_up = if config.floor > 1 {
        let up = pick_tile(&rooms[start_room], &[player_spawn, stairs_down], rng);
        if let Some(p) = up {
            map.set_kind(p, TileKind::StairsUp);
        }
        up
    } else {
        None
    };
    debug!(
        "floor {}: start room {start_room}, stairs down at {stairs_down} in room {down_room}",
        config.floor
    );

    let mut reserved = vec![player_spawn, stairs_down];
    reserved.extend(stairs_up);
    let layout = Layout {
        map: &map,
        rooms: &rooms,
        start_room,
        far_room: down_room,
        player_spawn,
        reserved,
    };
    let spawns = populate(&layout, config, tables, rng);

    Ok(Level {
        floor: config.floor,
        map,
        rooms,
        start_room,
        player_spawn,
        stairs_down,
        stairs_up,
        spawns,
    })
}

/// Picks a room inside `leaf`, inset by the padding.
fn carve_room(leaf: Rect, config: &GeneratorConfig, rng: &mut GameRng) -> Rect {
    let pad = config.padding();
    let avail_w = (leaf.w - 2 * pad).max(1);
    let avail_h = (leaf.h - 2 * pad).max(1);
    let w = side(config.min_room, avail_w, rng);
    let h = side(config.min_room, avail_h, rng);
    let x = leaf.x + pad + rng.gen_range(0..=avail_w - w);
    let y = leaf.y + pad + rng.gen_range(0..=avail_h - h);
    Rect::new(x, y, w, h)
}

fn side(min: i32, avail: i32, rng: &mut GameRng) -> i32 {
    if avail <= min {
        avail
    } else {
        rng.gen_range(min..=avail)
    }
}

/// Index of the room whose center is farthest from the start room's.
/// Ties go to the lower index.
fn farthest_room(rooms: &[Rect], start: usize) -> usize {
    let origin = rooms[start].center();
    let mut best = start;
    let mut best_dist = -1;
    for (i, room) in rooms.iter().enumerate() {
        let d = origin.distance_sq(room.center());
        if d > best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

fn pick_tile(room: &Rect, avoid: &[Point], rng: &mut GameRng) -> Option<Point> {
    let tiles: Vec<Point> = room.points().filter(|p| !avoid.contains(p)).collect();
    if tiles.is_empty() {
        None
    } else {
        Some(tiles[rng.gen_range(0..tiles.len())])
    }
}

// =============================================================================
// Carving
// =============================================================================

struct Carver {
    map: Map,
    rooms: Vec<Rect>,
    /// Perimeter tiles of each room opened by corridors.
    breaches: Vec<Vec<Point>>,
}

impl Carver {
    fn new(width: i32, height: i32) -> Self {
        Self {
            map: Map::filled(width, height, TileKind::Wall),
            rooms: Vec::new(),
            breaches: Vec::new(),
        }
    }

    fn add_room(&mut self, room: Rect) -> usize {
        for p in room.points() {
            self.map.set_kind(p, TileKind::Floor);
        }
        self.rooms.push(room);
        self.breaches.push(Vec::new());
        self.rooms.len() - 1
    }

    /// Converts one wall tile to floor, recording room breaches.
    fn dig(&mut self, p: Point) {
        if self.map.kind(p) != TileKind::Wall || !self.map.in_bounds(p) {
            return;
        }
        self.map.set_kind(p, TileKind::Floor);
        for (i, room) in self.rooms.iter().enumerate() {
            if room.on_perimeter(p) {
                self.breaches[i].push(p);
            }
        }
    }

    fn horizontal(&mut self, y: i32, x1: i32, x2: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.dig(Point::new(x, y));
        }
    }

    fn vertical(&mut self, x: i32, y1: i32, y2: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.dig(Point::new(x, y));
        }
    }

    fn l_shape(&mut self, a: Point, b: Point, rng: &mut GameRng) {
        if rng.gen_bool(0.5) {
            self.horizontal(a.y, a.x, b.x);
            self.vertical(b.x, a.y, b.y);
        } else {
            self.vertical(a.x, a.y, b.y);
            self.horizontal(b.y, a.x, b.x);
        }
    }

    fn connect(&mut self, from: usize, to: usize, style: CorridorStyle, rng: &mut GameRng) {
        let (ra, rb) = (self.rooms[from], self.rooms[to]);
        let (a, b) = (ra.center(), rb.center());
        match style {
            CorridorStyle::LShaped => self.l_shape(a, b, rng),
            CorridorStyle::Straight => {
                let (col_lo, col_hi) = (ra.x.max(rb.x), ra.right().min(rb.right()) - 1);
                let (row_lo, row_hi) = (ra.y.max(rb.y), ra.bottom().min(rb.bottom()) - 1);
                if col_lo <= col_hi {
                    let x = rng.gen_range(col_lo..=col_hi);
                    self.vertical(x, a.y, b.y);
                } else if row_lo <= row_hi {
                    let y = rng.gen_range(row_lo..=row_hi);
                    self.horizontal(y, a.x, b.x);
                } else {
                    self.l_shape(a, b, rng);
                }
            }
            CorridorStyle::ZShaped => {
                if (b.x - a.x).abs() >= (b.y - a.y).abs() {
                    let mid = (a.x + b.x) / 2;
                    self.horizontal(a.y, a.x, mid);
                    self.vertical(mid, a.y, b.y);
                    self.horizontal(b.y, mid, b.x);
                } else {
                    let mid = (a.y + b.y) / 2;
                    self.vertical(a.x, a.y, mid);
                    self.horizontal(mid, a.x, b.x);
                    self.vertical(b.x, mid, b.y);
                }
            }
        }
    }

    /// Turns exactly one perimeter tile per room into a door.
    ///
    /// Prefers the openings dug by corridors; a room with none gets its door
    /// on a random interior-facing wall tile.
    fn place_doors(&mut self, rng: &mut GameRng) {
        for (i, room) in self.rooms.iter().enumerate() {
            let mut candidates = self.breaches[i].clone();
            candidates.sort_unstable();
            candidates.dedup();
            candidates.retain(|p| self.map.kind(*p) == TileKind::Floor);
            if candidates.is_empty() {
                candidates = room
                    .perimeter()
                    .into_iter()
                    .filter(|p| {
                        self.map.kind(*p) == TileKind::Wall
                            && p.x > 0
                            && p.y > 0
                            && p.x < self.map.width() - 1
                            && p.y < self.map.height() - 1
                    })
                    .collect();
            }
            if candidates.is_empty() {
                continue;
            }
            let door = candidates[rng.gen_range(0..candidates.len())];
            self.map.set_kind(door, TileKind::Door);
        }
    }
}
