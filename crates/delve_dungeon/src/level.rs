//! The generator's output.

use delve_foundation::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::map::{Map, Rect};

/// Where to instantiate one template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spawn {
    /// Grid coordinate.
    pub pos: Point,
    /// Template id in the matching content table.
    pub template: String,
}

impl Spawn {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(pos: Point, template: impl Into<String>) -> Self {
        Self {
            pos,
            template: template.into(),
        }
    }
}

/// Spawn descriptors, one list per content table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpawnLists {
    /// Regular enemies, within the floor's budget.
    pub enemies: Vec<Spawn>,
    /// At most one elite.
    pub elites: Vec<Spawn>,
    /// Consumables.
    pub items: Vec<Spawn>,
    /// Wearables.
    pub equipment: Vec<Spawn>,
    /// Floor text.
    pub inscriptions: Vec<Spawn>,
    /// Furniture.
    pub furniture: Vec<Spawn>,
}

impl SpawnLists {
    /// Every descriptor position, in list order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.enemies
            .iter()
            .chain(&self.elites)
            .chain(&self.items)
            .chain(&self.equipment)
            .chain(&self.inscriptions)
            .chain(&self.furniture)
            .map(|s| s.pos)
    }

    /// Total number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions().count()
    }

    /// True when nothing is to be spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finished floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Level {
    /// Floor number.
    pub floor: u32,
    /// The carved grid.
    pub map: Map,
    /// Room interiors, in partition order.
    pub rooms: Vec<Rect>,
    /// Index into `rooms` of the room holding the player spawn.
    pub start_room: usize,
    /// Where players appear.
    pub player_spawn: Point,
    /// The single way down.
    pub stairs_down: Point,
    /// The way up, on floors after the first.
    pub stairs_up: Option<Point>,
    /// What to instantiate.
    pub spawns: SpawnLists,
}

impl Level {
    /// Mean of all room centers. Falls back to the player spawn when there
    /// are no rooms.
    #[must_use]
    pub fn room_centroid(&self) -> Point {
        let Ok(n) = i32::try_from(self.rooms.len()) else {
            return self.player_spawn;
        };
        if n == 0 {
            return self.player_spawn;
        }
        let (sx, sy) = self
            .rooms
            .iter()
            .map(Rect::center)
            .fold((0, 0), |(sx, sy), c| (sx + c.x, sy + c.y));
        Point::new(sx / n, sy / n)
    }

    /// Index of the room whose interior contains `p`.
    #[must_use]
    pub fn room_at(&self, p: Point) -> Option<usize> {
        self.rooms.iter().position(|r| r.contains(p))
    }

    /// True if every room center is reachable from the player spawn.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let mask = self.map.reachable_from(self.player_spawn);
        self.rooms
            .iter()
            .all(|r| self.map.is_marked(&mask, r.center()))
    }
}
