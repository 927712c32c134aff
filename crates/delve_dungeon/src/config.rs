//! Generator configuration.

use delve_foundation::{Error, ErrorContext, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How two rooms are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CorridorStyle {
    /// Two straight segments meeting at a random elbow.
    #[default]
    LShaped,
    /// One straight segment when the rooms share a row or column.
    /// Falls back to an L otherwise.
    Straight,
    /// Two half-length carves meeting at the midpoint.
    ZShaped,
}

/// Configuration for one floor's generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Map width in tiles.
    pub width: i32,
    /// Map height in tiles.
    pub height: i32,
    /// Cuts land at least this far from a partition edge.
    pub min_leaf: i32,
    /// Partitions keep splitting while their larger side exceeds this.
    /// Must be at least twice `min_leaf` so an oversized side can always
    /// be cut.
    pub max_leaf: i32,
    /// Aspect ratio at or above which the split orientation is forced.
    pub split_ratio: f32,
    /// Smallest room side.
    pub min_room: i32,
    /// Gap between a room and its partition edge. Values below 1 are
    /// treated as 1 so every room keeps a wall ring inside its leaf.
    pub room_padding: i32,
    /// Corridor shape.
    pub corridor: CorridorStyle,
    /// Floor number, starting at 1.
    pub floor: u32,
    /// Total cost of regular enemies.
    pub enemy_budget: u32,
    /// Consumables to scatter.
    pub item_count: u32,
    /// Equipment pieces to scatter.
    pub equipment_count: u32,
    /// Inscriptions to scatter.
    pub inscription_count: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            min_leaf: 8,
            max_leaf: 20,
            split_ratio: 1.25,
            min_room: 4,
            room_padding: 1,
            corridor: CorridorStyle::LShaped,
            floor: 1,
            enemy_budget: 6,
            item_count: 3,
            equipment_count: 1,
            inscription_count: 1,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration scaled for `floor`: the enemy budget grows by
    /// three per floor and one more item appears every other floor.
    #[must_use]
    pub fn for_floor(floor: u32) -> Self {
        let floor = floor.max(1);
        Self {
            floor,
            enemy_budget: 3 + 3 * floor,
            item_count: 2 + floor / 2,
            equipment_count: 1 + floor / 3,
            ..Self::default()
        }
    }

    /// Configuration for the floor below this one.
    ///
    /// Keeps the map shape and corridor style; population is rescaled as in
    /// [`GeneratorConfig::for_floor`].
    #[must_use]
    pub fn next_floor(&self) -> Self {
        let scaled = Self::for_floor(self.floor + 1);
        Self {
            floor: scaled.floor,
            enemy_budget: scaled.enemy_budget,
            item_count: scaled.item_count,
            equipment_count: scaled.equipment_count,
            ..self.clone()
        }
    }

    /// Sets the map size.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the leaf bounds.
    #[must_use]
    pub fn with_leaf_sizes(mut self, min_leaf: i32, max_leaf: i32) -> Self {
        self.min_leaf = min_leaf;
        self.max_leaf = max_leaf;
        self
    }

    /// Sets the split ratio.
    #[must_use]
    pub fn with_split_ratio(mut self, ratio: f32) -> Self {
        self.split_ratio = ratio;
        self
    }

    /// Sets room size and padding.
    #[must_use]
    pub fn with_rooms(mut self, min_room: i32, padding: i32) -> Self {
        self.min_room = min_room;
        self.room_padding = padding;
        self
    }

    /// Sets the corridor style.
    #[must_use]
    pub fn with_corridor(mut self, corridor: CorridorStyle) -> Self {
        self.corridor = corridor;
        self
    }

    /// Sets the floor number.
    #[must_use]
    pub fn with_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }

    /// Sets the enemy budget.
    #[must_use]
    pub fn with_enemy_budget(mut self, budget: u32) -> Self {
        self.enemy_budget = budget;
        self
    }

    /// Sets the scatter counts.
    #[must_use]
    pub fn with_counts(mut self, items: u32, equipment: u32, inscriptions: u32) -> Self {
        self.item_count = items;
        self.equipment_count = equipment;
        self.inscription_count = inscriptions;
        self
    }

    /// Padding with the lower bound applied.
    #[must_use]
    pub fn padding(&self) -> i32 {
        self.room_padding.max(1)
    }

    /// Checks that the values can produce a level.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let ctx = || ErrorContext::new().with_source("generator config").with_floor(self.floor);
        if self.floor == 0 {
            return Err(Error::invalid_config("floor", "floors start at 1").with_context(ctx()));
        }
        if self.min_room < 1 {
            return Err(Error::invalid_config("min_room", "must be at least 1").with_context(ctx()));
        }
        if self.min_leaf < self.min_room + 2 * self.padding() {
            return Err(Error::invalid_config(
                "min_leaf",
                format!(
                    "{} cannot hold a room of {} with padding {}",
                    self.min_leaf,
                    self.min_room,
                    self.padding()
                ),
            )
            .with_context(ctx()));
        }
        if self.max_leaf < 2 * self.min_leaf {
            return Err(Error::invalid_config(
                "max_leaf",
                format!("must be at least twice min_leaf ({})", self.min_leaf),
            )
            .with_context(ctx()));
        }
        if self.width < self.min_leaf || self.height < self.min_leaf {
            return Err(Error::invalid_config(
                "width",
                format!("map {}x{} is smaller than one leaf", self.width, self.height),
            )
            .with_context(ctx()));
        }
        if self.split_ratio.is_nan() || self.split_ratio < 1.0 {
            return Err(Error::invalid_config("split_ratio", "must be at least 1.0").with_context(ctx()));
        }
        Ok(())
    }
}
