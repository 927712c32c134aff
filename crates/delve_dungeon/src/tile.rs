//! Tiles and tile kinds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What occupies a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileKind {
    /// Solid rock.
    Wall,
    /// Open ground.
    Floor,
    /// A closed door. Opens into floor when bumped.
    Door,
    /// Leads to the previous floor.
    StairsUp,
    /// Leads to the next floor.
    StairsDown,
    /// Decorative debris; walkable.
    Rubble,
    /// Decorative column; solid.
    Pillar,
}

impl TileKind {
    /// True if actors may stand on this tile.
    #[must_use]
    pub const fn walkable(self) -> bool {
        matches!(
            self,
            Self::Floor | Self::StairsUp | Self::StairsDown | Self::Rubble
        )
    }

    /// True if this tile stops line of sight.
    #[must_use]
    pub const fn blocks_sight(self) -> bool {
        matches!(self, Self::Wall | Self::Door | Self::Pillar)
    }

    /// True for tiles a level can be traversed through, counting closed
    /// doors as passable.
    #[must_use]
    pub const fn passable(self) -> bool {
        self.walkable() || matches!(self, Self::Door)
    }

    /// Default glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
            Self::Door => '+',
            Self::StairsUp => '<',
            Self::StairsDown => '>',
            Self::Rubble => ',',
            Self::Pillar => 'O',
        }
    }
}

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
    /// The kind, from which walkability and opacity derive.
    pub kind: TileKind,
    /// In view of at least one observer right now.
    pub visible: bool,
    /// Has been seen at some point. Never reset.
    pub explored: bool,
}

impl Tile {
    /// Creates an unseen tile.
    #[must_use]
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            visible: false,
            explored: false,
        }
    }

    /// See [`TileKind::walkable`].
    #[must_use]
    pub const fn walkable(&self) -> bool {
        self.kind.walkable()
    }

    /// See [`TileKind::blocks_sight`].
    #[must_use]
    pub const fn blocks_sight(&self) -> bool {
        self.kind.blocks_sight()
    }
}
