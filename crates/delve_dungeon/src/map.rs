//! The tile grid and room rectangles.

use std::collections::VecDeque;
use std::fmt;

use delve_foundation::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tile::{Tile, TileKind};

// =============================================================================
// Rect
// =============================================================================

/// An axis-aligned rectangle of tiles. `x + w` and `y + h` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in tiles.
    pub w: i32,
    /// Height in tiles.
    pub h: i32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the right column.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the bottom row.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Integer center.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// True if `p` lies inside.
    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Returns the rectangle grown by `n` on every side.
    #[must_use]
    pub const fn expand(&self, n: i32) -> Self {
        Self::new(self.x - n, self.y - n, self.w + 2 * n, self.h + 2 * n)
    }

    /// Every point inside, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| Point::new(x, y)))
    }

    /// The ring of tiles just outside the rectangle, excluding corners.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn perimeter(&self) -> Vec<Point> {
        let mut ring = Vec::with_capacity((2 * (self.w + self.h)).max(0) as usize);
        for x in self.x..self.right() {
            ring.push(Point::new(x, self.y - 1));
            ring.push(Point::new(x, self.bottom()));
        }
        for y in self.y..self.bottom() {
            ring.push(Point::new(self.x - 1, y));
            ring.push(Point::new(self.right(), y));
        }
        ring.sort_unstable();
        ring
    }

    /// True if `p` is on the ring just outside, corners excluded.
    #[must_use]
    pub const fn on_perimeter(&self, p: Point) -> bool {
        let in_cols = p.x >= self.x && p.x < self.right();
        let in_rows = p.y >= self.y && p.y < self.bottom();
        (in_cols && (p.y == self.y - 1 || p.y == self.bottom()))
            || (in_rows && (p.x == self.x - 1 || p.x == self.right()))
    }
}

// =============================================================================
// Map
// =============================================================================

/// A fixed-size grid of tiles, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Map {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Map {
    /// Creates a map filled with `kind`.
    #[must_use]
    pub fn filled(width: i32, height: i32, kind: TileKind) -> Self {
        let len = usize::try_from(width.max(0) * height.max(0)).unwrap_or(0);
        Self {
            width: width.max(0),
            height: height.max(0),
            tiles: vec![Tile::new(kind); len],
        }
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// True if `p` lies on the grid.
    #[must_use]
    pub const fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| (p.y * self.width + p.x) as usize)
    }

    /// The tile at `p`, or `None` out of bounds.
    #[must_use]
    pub fn at(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    /// Mutable access to the tile at `p`.
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Tile> {
        self.index(p).map(move |i| &mut self.tiles[i])
    }

    /// The kind at `p`; out-of-bounds reads as wall.
    #[must_use]
    pub fn kind(&self, p: Point) -> TileKind {
        self.at(p).map_or(TileKind::Wall, |t| t.kind)
    }

    /// True if `p` is in bounds and walkable.
    #[must_use]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::walkable)
    }

    /// True if `p` stops sight. Out-of-bounds tiles do.
    #[must_use]
    pub fn blocks_sight(&self, p: Point) -> bool {
        self.at(p).is_none_or(Tile::blocks_sight)
    }

    /// Replaces the kind at `p`, keeping its visibility flags.
    ///
    /// Returns `false` out of bounds.
    pub fn set_kind(&mut self, p: Point, kind: TileKind) -> bool {
        match self.at_mut(p) {
            Some(tile) => {
                tile.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Clears the `visible` flag everywhere. `explored` is untouched.
    pub fn clear_visible(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    /// Iterates `(point, tile)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> + '_ {
        let width = self.width.max(1);
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let i = i as i32;
            (Point::new(i % width, i / width), tile)
        })
    }

    /// Every point of the given kind, row by row.
    #[must_use]
    pub fn find_all(&self, kind: TileKind) -> Vec<Point> {
        self.iter()
            .filter(|(_, t)| t.kind == kind)
            .map(|(p, _)| p)
            .collect()
    }

    /// Points reachable from `start` through passable tiles (doors count),
    /// moving in eight directions.
    #[must_use]
    pub fn reachable_from(&self, start: Point) -> Vec<bool> {
        let mut seen = vec![false; self.tiles.len()];
        let Some(first) = self.index(start) else {
            return seen;
        };
        seen[first] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            for d in delve_foundation::Direction::ALL {
                let next = p.step(d);
                let Some(i) = self.index(next) else { continue };
                if !seen[i] && self.tiles[i].kind.passable() {
                    seen[i] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// True if `p` was marked in a mask returned by [`Map::reachable_from`].
    #[must_use]
    pub fn is_marked(&self, mask: &[bool], p: Point) -> bool {
        self.index(p).is_some_and(|i| mask.get(i).copied().unwrap_or(false))
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let glyph = self.at(Point::new(x, y)).map_or(' ', |t| t.kind.glyph());
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
