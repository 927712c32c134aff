//! Recursive shadowcasting.
//!
//! Each of the eight octants is swept row by row outward from the observer.
//! The row index `j` runs along the octant's fixed axis and the sweep index
//! `dx` along its varying axis; the per-octant matrix maps `(dx, -j)` back to
//! world offsets. Opaque tiles narrow the slope window for the rest of the
//! row, and the next row is only scanned for the window that survived.

use std::collections::BTreeSet;

use delve_foundation::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::map::Map;

/// Octant transforms as `[xx, xy, yx, yy]` columns.
const OCTANTS: [[i32; 4]; 8] = [
    [1, 0, 0, 1],
    [0, 1, 1, 0],
    [0, -1, 1, 0],
    [-1, 0, 0, 1],
    [-1, 0, 0, -1],
    [0, -1, -1, 0],
    [0, 1, -1, 0],
    [1, 0, 0, -1],
];

/// What one observer can see.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewshed {
    /// Tiles in view, ordered.
    pub visible: BTreeSet<Point>,
    /// Radius used for the last computation.
    pub radius: i32,
}

impl Viewshed {
    /// True if `p` was in view at the last update.
    #[must_use]
    pub fn sees(&self, p: Point) -> bool {
        self.visible.contains(&p)
    }
}

/// Tiles visible from `origin` within `radius`, the origin included.
///
/// Out-of-bounds tiles block sight and are never reported.
#[must_use]
pub fn field_of_view(map: &Map, origin: Point, radius: i32) -> BTreeSet<Point> {
    let mut seen = BTreeSet::new();
    if !map.in_bounds(origin) {
        return seen;
    }
    seen.insert(origin);
    if radius <= 0 {
        return seen;
    }
    let mut scan = Scan {
        map,
        origin,
        radius,
        seen: &mut seen,
    };
    for [xx, xy, yx, yy] in OCTANTS {
        scan.cast(1, 1.0, 0.0, Transform { xx, xy, yx, yy });
    }
    seen
}

/// Recomputes `viewshed` for an observer at `origin` and marks the result on
/// the map: every tile in view becomes visible and explored.
///
/// Only sets flags; clear the map's visible layer first when refreshing
/// every observer.
pub fn update_visibility(map: &mut Map, viewshed: &mut Viewshed, origin: Point, radius: i32) {
    viewshed.visible = field_of_view(map, origin, radius);
    viewshed.radius = radius;
    for p in &viewshed.visible {
        if let Some(tile) = map.at_mut(*p) {
            tile.visible = true;
            tile.explored = true;
        }
    }
}

#[derive(Clone, Copy)]
struct Transform {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

struct Scan<'a> {
    map: &'a Map,
    origin: Point,
    radius: i32,
    seen: &'a mut BTreeSet<Point>,
}

impl Scan<'_> {
    fn cast(&mut self, row: i32, mut start: f64, end: f64, t: Transform) {
        if start < end {
            return;
        }
        let radius_sq = self.radius * self.radius;
        let mut next_start = start;
        for j in row..=self.radius {
            let dy = -j;
            let mut blocked = false;
            for dx in -j..=0 {
                let world = Point::new(
                    self.origin.x + dx * t.xx + dy * t.xy,
                    self.origin.y + dx * t.yx + dy * t.yy,
                );
                let left = (f64::from(dx) - 0.5) / (f64::from(dy) + 0.5);
                let right = (f64::from(dx) + 0.5) / (f64::from(dy) - 0.5);
                if start < right {
                    continue;
                }
                if end > left {
                    break;
                }

                if dx * dx + dy * dy <= radius_sq && self.map.in_bounds(world) {
                    self.seen.insert(world);
                }

                let opaque = self.map.blocks_sight(world);
                if blocked {
                    if opaque {
                        next_start = right;
                    } else {
                        blocked = false;
                        start = next_start;
                    }
                } else if opaque && j < self.radius {
                    blocked = true;
                    self.cast(j + 1, start, left, t);
                    next_start = right;
                }
            }
            if blocked {
                break;
            }
        }
    }
}
