//! Points and directions.

use delve_foundation::{Direction, Point};
use proptest::prelude::*;

#[test]
fn every_direction_is_one_step() {
    let origin = Point::new(10, 10);
    for dir in Direction::ALL {
        let next = origin.step(dir);
        assert!(origin.is_adjacent(next), "{dir:?}");
        assert_eq!(origin.chebyshev(next), 1);
    }
}

#[test]
fn cardinals_are_orthogonal() {
    for dir in Direction::CARDINAL {
        let (dx, dy) = dir.delta();
        assert_eq!(dx.abs() + dy.abs(), 1);
    }
}

#[test]
fn parse_accepts_short_and_long_names() {
    assert_eq!(Direction::parse("SE"), Some(Direction::SouthEast));
    assert_eq!(Direction::parse("west"), Some(Direction::West));
    assert_eq!(Direction::parse("up"), None);
}

#[test]
fn points_display_as_pairs() {
    assert_eq!(Point::new(-3, 7).to_string(), "(-3, 7)");
}

proptest! {
    #[test]
    fn from_delta_inverts_delta(i in 0usize..8) {
        let dir = Direction::ALL[i];
        let (dx, dy) = dir.delta();
        prop_assert_eq!(Direction::from_delta(dx * 3, dy * 3), Some(dir));
    }

    #[test]
    fn distances_are_symmetric(ax in -50i32..50, ay in -50i32..50, bx in -50i32..50, by in -50i32..50) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        prop_assert_eq!(a.chebyshev(b), b.chebyshev(a));
        prop_assert_eq!(a.manhattan(b), b.manhattan(a));
        prop_assert!(a.chebyshev(b) <= a.manhattan(b));
    }
}
