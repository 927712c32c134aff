//! Recursive shadowcasting.

use delve_dungeon::{Map, TileKind, Viewshed, field_of_view, update_visibility};
use delve_foundation::{Direction, Point};

fn open(width: i32, height: i32) -> Map {
    Map::filled(width, height, TileKind::Floor)
}

#[test]
fn adjacent_wall_shadows_its_ray_in_every_direction() {
    let origin = Point::new(10, 10);
    for dir in Direction::ALL {
        let mut map = open(21, 21);
        let wall = origin.step(dir);
        map.set_kind(wall, TileKind::Wall);
        let fov = field_of_view(&map, origin, 9);
        assert!(fov.contains(&wall), "{dir:?}: the wall itself is seen");
        let (dx, dy) = dir.delta();
        for k in 2..=6 {
            let behind = origin.offset(dx * k, dy * k);
            assert!(!fov.contains(&behind), "{dir:?}: {behind} seen through the wall");
        }
    }
}

#[test]
fn radius_bounds_the_view() {
    let map = open(41, 41);
    let origin = Point::new(20, 20);
    let fov = field_of_view(&map, origin, 5);
    assert!(fov.contains(&origin));
    assert!(fov.iter().all(|p| p.distance_sq(origin) <= 25));
    assert!(fov.contains(&Point::new(25, 20)));
    assert!(!fov.contains(&Point::new(26, 20)));
}

#[test]
fn explored_tiles_stay_explored() {
    let mut map = open(40, 7);
    let mut view = Viewshed::default();
    update_visibility(&mut map, &mut view, Point::new(3, 3), 4);
    let seen: Vec<Point> = view.visible.iter().copied().collect();

    map.clear_visible();
    update_visibility(&mut map, &mut view, Point::new(35, 3), 4);
    for p in seen {
        let tile = map.at(p).copied();
        assert!(tile.is_some_and(|t| t.explored), "{p} forgot it was explored");
    }
}

#[test]
fn closed_doors_block_sight() {
    let mut map = open(11, 3);
    for y in 0..3 {
        map.set_kind(Point::new(5, y), TileKind::Wall);
    }
    map.set_kind(Point::new(5, 1), TileKind::Door);
    let fov = field_of_view(&map, Point::new(2, 1), 8);
    assert!(fov.contains(&Point::new(5, 1)));
    assert!(!fov.contains(&Point::new(7, 1)));

    map.set_kind(Point::new(5, 1), TileKind::Floor);
    let fov = field_of_view(&map, Point::new(2, 1), 8);
    assert!(fov.contains(&Point::new(7, 1)));
}
