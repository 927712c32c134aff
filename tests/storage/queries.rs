//! Multi-kind queries.

use delve_foundation::Point;
use delve_storage::{Blocking, ComponentKind, Health, Player, Position, Store};
use proptest::prelude::*;

#[test]
fn query_intersects_kinds() {
    let mut store = Store::new();
    let hero = store.create();
    let rock = store.create();
    let ghost = store.create();
    store.add(hero, Position(Point::new(1, 1)));
    store.add(hero, Health::full(10));
    store.add(hero, Player);
    store.add(rock, Position(Point::new(2, 2)));
    store.add(rock, Blocking);
    store.add(ghost, Health::full(3));

    assert_eq!(
        store.query(&[ComponentKind::Position, ComponentKind::Health]),
        vec![hero]
    );
    assert_eq!(
        store.query(&[ComponentKind::Position]),
        vec![hero, rock]
    );
    assert!(store.query(&[ComponentKind::Player, ComponentKind::Blocking]).is_empty());
    assert_eq!(store.query_first(&[ComponentKind::Health]), Some(hero));
}

#[test]
fn empty_query_lists_live_entities() {
    let mut store = Store::new();
    let a = store.create();
    let b = store.create();
    let c = store.create();
    store.destroy(b);
    assert_eq!(store.query(&[]), vec![a, c]);
}

/// Builds a store where entity `i` has Position when bit 0 of `masks[i]` is
/// set, Health for bit 1 and Player for bit 2.
fn build(masks: &[u8]) -> Store {
    let mut store = Store::new();
    for mask in masks {
        let e = store.create();
        if mask & 1 != 0 {
            store.add(e, Position(Point::new(0, 0)));
        }
        if mask & 2 != 0 {
            store.add(e, Health::full(1));
        }
        if mask & 4 != 0 {
            store.add(e, Player);
        }
    }
    store
}

proptest! {
    #[test]
    fn query_matches_exactly(masks in prop::collection::vec(0u8..8, 0..40)) {
        let store = build(&masks);
        let kinds = [ComponentKind::Position, ComponentKind::Health];
        let found = store.query(&kinds);
        for e in store.entities() {
            let expected = kinds.iter().all(|k| store.has(e, *k));
            prop_assert_eq!(found.contains(&e), expected);
        }
    }

    #[test]
    fn unrelated_kinds_do_not_change_results(
        masks in prop::collection::vec(0u8..8, 1..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = build(&masks);
        let kinds = [ComponentKind::Position, ComponentKind::Health];
        let before = store.query(&kinds);
        let ids: Vec<_> = store.entities().collect();
        store.add(ids[pick.index(ids.len())], Blocking);
        prop_assert_eq!(store.query(&kinds), before);
    }
}
