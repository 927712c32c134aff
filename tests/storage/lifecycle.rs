//! Entity creation and destruction.

use delve_foundation::Point;
use delve_storage::{
    CombatStats, ComponentKind, Health, Inventory, Player, Position, StatusEffects, Store,
};

#[test]
fn ids_are_never_reused() {
    let mut store = Store::new();
    let a = store.create();
    assert!(store.destroy(a));
    let b = store.create();
    assert_ne!(a, b);
    assert!(!store.exists(a));
    assert!(store.exists(b));
}

#[test]
fn destroy_removes_every_kind() {
    let mut store = Store::new();
    let e = store.create();
    store.add(e, Position(Point::new(1, 2)));
    store.add(e, Health::full(10));
    store.add(e, Player);
    store.destroy(e);

    assert!(store.get::<Position>(e).is_none());
    assert!(store.get::<Health>(e).is_none());
    // Kinds never attached are absent too.
    assert!(store.get::<Inventory>(e).is_none());
    assert!(store.get::<StatusEffects>(e).is_none());
    assert_eq!(store.count(ComponentKind::Position), 0);
}

#[test]
fn destroying_twice_is_harmless() {
    let mut store = Store::new();
    let e = store.create();
    assert!(store.destroy(e));
    assert!(!store.destroy(e));
    assert!(store.is_empty());
}

#[test]
fn records_on_dead_entities_are_refused() {
    let mut store = Store::new();
    let e = store.create();
    store.destroy(e);
    assert!(!store.add(e, Health::full(5)));
    assert!(store.get::<Health>(e).is_none());
}

#[test]
fn mutation_through_get_mut() {
    let mut store = Store::new();
    let e = store.create();
    store.add(e, CombatStats { attack: 3, defense: 1 });
    if let Some(stats) = store.get_mut::<CombatStats>(e) {
        stats.attack += 2;
    }
    assert_eq!(store.get::<CombatStats>(e).map(|s| s.attack), Some(5));
    assert_eq!(store.remove::<CombatStats>(e).map(|s| s.defense), Some(1));
    assert!(!store.has(e, ComponentKind::Combat));
}

#[test]
fn clones_are_independent() {
    let mut store = Store::new();
    let e = store.create();
    store.add(e, Health::full(10));
    let snapshot = store.clone();
    if let Some(h) = store.get_mut::<Health>(e) {
        h.damage(4);
    }
    assert_eq!(snapshot.get::<Health>(e).map(|h| h.current), Some(10));
    assert_eq!(store.get::<Health>(e).map(|h| h.current), Some(6));
}
