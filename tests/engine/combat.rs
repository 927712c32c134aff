//! Melee resolution.

use delve_engine::{TurnOutcome, attack, effective_attack, effective_defense, roll_damage};
use delve_foundation::{Direction, Point, seeded};
use delve_storage::{CombatStats, Health, Store};

use crate::{arena, enemy_at};

fn duel() -> (Store, delve_foundation::EntityId, delve_foundation::EntityId) {
    let mut store = Store::new();
    let attacker = store.create();
    let defender = store.create();
    store.add(attacker, CombatStats { attack: 5, defense: 0 });
    store.add(defender, CombatStats { attack: 0, defense: 2 });
    store.add(defender, Health::full(4));
    (store, attacker, defender)
}

#[test]
fn five_against_two_replays_under_the_same_rng() {
    let (store, attacker, defender) = duel();
    assert_eq!(effective_attack(&store, attacker), 5);
    assert_eq!(effective_defense(&store, defender), 2);

    let rng = seeded(42);
    let mut first_store = store.clone();
    let first = attack(&mut first_store, attacker, defender, &mut rng.clone()).unwrap();
    let mut second_store = store.clone();
    let second = attack(&mut second_store, attacker, defender, &mut rng.clone()).unwrap();

    assert_eq!(first, second);
    assert!((3..=5).contains(&first.damage));
    assert_eq!(first.killed, first.damage >= 4);
    assert_eq!(
        first_store.get::<Health>(defender),
        second_store.get::<Health>(defender)
    );
}

#[test]
fn damage_is_at_least_one() {
    let mut rng = seeded(0);
    for _ in 0..200 {
        assert!(roll_damage(1, 50, &mut rng) >= 1);
    }
}

#[test]
fn bumping_an_enemy_attacks_it() {
    let mut state = arena(&["warrior"], &[("rat", Point::new(2, 1))]);
    let hero = state.actors()[0];
    let rat = enemy_at(&state, Point::new(2, 1));
    let outcome = state.act(hero, delve_engine::Action::Move(Direction::East));
    let TurnOutcome::Attacked { result, .. } = outcome else {
        panic!("expected an attack, got {outcome:?}");
    };
    assert_eq!(result.defender, rat);
    assert_eq!(delve_engine::world::position_of(state.store(), hero), Some(Point::new(1, 1)));
}

#[test]
fn thorns_bite_back() {
    let mut state = arena(&["rogue"], &[("urchin", Point::new(2, 1))]);
    let hero = state.actors()[0];
    let before = state.store().get::<Health>(hero).map(|h| h.current).unwrap();
    let outcome = state.act(hero, delve_engine::Action::Move(Direction::East));
    let TurnOutcome::Attacked { reflected, .. } = outcome else {
        panic!("expected an attack, got {outcome:?}");
    };
    let reflected = reflected.unwrap();
    assert_eq!(reflected.target, hero);
    assert_eq!(reflected.damage, 2);
    let after = state.store().get::<Health>(hero).map(|h| h.current).unwrap();
    assert_eq!(before - after, 2);
}

#[test]
fn killing_a_common_enemy_removes_it() {
    let mut state = arena(&["warrior"], &[("bat", Point::new(2, 1))]);
    let hero = state.actors()[0];
    let bat = enemy_at(&state, Point::new(2, 1));
    // Bats have 3 hp; a warrior never needs more than one hit.
    let outcome = state.act(hero, delve_engine::Action::Move(Direction::East));
    assert!(matches!(outcome, TurnOutcome::Attacked { result, .. } if result.killed));
    assert!(!state.store().exists(bat));
}
