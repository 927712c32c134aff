//! Full rounds driven through action sources.

use delve_engine::effects::apply_effect;
use delve_engine::world::position_of;
use delve_engine::{Action, ScriptedSource, TurnOutcome};
use delve_foundation::{Direction, Point};
use delve_storage::{ActiveEffect, Health, Position, StatusEffects, StatusKind};

use crate::{STAIRS, arena};

#[test]
fn descending_skips_the_rest_of_the_round() {
    let mut state = arena(&["warrior", "rogue"], &[("rat", Point::new(3, 2))]);
    let (first, second) = (state.actors()[0], state.actors()[1]);
    state.store_mut().add(first, Position(STAIRS));
    apply_effect(state.store_mut(), second, ActiveEffect::new(StatusKind::Poison, 2, 3));
    let health = state.store().get::<Health>(second).copied();
    let effects = state.store().get::<StatusEffects>(second).cloned();

    let mut a = ScriptedSource::new([Action::Descend]);
    let mut b = ScriptedSource::new([Action::Move(Direction::East)]);
    let report = state.play_round(&mut [&mut a, &mut b]);

    assert!(report.descended);
    assert_eq!(report.turns.len(), 1);
    assert_eq!(report.turns[0].outcome, TurnOutcome::Descended { floor: 2 });
    assert!(report.ai.is_empty());
    assert!(report.effects.is_empty());
    assert_eq!(b.remaining(), 1);
    assert_eq!(state.store().get::<Health>(second).copied(), health);
    assert_eq!(state.store().get::<StatusEffects>(second).cloned(), effects);
    assert_eq!(state.floor(), 2);
    assert_eq!(state.round(), 1);
    // The queued move never ran, so the only position change is the
    // arrival placement: the leader on the spawn, the rest in the start room.
    let level = state.level();
    let start = level.rooms[level.start_room];
    assert_eq!(position_of(state.store(), first), Some(level.player_spawn));
    let landed = position_of(state.store(), second).unwrap();
    assert!(start.contains(landed) && level.map.is_walkable(landed), "{landed:?}");
}

#[test]
fn enemies_act_after_the_heroes() {
    let mut state = arena(&["warrior"], &[("rat", Point::new(2, 2))]);
    let hero = state.actors()[0];
    let before = state.store().get::<Health>(hero).map(|h| h.current);

    let mut wait = ScriptedSource::new([Action::Wait]);
    let report = state.play_round(&mut [&mut wait]);

    assert_eq!(report.round, 1);
    assert_eq!(report.turns[0].outcome, TurnOutcome::Waited);
    assert_eq!(report.ai.len(), 1);
    let after = state.store().get::<Health>(hero).map(|h| h.current);
    assert!(after < before, "the adjacent rat should have bitten");
}

#[test]
fn refused_actions_are_asked_again() {
    let mut state = arena(&["rogue"], &[]);
    let mut script = ScriptedSource::new([Action::Descend, Action::PickUp, Action::Wait]);
    let report = state.play_round(&mut [&mut script]);
    assert_eq!(report.turns.len(), 3);
    assert_eq!(report.turns[2].outcome, TurnOutcome::Waited);
    assert_eq!(script.remaining(), 0);
}

#[test]
fn potions_heal_the_drinker() {
    let mut state = arena(&["warrior"], &[]);
    let hero = state.actors()[0];
    if let Some(h) = state.store_mut().get_mut::<Health>(hero) {
        h.current = 10;
    }
    let potion = state
        .store()
        .get::<delve_storage::Inventory>(hero)
        .and_then(|inv| inv.items.first().copied())
        .unwrap();

    let outcome = state.act(hero, Action::Use(potion));
    assert!(matches!(outcome, TurnOutcome::Used { item, .. } if item == potion));
    assert_eq!(state.store().get::<Health>(hero).map(|h| h.current), Some(18));
    assert!(!state.store().exists(potion));
}

#[test]
fn snapshots_are_untouched_by_play() {
    let mut state = arena(&["templar"], &[("rat", Point::new(5, 2))]);
    let snapshot = state.clone();
    let mut walk = ScriptedSource::new([Action::Move(Direction::SouthEast)]);
    state.play_round(&mut [&mut walk]);
    assert_eq!(snapshot.round(), 0);
    assert_ne!(
        position_of(snapshot.store(), snapshot.actors()[0]),
        position_of(state.store(), state.actors()[0])
    );
}
