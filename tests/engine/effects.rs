//! Status effects over turns.

use delve_engine::effects::apply_effect;
use delve_engine::world::position_of;
use delve_engine::{Action, TurnOutcome};
use delve_foundation::{Direction, Point};
use delve_storage::{ActiveEffect, Health, StatusEffects, StatusKind};

use crate::{arena, enemy_at};

fn hp(state: &delve_engine::GameState, id: delve_foundation::EntityId) -> i32 {
    state.store().get::<Health>(id).map_or(0, |h| h.current)
}

#[test]
fn poison_three_for_four_turns() {
    let mut state = arena(&["warrior"], &[]);
    let hero = state.actors()[0];
    let start = hp(&state, hero);
    apply_effect(state.store_mut(), hero, ActiveEffect::new(StatusKind::Poison, 3, 4));

    let mut dealt = 0;
    for _ in 0..4 {
        dealt += state.tick_effects().iter().map(|t| t.poison).sum::<i32>();
    }

    assert_eq!(dealt, 12);
    assert_eq!(start - hp(&state, hero), 12);
    assert!(state.store().get::<StatusEffects>(hero).is_some_and(StatusEffects::is_empty));

    // A fifth tick deals nothing.
    assert!(state.tick_effects().is_empty());
    assert_eq!(start - hp(&state, hero), 12);
}

#[test]
fn effects_last_exactly_their_duration() {
    let mut state = arena(&["rogue"], &[]);
    let hero = state.actors()[0];
    apply_effect(state.store_mut(), hero, ActiveEffect::new(StatusKind::AttackBoost, 2, 3));
    for turn in 1..=3 {
        let boosted = delve_engine::effects::has(state.store(), hero, StatusKind::AttackBoost);
        assert!(boosted, "boost gone before advance {turn}");
        state.tick_effects();
    }
    assert!(!delve_engine::effects::has(state.store(), hero, StatusKind::AttackBoost));
}

#[test]
fn stunned_actor_neither_moves_nor_fights() {
    let mut state = arena(&["warrior"], &[("rat", Point::new(2, 1))]);
    let hero = state.actors()[0];
    let rat = enemy_at(&state, Point::new(2, 1));
    apply_effect(state.store_mut(), hero, ActiveEffect::new(StatusKind::Stun, 0, 1));
    let rat_hp = hp(&state, rat);

    assert_eq!(state.act(hero, Action::Move(Direction::East)), TurnOutcome::Stunned);
    assert_eq!(state.act(hero, Action::Move(Direction::South)), TurnOutcome::Stunned);
    assert_eq!(position_of(state.store(), hero), Some(Point::new(1, 1)));
    assert_eq!(hp(&state, rat), rat_hp);

    state.tick_effects();
    assert!(matches!(
        state.act(hero, Action::Move(Direction::South)),
        TurnOutcome::Moved { .. }
    ));
}

#[test]
fn weaken_and_armor_break_lower_stats() {
    let mut state = arena(&["templar"], &[]);
    let hero = state.actors()[0];
    let attack = delve_engine::effective_attack(state.store(), hero);
    let defense = delve_engine::effective_defense(state.store(), hero);
    apply_effect(state.store_mut(), hero, ActiveEffect::new(StatusKind::Weaken, 2, 2));
    apply_effect(state.store_mut(), hero, ActiveEffect::new(StatusKind::ArmorBreak, 1, 2));
    assert_eq!(delve_engine::effective_attack(state.store(), hero), attack - 2);
    assert_eq!(delve_engine::effective_defense(state.store(), hero), defense - 1);
}
