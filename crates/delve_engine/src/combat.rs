//! Melee resolution.
//!
//! Effective attack is base attack plus equipment plus attack boosts, minus
//! weaken. Effective defense is base defense plus equipment plus defense
//! boosts, minus armor break. A hit deals
//! `max(1, attack + roll(0..=2) - defense)`.

use delve_foundation::{EntityId, GameRng};
use delve_storage::{CombatStats, Equipment, Health, StatusKind, Store};
use rand::Rng;

use crate::effects;

/// The result of one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatResult {
    /// Who swung.
    pub attacker: EntityId,
    /// Who was hit.
    pub defender: EntityId,
    /// Damage applied.
    pub damage: i32,
    /// Defender health afterwards.
    pub remaining: i32,
    /// The defender's health reached zero.
    pub killed: bool,
}

/// Attack after equipment and status effects.
#[must_use]
pub fn effective_attack(store: &Store, id: EntityId) -> i32 {
    let base = store.get::<CombatStats>(id).map_or(0, |c| c.attack);
    let gear = store.get::<Equipment>(id).map_or(0, |e| e.modifiers().attack);
    base + gear + effects::total(store, id, StatusKind::AttackBoost)
        - effects::total(store, id, StatusKind::Weaken)
}

/// Defense after equipment and status effects.
#[must_use]
pub fn effective_defense(store: &Store, id: EntityId) -> i32 {
    let base = store.get::<CombatStats>(id).map_or(0, |c| c.defense);
    let gear = store.get::<Equipment>(id).map_or(0, |e| e.modifiers().defense);
    base + gear + effects::total(store, id, StatusKind::DefenseBoost)
        - effects::total(store, id, StatusKind::ArmorBreak)
}

/// Rolls damage for a fixed attack and defense. Always at least 1.
pub fn roll_damage(attack: i32, defense: i32, rng: &mut GameRng) -> i32 {
    (attack + rng.gen_range(0..=2) - defense).max(1)
}

/// Resolves one melee hit and applies it to the defender's health.
///
/// Returns `None` without touching the rng when the defender has no health.
/// Reflection and loot are left to the caller.
pub fn attack(
    store: &mut Store,
    attacker: EntityId,
    defender: EntityId,
    rng: &mut GameRng,
) -> Option<CombatResult> {
    if store.get::<Health>(defender).is_none() {
        return None;
    }
    let damage = roll_damage(
        effective_attack(store, attacker),
        effective_defense(store, defender),
        rng,
    );
    let health = store.get_mut::<Health>(defender)?;
    health.damage(damage);
    Some(CombatResult {
        attacker,
        defender,
        damage,
        remaining: health.current,
        killed: !health.is_alive(),
    })
}

/// Applies flat damage that bypasses defense (thorns, poison, burns).
///
/// Returns the defender's remaining health, or `None` if it has none.
pub fn deal_direct(store: &mut Store, id: EntityId, amount: i32) -> Option<i32> {
    let health = store.get_mut::<Health>(id)?;
    health.damage(amount);
    Some(health.current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_foundation::seeded;
    use delve_storage::{ActiveEffect, EquipSlot, Equipped, Modifiers, StatusEffects};

    fn fighter(store: &mut Store, attack: i32, defense: i32, hp: i32) -> EntityId {
        let id = store.create();
        store.add(id, CombatStats { attack, defense });
        store.add(id, Health::full(hp));
        store.add(id, StatusEffects::default());
        id
    }

    #[test]
    fn damage_is_at_least_one() {
        let mut rng = seeded(1);
        for _ in 0..50 {
            assert_eq!(roll_damage(0, 100, &mut rng), 1);
        }
    }

    #[test]
    fn damage_range() {
        let mut rng = seeded(2);
        for _ in 0..100 {
            let d = roll_damage(5, 2, &mut rng);
            assert!((3..=5).contains(&d));
        }
    }

    #[test]
    fn same_rng_state_same_outcome() {
        let mut store = Store::new();
        let a = fighter(&mut store, 5, 0, 10);
        let d = fighter(&mut store, 0, 2, 4);

        let mut s1 = store.clone();
        let mut s2 = store.clone();
        let r1 = attack(&mut s1, a, d, &mut seeded(42));
        let r2 = attack(&mut s2, a, d, &mut seeded(42));
        assert_eq!(r1, r2);
        let r = r1.unwrap();
        assert_eq!(r.remaining, 4 - r.damage);
        assert_eq!(r.killed, r.damage >= 4);
    }

    #[test]
    fn modifiers_feed_effective_stats() {
        let mut store = Store::new();
        let a = fighter(&mut store, 3, 1, 10);
        let mut gear = Equipment::default();
        gear.slots.insert(
            EquipSlot::MainHand,
            Equipped {
                item: EntityId::new(99),
                modifiers: Modifiers {
                    attack: 2,
                    defense: 1,
                    ..Modifiers::default()
                },
                two_handed: false,
            },
        );
        store.add(a, gear);
        effects::apply_effect(&mut store, a, ActiveEffect::new(StatusKind::AttackBoost, 2, 3));
        effects::apply_effect(&mut store, a, ActiveEffect::new(StatusKind::Weaken, 1, 3));
        effects::apply_effect(&mut store, a, ActiveEffect::new(StatusKind::ArmorBreak, 3, 3));
        assert_eq!(effective_attack(&store, a), 6);
        assert_eq!(effective_defense(&store, a), -1);
    }

    #[test]
    fn attack_on_healthless_target_is_none() {
        let mut store = Store::new();
        let a = fighter(&mut store, 3, 0, 5);
        let rock = store.create();
        assert!(attack(&mut store, a, rock, &mut seeded(1)).is_none());
    }
}
