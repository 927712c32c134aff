//! Component kinds and attribute records.
//!
//! Every record type is listed in the closed [`ComponentKind`] enumeration.
//! Discriminants are explicit and stable: new kinds are appended at the end
//! and existing values are never renumbered, because serialized snapshots key
//! off them.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use delve_foundation::{EntityId, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Component Kind
// =============================================================================

/// The closed set of attribute kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ComponentKind {
    /// Grid position.
    Position = 0,
    /// Current and maximum health.
    Health = 1,
    /// Base attack and defense.
    Combat = 2,
    /// Autonomous decision making.
    Ai = 3,
    /// Active status effects.
    Effects = 4,
    /// Tag: controlled by a human actor.
    Player = 5,
    /// Tag: occupies its tile exclusively.
    Blocking = 6,
    /// Tag: can be picked up.
    Item = 7,
    /// Worn loadout.
    Equipment = 8,
    /// Drop table consulted on death.
    Loot = 9,
    /// Glyph and display name.
    Renderable = 10,
    /// Sight radius of an observer.
    Vision = 11,
    /// Inert interactable.
    Furniture = 12,
    /// Readable floor text.
    Inscription = 13,
    /// Single-use item effect.
    Consumable = 14,
    /// Wearable item description.
    Equippable = 15,
    /// Carried items.
    Inventory = 16,
    /// Flat damage reflected onto melee attackers.
    Thorns = 17,
}

impl ComponentKind {
    /// Number of kinds.
    pub const COUNT: usize = 18;

    /// Every kind, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Position,
        Self::Health,
        Self::Combat,
        Self::Ai,
        Self::Effects,
        Self::Player,
        Self::Blocking,
        Self::Item,
        Self::Equipment,
        Self::Loot,
        Self::Renderable,
        Self::Vision,
        Self::Furniture,
        Self::Inscription,
        Self::Consumable,
        Self::Equippable,
        Self::Inventory,
        Self::Thorns,
    ];

    /// Returns the table index for this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns a short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Health => "health",
            Self::Combat => "combat",
            Self::Ai => "ai",
            Self::Effects => "effects",
            Self::Player => "player",
            Self::Blocking => "blocking",
            Self::Item => "item",
            Self::Equipment => "equipment",
            Self::Loot => "loot",
            Self::Renderable => "renderable",
            Self::Vision => "vision",
            Self::Furniture => "furniture",
            Self::Inscription => "inscription",
            Self::Consumable => "consumable",
            Self::Equippable => "equippable",
            Self::Inventory => "inventory",
            Self::Thorns => "thorns",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Records
// =============================================================================

/// Grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position(pub Point);

/// Current and maximum health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Health {
    /// Hit points left. Zero or below means dead.
    pub current: i32,
    /// Upper bound for healing.
    pub max: i32,
}

impl Health {
    /// Creates full health.
    #[must_use]
    pub const fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// True while hit points remain.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Subtracts damage and returns the amount actually lost.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let lost = amount.max(0).min(self.current.max(0));
        self.current -= amount.max(0);
        lost
    }

    /// Restores health up to the maximum and returns the amount gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.max);
        self.current - before
    }
}

/// Base combat statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatStats {
    /// Base attack.
    pub attack: i32,
    /// Base defense.
    pub defense: i32,
}

/// How an autonomous entity approaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AiBehavior {
    /// Steps greedily toward the target while it is within sight.
    Chase,
    /// Never moves; attacks anything adjacent.
    Guard,
    /// Chases, but half of its steps go in a random direction.
    Erratic,
}

/// Secondary effect an enemy may add to a melee hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpecialKind {
    /// Damage over time.
    Poison,
    /// Lowers the target's attack.
    Weaken,
    /// Extra damage healed back to the attacker.
    Lifedrain,
    /// Target loses its next action.
    Stun,
    /// Lowers the target's defense.
    ArmorBreak,
}

/// A special attack with its trigger chance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpecialAttack {
    /// What the attack does.
    pub kind: SpecialKind,
    /// Trigger chance in percent.
    pub chance: u32,
    /// Strength of the effect.
    pub magnitude: i32,
    /// Duration in turns for timed effects.
    pub duration: u32,
}

/// Marks an entity as AI-driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AiDescriptor {
    /// Movement policy.
    pub behavior: AiBehavior,
    /// Targets farther than this (king-move distance) are ignored.
    pub sight_range: i32,
    /// Optional on-hit special.
    pub special: Option<SpecialAttack>,
}

/// Kinds of status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum StatusKind {
    /// Adds magnitude to attack.
    AttackBoost = 0,
    /// Adds magnitude to defense.
    DefenseBoost = 1,
    /// Deals magnitude damage each turn.
    Poison = 2,
    /// Subtracts magnitude from attack.
    Weaken = 3,
    /// Deals magnitude damage each turn; inflicted by the bearer's own powers.
    SelfBurn = 4,
    /// The bearer skips its actions.
    Stun = 5,
    /// Subtracts magnitude from defense.
    ArmorBreak = 6,
    /// The bearer cannot be targeted by AI.
    Invisible = 7,
    /// Has no effect. Kept so stored discriminants stay stable.
    Legacy = 8,
}

/// One active status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveEffect {
    /// Effect kind.
    pub kind: StatusKind,
    /// Strength.
    pub magnitude: i32,
    /// Turn advances left before the effect is removed.
    pub turns_remaining: u32,
}

impl ActiveEffect {
    /// Creates an effect.
    #[must_use]
    pub const fn new(kind: StatusKind, magnitude: i32, turns_remaining: u32) -> Self {
        Self {
            kind,
            magnitude,
            turns_remaining,
        }
    }
}

/// The list of active effects on an entity.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusEffects {
    /// Effects in application order.
    pub effects: Vec<ActiveEffect>,
}

impl StatusEffects {
    /// Sum of magnitudes across active effects of `kind`.
    #[must_use]
    pub fn total(&self, kind: StatusKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.magnitude)
            .sum()
    }

    /// True if any effect of `kind` is active.
    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Removes every effect of `kind`, returning how many were removed.
    pub fn clear(&mut self, kind: StatusKind) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before - self.effects.len()
    }

    /// Decrements every effect and drops those that reach zero.
    ///
    /// Returns the kinds that expired, in list order.
    pub fn advance(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
            if effect.turns_remaining == 0 {
                expired.push(effect.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    /// True when no effects are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Tag: controlled by a human actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player;

/// Tag: occupies its tile exclusively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Blocking;

/// Tag: can be picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item;

/// Stat modifiers granted by equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Modifiers {
    /// Added to attack.
    pub attack: i32,
    /// Added to defense.
    pub defense: i32,
    /// Added to maximum health.
    pub max_health: i32,
    /// Added to sight radius.
    pub vision: i32,
}

impl Add for Modifiers {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            max_health: self.max_health + rhs.max_health,
            vision: self.vision + rhs.vision,
        }
    }
}

/// Equipment slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EquipSlot {
    /// Weapon hand.
    MainHand,
    /// Shield hand.
    OffHand,
    /// Helmets.
    Head,
    /// Armor.
    Body,
    /// Rings and amulets.
    Trinket,
}

impl EquipSlot {
    /// Parses a slot name.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "main" | "mainhand" | "weapon" => Some(Self::MainHand),
            "off" | "offhand" | "shield" => Some(Self::OffHand),
            "head" => Some(Self::Head),
            "body" | "armor" => Some(Self::Body),
            "trinket" | "ring" => Some(Self::Trinket),
            _ => None,
        }
    }
}

/// A worn item and the modifiers it grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equipped {
    /// The item entity (alive, without a position).
    pub item: EntityId,
    /// Modifiers applied while worn.
    pub modifiers: Modifiers,
    /// Occupies both hands.
    pub two_handed: bool,
}

/// The worn loadout of an actor.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equipment {
    /// Occupied slots.
    pub slots: BTreeMap<EquipSlot, Equipped>,
}

impl Equipment {
    /// Sum of modifiers over all worn items.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.slots
            .values()
            .fold(Modifiers::default(), |acc, e| acc + e.modifiers)
    }

    /// Returns the item worn in `slot`.
    #[must_use]
    pub fn get(&self, slot: EquipSlot) -> Option<&Equipped> {
        self.slots.get(&slot)
    }

    /// True when the main hand holds a two-handed item.
    #[must_use]
    pub fn holds_two_hander(&self) -> bool {
        self.get(EquipSlot::MainHand).is_some_and(|e| e.two_handed)
    }
}

/// One entry of a loot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LootEntry {
    /// Glyph of the item or equipment template to drop.
    pub glyph: char,
    /// Drop chance in percent.
    pub chance: u32,
}

/// Items rolled for when the bearer dies.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LootTable {
    /// Independent rolls, in order.
    pub entries: Vec<LootEntry>,
}

/// How an entity looks to rendering collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Renderable {
    /// Map glyph.
    pub glyph: char,
    /// Display name.
    pub name: String,
}

/// Sight radius of an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vision {
    /// Base radius in tiles; equipment may extend it.
    pub radius: i32,
}

/// One-shot bonus granted by rare furniture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FurnitureBonus {
    /// Restores health.
    Heal(i32),
    /// Raises maximum (and current) health.
    MaxHealth(i32),
    /// Raises base attack.
    Attack(i32),
    /// Raises base defense.
    Defense(i32),
}

/// An inert interactable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Furniture {
    /// Bonus for rare pieces; `None` for common ones.
    pub bonus: Option<FurnitureBonus>,
    /// Set once the bonus has been granted.
    pub used: bool,
}

/// Readable text on the floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inscription {
    /// The text.
    pub text: String,
}

/// What a consumable does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConsumableEffect {
    /// Restores health.
    Heal(i32),
    /// Applies a timed status effect to the user.
    Buff {
        /// Effect kind.
        kind: StatusKind,
        /// Strength.
        magnitude: i32,
        /// Duration in turns.
        turns: u32,
    },
    /// Removes poison.
    CurePoison,
    /// Moves the user to a random room.
    Teleport,
}

/// Single-use item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Consumable {
    /// The effect.
    pub effect: ConsumableEffect,
}

/// Wearable item description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equippable {
    /// Slot the item occupies.
    pub slot: EquipSlot,
    /// Modifiers while worn.
    pub modifiers: Modifiers,
    /// Needs both hands.
    pub two_handed: bool,
}

/// Carried items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inventory {
    /// Item entities, in pickup order.
    pub items: Vec<EntityId>,
    /// Maximum number of items.
    pub capacity: usize,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// True when no more items fit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// True when `item` is carried.
    #[must_use]
    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    /// Removes `item`, returning whether it was carried.
    pub fn remove(&mut self, item: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| *i != item);
        before != self.items.len()
    }
}

/// Flat damage reflected onto melee attackers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thorns {
    /// Damage reflected per hit taken.
    pub damage: i32,
}

// =============================================================================
// Component
// =============================================================================

/// A record of any kind, as stored in the per-kind tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum Component {
    Position(Position),
    Health(Health),
    Combat(CombatStats),
    Ai(AiDescriptor),
    Effects(StatusEffects),
    Player(Player),
    Blocking(Blocking),
    Item(Item),
    Equipment(Equipment),
    Loot(LootTable),
    Renderable(Renderable),
    Vision(Vision),
    Furniture(Furniture),
    Inscription(Inscription),
    Consumable(Consumable),
    Equippable(Equippable),
    Inventory(Inventory),
    Thorns(Thorns),
}

impl Component {
    /// Returns the kind of this record.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Position(_) => ComponentKind::Position,
            Self::Health(_) => ComponentKind::Health,
            Self::Combat(_) => ComponentKind::Combat,
            Self::Ai(_) => ComponentKind::Ai,
            Self::Effects(_) => ComponentKind::Effects,
            Self::Player(_) => ComponentKind::Player,
            Self::Blocking(_) => ComponentKind::Blocking,
            Self::Item(_) => ComponentKind::Item,
            Self::Equipment(_) => ComponentKind::Equipment,
            Self::Loot(_) => ComponentKind::Loot,
            Self::Renderable(_) => ComponentKind::Renderable,
            Self::Vision(_) => ComponentKind::Vision,
            Self::Furniture(_) => ComponentKind::Furniture,
            Self::Inscription(_) => ComponentKind::Inscription,
            Self::Consumable(_) => ComponentKind::Consumable,
            Self::Equippable(_) => ComponentKind::Equippable,
            Self::Inventory(_) => ComponentKind::Inventory,
            Self::Thorns(_) => ComponentKind::Thorns,
        }
    }
}

/// A concrete record type with a fixed [`ComponentKind`].
///
/// Implemented for every record so the store can offer typed access on top
/// of its untyped per-kind tables.
pub trait ComponentRecord: Clone + Into<Component> {
    /// The kind this record is stored under.
    const KIND: ComponentKind;

    /// Borrows the record out of a component of the matching kind.
    fn from_component(component: &Component) -> Option<&Self>;

    /// Mutably borrows the record out of a component of the matching kind.
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;

    /// Unwraps an owned component of the matching kind.
    fn from_owned(component: Component) -> Option<Self>;
}

macro_rules! record {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for Component {
            fn from(record: $ty) -> Self {
                Component::$variant(record)
            }
        }

        impl ComponentRecord for $ty {
            const KIND: ComponentKind = ComponentKind::$variant;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(record) => Some(record),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(record) => Some(record),
                    _ => None,
                }
            }

            fn from_owned(component: Component) -> Option<Self> {
                match component {
                    Component::$variant(record) => Some(record),
                    _ => None,
                }
            }
        }
    };
}

record!(Position => Position);
record!(Health => Health);
record!(CombatStats => Combat);
record!(AiDescriptor => Ai);
record!(StatusEffects => Effects);
record!(Player => Player);
record!(Blocking => Blocking);
record!(Item => Item);
record!(Equipment => Equipment);
record!(LootTable => Loot);
record!(Renderable => Renderable);
record!(Vision => Vision);
record!(Furniture => Furniture);
record!(Inscription => Inscription);
record!(Consumable => Consumable);
record!(Equippable => Equippable);
record!(Inventory => Inventory);
record!(Thorns => Thorns);
