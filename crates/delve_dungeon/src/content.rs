//! Content tables: the templates the generator draws from and the factory
//! instantiates.
//!
//! Tables are plain configuration. Every template carries the floor range it
//! may appear on; lookups by id return `UnknownContent` errors, lookups by
//! glyph (used by loot tables) return `None`.

use delve_foundation::{Error, Result};
use delve_storage::{
    AiDescriptor, ConsumableEffect, EquipSlot, FurnitureBonus, LootEntry, Modifiers,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive range of floors a template may appear on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloorRange {
    /// First floor.
    pub min: u32,
    /// Last floor.
    pub max: u32,
}

impl FloorRange {
    /// Every floor.
    pub const ANY: Self = Self {
        min: 1,
        max: u32::MAX,
    };

    /// Creates a range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// True if `floor` lies in the range.
    #[must_use]
    pub const fn contains(&self, floor: u32) -> bool {
        floor >= self.min && floor <= self.max
    }
}

/// Anything with an id and a floor range.
pub trait Template {
    /// Lookup key.
    fn id(&self) -> &str;
    /// Floors this template appears on.
    fn floors(&self) -> FloorRange;
}

macro_rules! template {
    ($ty:ty) => {
        impl Template for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn floors(&self) -> FloorRange {
                self.floors
            }
        }
    };
}

/// A regular or elite enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnemyTemplate {
    /// Lookup key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Map glyph.
    pub glyph: char,
    /// Maximum health.
    pub health: i32,
    /// Base attack.
    pub attack: i32,
    /// Base defense.
    pub defense: i32,
    /// Budget points consumed when placed.
    pub cost: u32,
    /// Behavior, sight range and optional special attack.
    pub ai: AiDescriptor,
    /// Damage reflected onto melee attackers.
    pub thorns: i32,
    /// Drop table; only elites carry one.
    pub loot: Vec<LootEntry>,
    /// Floors it appears on.
    pub floors: FloorRange,
}

/// A consumable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemTemplate {
    /// Lookup key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Map glyph, also the loot key.
    pub glyph: char,
    /// What using it does.
    pub effect: ConsumableEffect,
    /// Floors it appears on.
    pub floors: FloorRange,
}

/// A wearable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquipmentTemplate {
    /// Lookup key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Map glyph, also the loot key.
    pub glyph: char,
    /// Slot it occupies.
    pub slot: EquipSlot,
    /// Modifiers while worn.
    pub modifiers: Modifiers,
    /// Needs both hands.
    pub two_handed: bool,
    /// Floors it appears on.
    pub floors: FloorRange,
}

/// A piece of furniture. Pieces with a bonus form the rare pool.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FurnitureTemplate {
    /// Lookup key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Map glyph.
    pub glyph: char,
    /// One-shot bonus, if rare.
    pub bonus: Option<FurnitureBonus>,
    /// Floors it appears on.
    pub floors: FloorRange,
}

impl FurnitureTemplate {
    /// True for the rare pool.
    #[must_use]
    pub const fn is_rare(&self) -> bool {
        self.bonus.is_some()
    }
}

/// Floor text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InscriptionTemplate {
    /// Lookup key.
    pub id: String,
    /// The text.
    pub text: String,
    /// Floors it appears on.
    pub floors: FloorRange,
}

/// A playable class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassDef {
    /// Lookup key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Map glyph.
    pub glyph: char,
    /// Maximum health.
    pub health: i32,
    /// Base attack.
    pub attack: i32,
    /// Base defense.
    pub defense: i32,
    /// Sight radius.
    pub vision: i32,
    /// Damage reflected onto melee attackers.
    pub thorns: i32,
    /// Backpack size.
    pub capacity: usize,
    /// Equipment template ids worn from the start.
    pub starting_equipment: Vec<String>,
    /// Item template ids carried from the start.
    pub starting_items: Vec<String>,
}

template!(EnemyTemplate);
template!(ItemTemplate);
template!(EquipmentTemplate);
template!(FurnitureTemplate);
template!(InscriptionTemplate);

/// All content tables.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentTables {
    /// Regular enemies.
    pub enemies: Vec<EnemyTemplate>,
    /// Elites; one is placed per floor.
    pub elites: Vec<EnemyTemplate>,
    /// Consumables.
    pub items: Vec<ItemTemplate>,
    /// Wearables.
    pub equipment: Vec<EquipmentTemplate>,
    /// Furniture, common and rare.
    pub furniture: Vec<FurnitureTemplate>,
    /// Inscriptions.
    pub inscriptions: Vec<InscriptionTemplate>,
    /// Playable classes.
    pub classes: Vec<ClassDef>,
}

fn on_floor<T: Template>(table: &[T], floor: u32) -> Vec<&T> {
    table.iter().filter(|t| t.floors().contains(floor)).collect()
}

fn by_id<'a, T: Template>(table: &'a [T], name: &'static str, id: &str) -> Result<&'a T> {
    table
        .iter()
        .find(|t| t.id() == id)
        .ok_or_else(|| Error::unknown_content(name, id))
}

impl ContentTables {
    /// Regular enemies for `floor`, in table order.
    #[must_use]
    pub fn enemies_for(&self, floor: u32) -> Vec<&EnemyTemplate> {
        on_floor(&self.enemies, floor)
    }

    /// Elites for `floor`.
    #[must_use]
    pub fn elites_for(&self, floor: u32) -> Vec<&EnemyTemplate> {
        on_floor(&self.elites, floor)
    }

    /// Consumables for `floor`.
    #[must_use]
    pub fn items_for(&self, floor: u32) -> Vec<&ItemTemplate> {
        on_floor(&self.items, floor)
    }

    /// Wearables for `floor`.
    #[must_use]
    pub fn equipment_for(&self, floor: u32) -> Vec<&EquipmentTemplate> {
        on_floor(&self.equipment, floor)
    }

    /// Furniture for `floor`, split into `(common, rare)`.
    #[must_use]
    pub fn furniture_for(&self, floor: u32) -> (Vec<&FurnitureTemplate>, Vec<&FurnitureTemplate>) {
        on_floor(&self.furniture, floor)
            .into_iter()
            .partition(|f| !f.is_rare())
    }

    /// Inscriptions for `floor`.
    #[must_use]
    pub fn inscriptions_for(&self, floor: u32) -> Vec<&InscriptionTemplate> {
        on_floor(&self.inscriptions, floor)
    }

    /// Looks up an enemy or elite.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if neither table has `id`.
    pub fn enemy(&self, id: &str) -> Result<&EnemyTemplate> {
        by_id(&self.enemies, "enemy", id).or_else(|_| by_id(&self.elites, "enemy", id))
    }

    /// Looks up a consumable.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the table has no `id`.
    pub fn item(&self, id: &str) -> Result<&ItemTemplate> {
        by_id(&self.items, "item", id)
    }

    /// Looks up a wearable.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the table has no `id`.
    pub fn equipment(&self, id: &str) -> Result<&EquipmentTemplate> {
        by_id(&self.equipment, "equipment", id)
    }

    /// Looks up furniture.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the table has no `id`.
    pub fn furniture(&self, id: &str) -> Result<&FurnitureTemplate> {
        by_id(&self.furniture, "furniture", id)
    }

    /// Looks up an inscription.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the table has no `id`.
    pub fn inscription(&self, id: &str) -> Result<&InscriptionTemplate> {
        by_id(&self.inscriptions, "inscription", id)
    }

    /// Looks up a class.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the table has no `id`.
    pub fn class(&self, id: &str) -> Result<&ClassDef> {
        self.classes
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::unknown_content("class", id))
    }

    /// Resolves a loot glyph, trying consumables before wearables.
    #[must_use]
    pub fn find_by_glyph(&self, glyph: char) -> Option<LootTarget<'_>> {
        self.items
            .iter()
            .find(|i| i.glyph == glyph)
            .map(LootTarget::Item)
            .or_else(|| {
                self.equipment
                    .iter()
                    .find(|e| e.glyph == glyph)
                    .map(LootTarget::Equipment)
            })
    }
}

/// What a loot glyph resolved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LootTarget<'a> {
    /// A consumable.
    Item(&'a ItemTemplate),
    /// A wearable.
    Equipment(&'a EquipmentTemplate),
}
