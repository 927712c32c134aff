//! The built-in content set.
//!
//! Every table the generator and factory draw from. Loot tables refer to
//! items and equipment by glyph, so glyphs are unique across both.

use delve_dungeon::{
    ClassDef, ContentTables, EnemyTemplate, EquipmentTemplate, FloorRange, FurnitureTemplate,
    InscriptionTemplate, ItemTemplate,
};
use delve_storage::{
    AiBehavior, AiDescriptor, ConsumableEffect, EquipSlot, FurnitureBonus, LootEntry, Modifiers,
    SpecialAttack, SpecialKind, StatusKind,
};

/// Class ids in the built-in set, in menu order.
pub const CLASSES: [&str; 3] = ["warrior", "rogue", "templar"];

/// Returns the built-in content tables.
#[must_use]
pub fn builtin() -> ContentTables {
    ContentTables {
        enemies: enemies(),
        elites: elites(),
        items: items(),
        equipment: equipment(),
        furniture: furniture(),
        inscriptions: inscriptions(),
        classes: classes(),
    }
}

// =============================================================================
// Enemies
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn enemy(
    id: &str,
    name: &str,
    glyph: char,
    (health, attack, defense): (i32, i32, i32),
    cost: u32,
    behavior: AiBehavior,
    sight_range: i32,
    floors: FloorRange,
) -> EnemyTemplate {
    EnemyTemplate {
        id: id.into(),
        name: name.into(),
        glyph,
        health,
        attack,
        defense,
        cost,
        ai: AiDescriptor {
            behavior,
            sight_range,
            special: None,
        },
        thorns: 0,
        loot: Vec::new(),
        floors,
    }
}

fn with_special(mut template: EnemyTemplate, kind: SpecialKind, chance: u32, magnitude: i32, duration: u32) -> EnemyTemplate {
    template.ai.special = Some(SpecialAttack {
        kind,
        chance,
        magnitude,
        duration,
    });
    template
}

fn enemies() -> Vec<EnemyTemplate> {
    vec![
        enemy("rat", "Rat", 'r', (4, 2, 0), 1, AiBehavior::Chase, 6, FloorRange::new(1, 3)),
        enemy("bat", "Bat", 'b', (3, 2, 0), 1, AiBehavior::Erratic, 8, FloorRange::new(1, 4)),
        enemy("goblin", "Goblin", 'g', (8, 3, 1), 2, AiBehavior::Chase, 7, FloorRange::new(1, 6)),
        EnemyTemplate {
            thorns: 2,
            ..enemy("urchin", "Cave Urchin", 'u', (7, 2, 2), 2, AiBehavior::Guard, 4, FloorRange::ANY)
        },
        with_special(
            enemy("spider", "Cave Spider", 's', (6, 3, 0), 2, AiBehavior::Chase, 6, FloorRange::new(2, 8)),
            SpecialKind::Poison,
            25,
            2,
            3,
        ),
        enemy("skeleton", "Skeleton", 'z', (12, 4, 2), 3, AiBehavior::Guard, 5, FloorRange::new(2, u32::MAX)),
        with_special(
            enemy("wraith", "Wraith", 'w', (10, 5, 1), 4, AiBehavior::Chase, 9, FloorRange::new(4, u32::MAX)),
            SpecialKind::Lifedrain,
            30,
            3,
            0,
        ),
        with_special(
            enemy("ogre", "Ogre", 'o', (20, 6, 2), 5, AiBehavior::Chase, 6, FloorRange::new(5, u32::MAX)),
            SpecialKind::Stun,
            15,
            0,
            1,
        ),
    ]
}

fn elites() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate {
            loot: vec![
                LootEntry { glyph: '!', chance: 100 },
                LootEntry { glyph: '/', chance: 50 },
            ],
            ..with_special(
                enemy("goblin_chief", "Goblin Chief", 'C', (24, 5, 2), 0, AiBehavior::Chase, 8, FloorRange::new(1, 3)),
                SpecialKind::Weaken,
                30,
                2,
                3,
            )
        },
        EnemyTemplate {
            loot: vec![
                LootEntry { glyph: '!', chance: 100 },
                LootEntry { glyph: '[', chance: 40 },
                LootEntry { glyph: '|', chance: 30 },
            ],
            ..with_special(
                enemy("bone_knight", "Bone Knight", 'K', (36, 7, 3), 0, AiBehavior::Guard, 6, FloorRange::new(4, u32::MAX)),
                SpecialKind::ArmorBreak,
                30,
                2,
                3,
            )
        },
    ]
}

// =============================================================================
// Items and equipment
// =============================================================================

fn item(id: &str, name: &str, glyph: char, effect: ConsumableEffect) -> ItemTemplate {
    ItemTemplate {
        id: id.into(),
        name: name.into(),
        glyph,
        effect,
        floors: FloorRange::ANY,
    }
}

fn items() -> Vec<ItemTemplate> {
    vec![
        item("healing_potion", "Healing Potion", '!', ConsumableEffect::Heal(8)),
        item(
            "strength_elixir",
            "Elixir of Strength",
            '?',
            ConsumableEffect::Buff {
                kind: StatusKind::AttackBoost,
                magnitude: 3,
                turns: 5,
            },
        ),
        item(
            "iron_draught",
            "Iron Draught",
            '%',
            ConsumableEffect::Buff {
                kind: StatusKind::DefenseBoost,
                magnitude: 2,
                turns: 5,
            },
        ),
        item(
            "veil_draught",
            "Veil Draught",
            '"',
            ConsumableEffect::Buff {
                kind: StatusKind::Invisible,
                magnitude: 1,
                turns: 4,
            },
        ),
        item("antidote", "Antidote", ';', ConsumableEffect::CurePoison),
        item("blink_shard", "Blink Shard", '*', ConsumableEffect::Teleport),
    ]
}

fn gear(id: &str, name: &str, glyph: char, slot: EquipSlot, modifiers: Modifiers, floors: FloorRange) -> EquipmentTemplate {
    EquipmentTemplate {
        id: id.into(),
        name: name.into(),
        glyph,
        slot,
        modifiers,
        two_handed: false,
        floors,
    }
}

fn attack(n: i32) -> Modifiers {
    Modifiers {
        attack: n,
        ..Modifiers::default()
    }
}

fn defense(n: i32) -> Modifiers {
    Modifiers {
        defense: n,
        ..Modifiers::default()
    }
}

fn equipment() -> Vec<EquipmentTemplate> {
    vec![
        gear("dagger", "Dagger", '-', EquipSlot::MainHand, attack(1), FloorRange::new(1, 3)),
        gear("short_sword", "Short Sword", '/', EquipSlot::MainHand, attack(2), FloorRange::ANY),
        gear("longsword", "Longsword", '|', EquipSlot::MainHand, attack(3), FloorRange::new(2, u32::MAX)),
        EquipmentTemplate {
            two_handed: true,
            ..gear("greataxe", "Greataxe", 'T', EquipSlot::MainHand, attack(5), FloorRange::new(3, u32::MAX))
        },
        gear("buckler", "Buckler", ')', EquipSlot::OffHand, defense(1), FloorRange::ANY),
        gear("tower_shield", "Tower Shield", ']', EquipSlot::OffHand, defense(2), FloorRange::new(3, u32::MAX)),
        gear(
            "leather_cap",
            "Leather Cap",
            '^',
            EquipSlot::Head,
            Modifiers {
                max_health: 3,
                ..Modifiers::default()
            },
            FloorRange::ANY,
        ),
        gear("chain_mail", "Chain Mail", '[', EquipSlot::Body, defense(2), FloorRange::new(2, u32::MAX)),
        gear(
            "ring_of_sight",
            "Ring of Sight",
            '=',
            EquipSlot::Trinket,
            Modifiers {
                vision: 2,
                ..Modifiers::default()
            },
            FloorRange::ANY,
        ),
    ]
}

// =============================================================================
// Furniture, inscriptions, classes
// =============================================================================

fn furniture() -> Vec<FurnitureTemplate> {
    let piece = |id: &str, name: &str, glyph: char, bonus: Option<FurnitureBonus>| FurnitureTemplate {
        id: id.into(),
        name: name.into(),
        glyph,
        bonus,
        floors: FloorRange::ANY,
    };
    vec![
        piece("crate", "Crate", '&', None),
        piece("barrel", "Barrel", 'B', None),
        piece("bookshelf", "Bookshelf", 'H', None),
        piece("shrine", "Shrine", '_', Some(FurnitureBonus::Heal(10))),
        piece("fountain", "Fountain", '{', Some(FurnitureBonus::MaxHealth(5))),
        piece("anvil", "Anvil", 'A', Some(FurnitureBonus::Attack(1))),
        piece("warding_stone", "Warding Stone", 'E', Some(FurnitureBonus::Defense(1))),
    ]
}

fn inscriptions() -> Vec<InscriptionTemplate> {
    let text = |id: &str, text: &str, floors: FloorRange| InscriptionTemplate {
        id: id.into(),
        text: text.into(),
        floors,
    };
    vec![
        text("welcome", "The stairs only go down.", FloorRange::new(1, 1)),
        text("spiders", "Mind the webs. Carry an antidote.", FloorRange::new(2, 8)),
        text("knight", "The knight below never leaves its post.", FloorRange::new(3, 6)),
        text("scratches", "Scratch marks count the days.", FloorRange::ANY),
    ]
}

fn classes() -> Vec<ClassDef> {
    vec![
        ClassDef {
            id: "warrior".into(),
            name: "Warrior".into(),
            glyph: '@',
            health: 30,
            attack: 4,
            defense: 2,
            vision: 8,
            thorns: 0,
            capacity: 6,
            starting_equipment: vec!["short_sword".into(), "buckler".into()],
            starting_items: vec!["healing_potion".into(), "healing_potion".into()],
        },
        ClassDef {
            id: "rogue".into(),
            name: "Rogue".into(),
            glyph: '@',
            health: 22,
            attack: 5,
            defense: 1,
            vision: 10,
            thorns: 0,
            capacity: 8,
            starting_equipment: vec!["dagger".into(), "leather_cap".into()],
            starting_items: vec![
                "healing_potion".into(),
                "blink_shard".into(),
                "veil_draught".into(),
            ],
        },
        ClassDef {
            id: "templar".into(),
            name: "Templar".into(),
            glyph: '@',
            health: 28,
            attack: 3,
            defense: 3,
            vision: 7,
            thorns: 2,
            capacity: 5,
            starting_equipment: vec!["short_sword".into(), "leather_cap".into()],
            starting_items: vec!["healing_potion".into(), "antidote".into()],
        },
    ]
}
