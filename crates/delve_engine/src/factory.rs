//! Turns content templates and spawn descriptors into entities.

use delve_dungeon::{ContentTables, EquipmentTemplate, ItemTemplate, Level, LootTarget};
use delve_foundation::{EntityId, Point, Result};
use delve_storage::{
    Blocking, CombatStats, Consumable, Equipment, Equippable, Equipped, Furniture, Health,
    Inscription, Inventory, Item, LootTable, Player, Position, Renderable, StatusEffects, Store,
    Thorns, Vision,
};
use log::{debug, warn};

use crate::inventory::adjust_max_health;

/// Glyph drawn for inscriptions.
pub const INSCRIPTION_GLYPH: char = '~';

/// Spawn descriptors that named unknown templates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Entities created.
    pub spawned: usize,
    /// Template ids that were not found, in encounter order.
    pub skipped: Vec<String>,
}

/// Creates entities from a set of content tables.
#[derive(Clone, Copy, Debug)]
pub struct Factory<'a> {
    tables: &'a ContentTables,
}

impl<'a> Factory<'a> {
    /// Creates a factory over `tables`.
    #[must_use]
    pub const fn new(tables: &'a ContentTables) -> Self {
        Self { tables }
    }

    /// The tables this factory reads.
    #[must_use]
    pub const fn tables(&self) -> &'a ContentTables {
        self.tables
    }

    /// Spawns a player of class `class_id` at `pos`.
    ///
    /// Starting equipment is worn immediately; starting items go into the
    /// backpack until it is full.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the class or any of its starting gear is
    /// missing from the tables. Nothing is created in that case.
    pub fn spawn_player(&self, store: &mut Store, class_id: &str, pos: Point) -> Result<EntityId> {
        let class = self.tables.class(class_id)?;
        let gear = class
            .starting_equipment
            .iter()
            .map(|id| self.tables.equipment(id))
            .collect::<Result<Vec<_>>>()?;
        let items = class
            .starting_items
            .iter()
            .map(|id| self.tables.item(id))
            .collect::<Result<Vec<_>>>()?;

        let id = store.create();
        store.add(id, Position(pos));
        store.add(id, Player);
        store.add(id, Blocking);
        store.add(id, Health::full(class.health));
        store.add(
            id,
            CombatStats {
                attack: class.attack,
                defense: class.defense,
            },
        );
        store.add(id, Vision { radius: class.vision });
        store.add(id, StatusEffects::default());
        store.add(
            id,
            Renderable {
                glyph: class.glyph,
                name: class.name.clone(),
            },
        );
        if class.thorns > 0 {
            store.add(id, Thorns { damage: class.thorns });
        }

        let mut equipment = Equipment::default();
        for template in gear {
            let item = self.spawn_equipment_from(store, template, None);
            let worn = Equipped {
                item,
                modifiers: template.modifiers,
                two_handed: template.two_handed,
            };
            if equipment.slots.insert(template.slot, worn).is_some() {
                warn!("class {} starts with two items for {:?}", class.id, template.slot);
            }
        }
        let bonus = equipment.modifiers().max_health;
        store.add(id, equipment);
        adjust_max_health(store, id, bonus);

        let mut inventory = Inventory::with_capacity(class.capacity);
        for template in items {
            if inventory.is_full() {
                warn!("class {} starting items exceed capacity", class.id);
                break;
            }
            inventory.items.push(self.spawn_item_from(store, template, None));
        }
        store.add(id, inventory);

        debug!("spawned {} player {id} at {pos}", class.id);
        Ok(id)
    }

    /// Spawns an enemy or elite at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if neither enemy table has `template_id`.
    pub fn spawn_enemy(&self, store: &mut Store, template_id: &str, pos: Point) -> Result<EntityId> {
        let t = self.tables.enemy(template_id)?;
        let id = store.create();
        store.add(id, Position(pos));
        store.add(id, Blocking);
        store.add(id, Health::full(t.health));
        store.add(
            id,
            CombatStats {
                attack: t.attack,
                defense: t.defense,
            },
        );
        store.add(id, t.ai);
        store.add(id, StatusEffects::default());
        store.add(
            id,
            Renderable {
                glyph: t.glyph,
                name: t.name.clone(),
            },
        );
        if !t.loot.is_empty() {
            store.add(
                id,
                LootTable {
                    entries: t.loot.clone(),
                },
            );
        }
        if t.thorns > 0 {
            store.add(id, Thorns { damage: t.thorns });
        }
        Ok(id)
    }

    /// Spawns a consumable, on the floor at `pos` or carried when `None`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the item table has no `template_id`.
    pub fn spawn_item(&self, store: &mut Store, template_id: &str, pos: Option<Point>) -> Result<EntityId> {
        let t = self.tables.item(template_id)?;
        Ok(self.spawn_item_from(store, t, pos))
    }

    /// Spawns a wearable, on the floor at `pos` or carried when `None`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the equipment table has no `template_id`.
    pub fn spawn_equipment(
        &self,
        store: &mut Store,
        template_id: &str,
        pos: Option<Point>,
    ) -> Result<EntityId> {
        let t = self.tables.equipment(template_id)?;
        Ok(self.spawn_equipment_from(store, t, pos))
    }

    /// Spawns whatever a loot glyph resolved to.
    pub fn spawn_loot(&self, store: &mut Store, target: LootTarget<'_>, pos: Point) -> EntityId {
        match target {
            LootTarget::Item(t) => self.spawn_item_from(store, t, Some(pos)),
            LootTarget::Equipment(t) => self.spawn_equipment_from(store, t, Some(pos)),
        }
    }

    /// Spawns a piece of furniture at `pos`. Furniture blocks movement.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the furniture table has no `template_id`.
    pub fn spawn_furniture(&self, store: &mut Store, template_id: &str, pos: Point) -> Result<EntityId> {
        let t = self.tables.furniture(template_id)?;
        let id = store.create();
        store.add(id, Position(pos));
        store.add(id, Blocking);
        store.add(
            id,
            Furniture {
                bonus: t.bonus,
                used: false,
            },
        );
        store.add(
            id,
            Renderable {
                glyph: t.glyph,
                name: t.name.clone(),
            },
        );
        Ok(id)
    }

    /// Spawns an inscription at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContent` if the inscription table has no `template_id`.
    pub fn spawn_inscription(&self, store: &mut Store, template_id: &str, pos: Point) -> Result<EntityId> {
        let t = self.tables.inscription(template_id)?;
        let id = store.create();
        store.add(id, Position(pos));
        store.add(id, Inscription { text: t.text.clone() });
        store.add(
            id,
            Renderable {
                glyph: INSCRIPTION_GLYPH,
                name: "inscription".to_string(),
            },
        );
        Ok(id)
    }

    /// Creates every entity a generated level describes.
    ///
    /// Descriptors naming unknown templates are skipped and listed in the
    /// report; everything else is spawned.
    pub fn instantiate_level(&self, store: &mut Store, level: &Level) -> SpawnReport {
        let mut report = SpawnReport::default();
        let spawns = &level.spawns;
        let mut record = |result: Result<EntityId>, template: &str| match result {
            Ok(_) => report.spawned += 1,
            Err(e) => {
                warn!("skipping spawn: {e}");
                report.skipped.push(template.to_string());
            }
        };

        for s in spawns.enemies.iter().chain(&spawns.elites) {
            record(self.spawn_enemy(store, &s.template, s.pos), &s.template);
        }
        for s in &spawns.items {
            record(self.spawn_item(store, &s.template, Some(s.pos)), &s.template);
        }
        for s in &spawns.equipment {
            record(self.spawn_equipment(store, &s.template, Some(s.pos)), &s.template);
        }
        for s in &spawns.inscriptions {
            record(self.spawn_inscription(store, &s.template, s.pos), &s.template);
        }
        for s in &spawns.furniture {
            record(self.spawn_furniture(store, &s.template, s.pos), &s.template);
        }
        debug!(
            "floor {}: spawned {} entities, skipped {}",
            level.floor,
            report.spawned,
            report.skipped.len()
        );
        report
    }

    fn spawn_item_from(&self, store: &mut Store, t: &ItemTemplate, pos: Option<Point>) -> EntityId {
        let id = store.create();
        if let Some(pos) = pos {
            store.add(id, Position(pos));
        }
        store.add(id, Item);
        store.add(id, Consumable { effect: t.effect });
        store.add(
            id,
            Renderable {
                glyph: t.glyph,
                name: t.name.clone(),
            },
        );
        id
    }

    fn spawn_equipment_from(&self, store: &mut Store, t: &EquipmentTemplate, pos: Option<Point>) -> EntityId {
        let id = store.create();
        if let Some(pos) = pos {
            store.add(id, Position(pos));
        }
        store.add(id, Item);
        store.add(
            id,
            Equippable {
                slot: t.slot,
                modifiers: t.modifiers,
                two_handed: t.two_handed,
            },
        );
        store.add(
            id,
            Renderable {
                glyph: t.glyph,
                name: t.name.clone(),
            },
        );
        id
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small content set shared by the engine's unit tests.

    use delve_dungeon::{
        ClassDef, ContentTables, EnemyTemplate, EquipmentTemplate, FloorRange, FurnitureTemplate,
        InscriptionTemplate, ItemTemplate,
    };
    use delve_storage::{
        AiBehavior, AiDescriptor, ConsumableEffect, EquipSlot, FurnitureBonus, LootEntry, Modifiers,
        StatusKind,
    };

    pub(crate) fn tables() -> ContentTables {
        let rat = EnemyTemplate {
            id: "rat".into(),
            name: "Rat".into(),
            glyph: 'r',
            health: 4,
            attack: 2,
            defense: 0,
            cost: 1,
            ai: AiDescriptor {
                behavior: AiBehavior::Chase,
                sight_range: 6,
                special: None,
            },
            thorns: 0,
            loot: Vec::new(),
            floors: FloorRange::ANY,
        };
        let urchin = EnemyTemplate {
            id: "urchin".into(),
            name: "Urchin".into(),
            glyph: 'u',
            health: 6,
            attack: 1,
            defense: 1,
            cost: 2,
            thorns: 2,
            ..rat.clone()
        };
        let warden = EnemyTemplate {
            id: "warden".into(),
            name: "Warden".into(),
            glyph: 'W',
            health: 20,
            attack: 5,
            defense: 2,
            cost: 0,
            loot: vec![LootEntry { glyph: '!', chance: 100 }],
            ..rat.clone()
        };
        ContentTables {
            enemies: vec![rat, urchin],
            elites: vec![warden],
            items: vec![
                ItemTemplate {
                    id: "tonic".into(),
                    name: "Tonic".into(),
                    glyph: '!',
                    effect: ConsumableEffect::Heal(5),
                    floors: FloorRange::ANY,
                },
                ItemTemplate {
                    id: "draught".into(),
                    name: "Draught".into(),
                    glyph: '?',
                    effect: ConsumableEffect::Buff {
                        kind: StatusKind::AttackBoost,
                        magnitude: 2,
                        turns: 3,
                    },
                    floors: FloorRange::ANY,
                },
                ItemTemplate {
                    id: "antidote".into(),
                    name: "Antidote".into(),
                    glyph: '+',
                    effect: ConsumableEffect::CurePoison,
                    floors: FloorRange::ANY,
                },
                ItemTemplate {
                    id: "blink".into(),
                    name: "Blink Stone".into(),
                    glyph: '*',
                    effect: ConsumableEffect::Teleport,
                    floors: FloorRange::ANY,
                },
            ],
            equipment: vec![
                EquipmentTemplate {
                    id: "sword".into(),
                    name: "Sword".into(),
                    glyph: '/',
                    slot: EquipSlot::MainHand,
                    modifiers: Modifiers {
                        attack: 2,
                        ..Modifiers::default()
                    },
                    two_handed: false,
                    floors: FloorRange::ANY,
                },
                EquipmentTemplate {
                    id: "maul".into(),
                    name: "Maul".into(),
                    glyph: 'T',
                    slot: EquipSlot::MainHand,
                    modifiers: Modifiers {
                        attack: 4,
                        ..Modifiers::default()
                    },
                    two_handed: true,
                    floors: FloorRange::ANY,
                },
                EquipmentTemplate {
                    id: "buckler".into(),
                    name: "Buckler".into(),
                    glyph: ')',
                    slot: EquipSlot::OffHand,
                    modifiers: Modifiers {
                        defense: 1,
                        ..Modifiers::default()
                    },
                    two_handed: false,
                    floors: FloorRange::ANY,
                },
                EquipmentTemplate {
                    id: "helm".into(),
                    name: "Helm".into(),
                    glyph: '^',
                    slot: EquipSlot::Head,
                    modifiers: Modifiers {
                        max_health: 5,
                        ..Modifiers::default()
                    },
                    two_handed: false,
                    floors: FloorRange::ANY,
                },
            ],
            furniture: vec![
                FurnitureTemplate {
                    id: "crate".into(),
                    name: "Crate".into(),
                    glyph: '#',
                    bonus: None,
                    floors: FloorRange::ANY,
                },
                FurnitureTemplate {
                    id: "altar".into(),
                    name: "Altar".into(),
                    glyph: '_',
                    bonus: Some(FurnitureBonus::Attack(1)),
                    floors: FloorRange::ANY,
                },
            ],
            inscriptions: vec![InscriptionTemplate {
                id: "warning".into(),
                text: "Turn back.".into(),
                floors: FloorRange::ANY,
            }],
            classes: vec![ClassDef {
                id: "knight".into(),
                name: "Knight".into(),
                glyph: '@',
                health: 30,
                attack: 4,
                defense: 1,
                vision: 8,
                thorns: 0,
                capacity: 3,
                starting_equipment: vec!["sword".into(), "helm".into()],
                starting_items: vec!["tonic".into()],
            }],
        }
    }
}
