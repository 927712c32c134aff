//! Entity lifecycle and per-kind component tables for Delve.
//!
//! This crate provides:
//! - [`EntityStore`] - Monotonic entity allocation that never reuses ids
//! - [`Component`] and [`ComponentKind`] - The closed set of attribute records
//! - [`Store`] - One table per kind, with multi-kind queries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod store;

pub use component::{
    ActiveEffect, AiBehavior, AiDescriptor, Blocking, CombatStats, Component, ComponentKind,
    ComponentRecord, Consumable, ConsumableEffect, EquipSlot, Equipment, Equippable, Equipped,
    Furniture, FurnitureBonus, Health, Inscription, Inventory, Item, LootEntry, LootTable,
    Modifiers, Player, Position, Renderable, SpecialAttack, SpecialKind, StatusEffects,
    StatusKind, Thorns, Vision,
};
pub use entity::EntityStore;
pub use store::Store;
