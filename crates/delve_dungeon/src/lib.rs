//! Map, BSP level generation, content tables, and shadowcasting for Delve.
//!
//! This crate provides:
//! - [`Map`] and [`Tile`] - The fixed-size tile grid
//! - [`generate`] - Partition, carve, connect and populate one floor
//! - [`ContentTables`] - Templates the generator draws from
//! - [`field_of_view`] / [`update_visibility`] - Recursive shadowcasting
//!
//! The generator only describes what should exist. Instantiating entities
//! from a [`Level`]'s spawn lists is the engine factory's job.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bsp;
pub mod config;
pub mod content;
pub mod generator;
pub mod level;
pub mod map;
pub mod populate;
pub mod tile;
pub mod visibility;

pub use config::{CorridorStyle, GeneratorConfig};
pub use content::{
    ClassDef, ContentTables, EnemyTemplate, EquipmentTemplate, FloorRange, FurnitureTemplate,
    InscriptionTemplate, ItemTemplate, LootTarget, Template,
};
pub use generator::generate;
pub use level::{Level, Spawn, SpawnLists};
pub use map::{Map, Rect};
pub use tile::{Tile, TileKind};
pub use visibility::{Viewshed, field_of_view, update_visibility};
