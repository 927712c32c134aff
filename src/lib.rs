//! Delve - turn-based dungeon crawl core
//!
//! This crate re-exports all layers of the Delve system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: delve_runtime    - Session, REPL, CLI, built-in content, fingerprints
//! Layer 3: delve_debug      - Round tracing
//! Layer 2: delve_engine     - Turn resolution, combat, AI, rounds
//! Layer 1: delve_dungeon    - Map, BSP generation, content tables, shadowcasting
//!          delve_storage    - Entity lifecycle and component tables
//! Layer 0: delve_foundation - Core types (EntityId, Point, Error, rng)
//! ```

pub use delve_debug as debug;
pub use delve_dungeon as dungeon;
pub use delve_engine as engine;
pub use delve_foundation as foundation;
pub use delve_runtime as runtime;
pub use delve_storage as storage;
