//! Turn resolution for Delve.
//!
//! This crate provides:
//! - [`GameState`] - Level, store, actors and rng, with `act`/`end_round`
//! - [`resolve_move`] - Bump classification for a directional step
//! - [`combat`] - Effective stats and damage rolls
//! - [`run_ai`] - One decision per AI entity per round
//! - [`Factory`] - Entities from content templates
//! - [`ActionSource`] - Per-actor input for [`GameState::play_round`]
//!
//! Outcomes are plain data. Nothing here formats text for players.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod ai;
pub mod combat;
pub mod effects;
pub mod factory;
pub mod inventory;
pub mod loot;
pub mod movement;
pub mod round;
pub mod state;
pub mod world;

pub use action::{Action, BlockReason, MoveResult, Reflected, Rejection, TurnOutcome};
pub use ai::{AiAction, AiOutcome, SpecialOutcome, choose_target, run_ai};
pub use combat::{CombatResult, attack, effective_attack, effective_defense, roll_damage};
pub use effects::PeriodicDamage;
pub use factory::{Factory, SpawnReport};
pub use movement::resolve_move;
pub use round::{ActionSource, MAX_ATTEMPTS, QueueSource, ScriptedSource};
pub use state::{EffectTick, GameState, RoundReport, TurnRecord};
