//! Core types, errors, geometry, and seeded randomness for Delve.
//!
//! This crate provides:
//! - [`EntityId`] - Monotonic, never-reused entity identifiers
//! - [`Point`] and [`Direction`] - Grid geometry
//! - [`Error`] - Rich error types with context
//! - [`GameRng`] - The seedable random source threaded through every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod geometry;
pub mod random;

pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use geometry::{Direction, Point};
pub use random::{GameRng, roll_percent, seeded};
