//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Point, Direction, Error, and the seeded rng.

mod errors;
mod geometry;
mod random;
