//! Integration tests for Layer 1: Dungeon
//!
//! Tests level generation against the built-in content and shadowcasting.

mod generation;
mod visibility;
