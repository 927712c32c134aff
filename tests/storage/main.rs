//! Integration tests for Layer 1: Storage
//!
//! Tests entity lifecycle, typed component access and multi-kind queries.

mod lifecycle;
mod queries;
