//! Integration tests across all layers
//!
//! Tests whole sessions: autopilot runs, scripted REPL play, tracing and
//! level fingerprints.

mod repl;
mod session;
