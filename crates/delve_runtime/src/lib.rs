//! Sessions, REPL, CLI, and level fingerprints for Delve.
//!
//! This crate provides:
//! - [`Session`] - One game plus its tracer
//! - [`Repl`] - Interactive command loop over a [`LineEditor`]
//! - [`AutoPilot`] - Unattended play for `--auto`
//! - [`content::builtin`] - The built-in content tables
//! - [`serialize`] - `MessagePack` encoding and level fingerprints

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod autopilot;
pub mod content;
pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;
pub mod view;

pub use autopilot::AutoPilot;
pub use editor::{LineEditor, ReadResult, RustylineEditor, ScriptedEditor};
pub use repl::{Command, CommandError, Repl, parse_command};
pub use session::{Session, SessionConfig};
