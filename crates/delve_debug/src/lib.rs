//! Turn tracing and observability for Delve.
//!
//! This crate provides:
//! - [`Tracer`] - Records round reports as a stream of [`TraceEvent`]s
//! - [`TraceBuffer`] - Bounded ring of the most recent records
//! - [`HumanFormatter`] - One line per record for terminals and logs
//! - [`ObservabilityConfig`] - Presets tying the pieces together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod trace;

pub use config::ObservabilityConfig;
pub use trace::{
    HumanFormatter, TraceBuffer, TraceBufferStats, TraceEvent, TraceFormatter, TraceOutput,
    TraceRecord, Tracer, TracerConfig,
};
