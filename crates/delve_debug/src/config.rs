//! Configuration for the observability system.

use crate::trace::{HumanFormatter, TraceOutput, Tracer, TracerConfig};

/// Configuration for the observability system.
///
/// Controls whether rounds are traced, how much history is kept, and where
/// lines are echoed.
#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// Whether tracing is enabled (false = nothing is recorded).
    pub enabled: bool,

    /// Trace ring buffer size (number of records to retain).
    pub buffer_size: usize,

    /// Echo each record to stderr.
    pub trace_to_stderr: bool,

    /// Echo each record through the `log` facade instead of stderr.
    pub mirror_to_log: bool,

    /// Prefix lines with elapsed time.
    pub show_timestamps: bool,

    /// Prefix lines with record ids.
    pub show_ids: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 1024,
            trace_to_stderr: false,
            mirror_to_log: false,
            show_timestamps: false,
            show_ids: false,
        }
    }
}

impl ObservabilityConfig {
    /// Creates a new configuration with tracing enabled.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Creates a configuration for development: traced rounds go to the log.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            buffer_size: 4096,
            trace_to_stderr: false,
            mirror_to_log: true,
            show_timestamps: false,
            show_ids: false,
        }
    }

    /// Creates a configuration for debugging: everything on stderr, with ids
    /// and timestamps.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            enabled: true,
            buffer_size: 16_384,
            trace_to_stderr: true,
            mirror_to_log: false,
            show_timestamps: true,
            show_ids: true,
        }
    }

    /// Builder method to set enabled state.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to enable/disable stderr tracing.
    #[must_use]
    pub fn with_trace_to_stderr(mut self, trace: bool) -> Self {
        self.trace_to_stderr = trace;
        self
    }

    /// Builder method to enable/disable mirroring into the log.
    #[must_use]
    pub fn with_mirror_to_log(mut self, mirror: bool) -> Self {
        self.mirror_to_log = mirror;
        self
    }

    /// Builder method to toggle timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    /// Builder method to toggle record ids.
    #[must_use]
    pub fn with_ids(mut self, show: bool) -> Self {
        self.show_ids = show;
        self
    }

    /// Where records are echoed. Stderr wins over the log when both are set.
    #[must_use]
    pub fn output(&self) -> TraceOutput {
        if self.trace_to_stderr {
            TraceOutput::Stderr
        } else if self.mirror_to_log {
            TraceOutput::Log
        } else {
            TraceOutput::None
        }
    }

    /// The tracer configuration these settings describe.
    #[must_use]
    pub fn tracer_config(&self) -> TracerConfig {
        TracerConfig {
            enabled: self.enabled,
            buffer_size: self.buffer_size,
            output: self.output(),
            event_filter: Vec::new(),
        }
    }

    /// The formatter these settings describe.
    #[must_use]
    pub fn formatter(&self) -> HumanFormatter {
        HumanFormatter {
            show_timestamps: self.show_timestamps,
            show_ids: self.show_ids,
        }
    }

    /// Builds a tracer from these settings.
    #[must_use]
    pub fn tracer(&self) -> Tracer {
        Tracer::new(self.tracer_config()).with_formatter(self.formatter())
    }
}
