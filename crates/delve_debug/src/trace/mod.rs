//! Tracing of game rounds.
//!
//! The tracer turns the engine's round reports into a flat stream of events,
//! kept in a bounded buffer and optionally echoed as they arrive. Recording
//! is a no-op while the tracer is disabled.

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, TraceFormatter};
pub use record::{TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use delve_engine::{AiAction, RoundReport, TurnOutcome, TurnRecord};
use delve_foundation::EntityId;

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace lines are echoed as they are recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// Buffer only.
    #[default]
    None,
    /// Write each line to stderr.
    Stderr,
    /// Send each line to the `log` facade at debug level.
    Log,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to echo records.
    pub output: TraceOutput,
    /// Only these event types are kept (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 4096,
            output: TraceOutput::None,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to set the echo destination.
    #[must_use]
    pub fn with_output(mut self, output: TraceOutput) -> Self {
        self.output = output;
        self
    }

    /// Builder method to filter event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records game events into a ring buffer.
#[derive(Debug)]
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_round: u64,
    start_time: Instant,
    formatter: HumanFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            current_round: 0,
            start_time: Instant::now(),
            formatter: HumanFormatter::new(),
        }
    }

    /// Builder method to replace the line formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: HumanFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Sets the echo destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Returns the round new records are stamped with.
    #[must_use]
    pub fn current_round(&self) -> u64 {
        self.current_round
    }

    /// Records a trace event.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }
        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|f| f == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_round, timestamp_ns, event);

        if self.config.output == TraceOutput::None {
            return;
        }
        let Some(line) = self.buffer.last().map(|r| self.formatter.format(r)) else {
            return;
        };
        match self.config.output {
            TraceOutput::Stderr => {
                let _ = writeln!(io::stderr(), "{line}");
            }
            TraceOutput::Log => log::debug!(target: "delve::trace", "{line}"),
            TraceOutput::None => {}
        }
    }

    /// Formats a record for display.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        self.formatter.format(record)
    }

    /// Formats the most recent `count` records.
    #[must_use]
    pub fn format_recent(&self, count: usize) -> String {
        self.formatter.format_many(&self.buffer.recent(count))
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    // -------------------------------------------------------------------------
    // Engine reports
    // -------------------------------------------------------------------------

    /// Records one actor turn.
    pub fn record_turn(&mut self, turn: &TurnRecord) {
        if !self.config.enabled {
            return;
        }
        let actor = turn.actor;
        match &turn.outcome {
            TurnOutcome::Moved { to, .. } => self.record(TraceEvent::Moved { entity: actor, to: *to }),
            TurnOutcome::Attacked {
                result, reflected, ..
            } => {
                self.record(TraceEvent::Attack {
                    attacker: result.attacker,
                    defender: result.defender,
                    damage: result.damage,
                    remaining: result.remaining,
                });
                if let Some(r) = reflected {
                    self.record(TraceEvent::Reflect {
                        target: r.target,
                        damage: r.damage,
                    });
                    if r.killed {
                        self.record(TraceEvent::Death { entity: r.target });
                    }
                }
                if result.killed {
                    self.record(TraceEvent::Death {
                        entity: result.defender,
                    });
                }
            }
            TurnOutcome::PickedUp(item) => self.item(actor, *item, "pickup"),
            TurnOutcome::Used { item, .. } => self.item(actor, *item, "use"),
            TurnOutcome::Equipped { item, .. } => self.item(actor, *item, "equip"),
            TurnOutcome::Unequipped { item, .. } => self.item(actor, *item, "unequip"),
            TurnOutcome::Descended { floor } => self.record(TraceEvent::FloorChange { floor: *floor }),
            TurnOutcome::Rejected(reason) => self.record(TraceEvent::Rejected {
                actor,
                reason: *reason,
            }),
            TurnOutcome::Blocked(_)
            | TurnOutcome::Interacted { .. }
            | TurnOutcome::Waited
            | TurnOutcome::Stunned
            | TurnOutcome::NoAction => {}
        }
    }

    fn item(&mut self, actor: EntityId, item: EntityId, verb: &'static str) {
        self.record(TraceEvent::Item { actor, item, verb });
    }

    /// Records a whole round: its turns, then the shared pass.
    pub fn record_round(&mut self, report: &RoundReport) {
        if !self.config.enabled {
            return;
        }
        self.current_round = report.round;
        self.record(TraceEvent::RoundStart {
            round: report.round,
        });
        for turn in &report.turns {
            self.record_turn(turn);
        }
        for tick in &report.effects {
            let damage = tick.poison + tick.burn;
            if damage > 0 {
                self.record(TraceEvent::Periodic {
                    entity: tick.entity,
                    damage,
                });
            }
            for kind in &tick.expired {
                self.record(TraceEvent::EffectExpired {
                    entity: tick.entity,
                    kind: *kind,
                });
            }
        }
        for outcome in &report.ai {
            match outcome.action {
                AiAction::Moved { to, .. } => self.record(TraceEvent::Moved {
                    entity: outcome.entity,
                    to,
                }),
                AiAction::Attacked { result, special } => {
                    self.record(TraceEvent::Attack {
                        attacker: result.attacker,
                        defender: result.defender,
                        damage: result.damage,
                        remaining: result.remaining,
                    });
                    if let Some(s) = special {
                        self.record(TraceEvent::Special {
                            attacker: result.attacker,
                            target: result.defender,
                            kind: s.kind,
                        });
                    }
                }
                AiAction::Stunned | AiAction::Idle | AiAction::Blocked => {}
            }
        }
        for r in &report.reflected {
            self.record(TraceEvent::Reflect {
                target: r.target,
                damage: r.damage,
            });
        }
        for entity in &report.deaths {
            self.record(TraceEvent::Death { entity: *entity });
        }
        self.record(TraceEvent::RoundEnd {
            round: report.round,
            descended: report.descended,
        });
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}
