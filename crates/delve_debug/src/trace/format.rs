//! Trace output formatters.

use std::fmt::Write;

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records, one per line.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Formats a timestamp in the largest sensible unit.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }

    fn describe(event: &TraceEvent) -> String {
        match event {
            TraceEvent::RoundStart { round } => format!("=== ROUND {round} ==="),
            TraceEvent::RoundEnd { round, descended } => {
                if *descended {
                    format!("=== ROUND {round} END (descended) ===")
                } else {
                    format!("=== ROUND {round} END ===")
                }
            }
            TraceEvent::Moved { entity, to } => format!("  MOVE {entity} -> {to}"),
            TraceEvent::Attack {
                attacker,
                defender,
                damage,
                remaining,
            } => format!("  HIT {attacker} -> {defender} for {damage} ({remaining} left)"),
            TraceEvent::Special {
                attacker,
                target,
                kind,
            } => format!("  SPECIAL {attacker} -> {target} {kind:?}"),
            TraceEvent::Reflect { target, damage } => format!("  THORNS {target} takes {damage}"),
            TraceEvent::Periodic { entity, damage } => format!("  DOT {entity} takes {damage}"),
            TraceEvent::EffectExpired { entity, kind } => format!("  EXPIRED {entity} {kind:?}"),
            TraceEvent::Death { entity } => format!("  DEATH {entity}"),
            TraceEvent::Rejected { actor, reason } => format!("  REFUSED {actor}: {reason}"),
            TraceEvent::Item { actor, item, verb } => format!("  ITEM {actor} {verb} {item}"),
            TraceEvent::FloorChange { floor } => format!("*** FLOOR {floor} ***"),
            TraceEvent::Note { name, detail } => format!("  NOTE {name}: {detail}"),
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut line = String::new();
        if self.show_ids {
            let _ = write!(line, "[{:06}] ", record.id);
        }
        let _ = write!(line, "R{:04} ", record.round);
        if self.show_timestamps {
            let _ = write!(line, "{:>10} ", Self::format_timestamp(record.timestamp_ns));
        }
        line.push_str(&Self::describe(&record.event));
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_engine::Rejection;
    use delve_foundation::{EntityId, Point};

    fn record(event: TraceEvent) -> TraceRecord {
        TraceRecord::new(7, 3, 1_500_000, event)
    }

    #[test]
    fn round_events() {
        let f = HumanFormatter::new();
        assert_eq!(
            f.format(&record(TraceEvent::RoundStart { round: 3 })),
            "R0003 === ROUND 3 ==="
        );
        assert_eq!(
            f.format(&record(TraceEvent::RoundEnd {
                round: 3,
                descended: true
            })),
            "R0003 === ROUND 3 END (descended) ==="
        );
    }

    #[test]
    fn options_add_prefixes() {
        let f = HumanFormatter::new().with_ids().with_timestamps();
        let line = f.format(&record(TraceEvent::Death {
            entity: EntityId::new(4),
        }));
        assert!(line.starts_with("[000007] R0003"));
        assert!(line.contains("1.500ms"));
        assert!(line.ends_with("DEATH Entity(4)"));
    }

    #[test]
    fn game_events() {
        let f = HumanFormatter::new();
        let moved = f.format(&record(TraceEvent::Moved {
            entity: EntityId::new(1),
            to: Point::new(2, 3),
        }));
        assert_eq!(moved, "R0003   MOVE Entity(1) -> (2, 3)");
        let refused = f.format(&record(TraceEvent::Rejected {
            actor: EntityId::new(1),
            reason: Rejection::InventoryFull,
        }));
        assert!(refused.ends_with("REFUSED Entity(1): inventory full"));
    }

    #[test]
    fn many_joins_lines() {
        let f = HumanFormatter::new();
        let a = record(TraceEvent::RoundStart { round: 3 });
        let b = record(TraceEvent::FloorChange { floor: 2 });
        assert_eq!(f.format_many(&[&a, &b]).lines().count(), 2);
    }
}
