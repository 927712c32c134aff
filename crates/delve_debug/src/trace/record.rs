//! Trace event and record types.
//!
//! Events mirror the turn outcomes and round reports of the engine, flattened
//! so that one record says one thing.

use delve_engine::Rejection;
use delve_foundation::{EntityId, Point};
use delve_storage::{SpecialKind, StatusKind};

// =============================================================================
// Trace Event
// =============================================================================

/// Events recorded while a game runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A round has started.
    RoundStart {
        /// The round number.
        round: u64,
    },

    /// A round has ended.
    RoundEnd {
        /// The round number.
        round: u64,
        /// The round was cut short by a floor change.
        descended: bool,
    },

    /// An entity changed tiles.
    Moved {
        /// Who moved.
        entity: EntityId,
        /// Where to.
        to: Point,
    },

    /// A melee hit landed.
    Attack {
        /// Who swung.
        attacker: EntityId,
        /// Who was hit.
        defender: EntityId,
        /// Damage dealt.
        damage: i32,
        /// Defender health afterwards.
        remaining: i32,
    },

    /// A special attack triggered.
    Special {
        /// The attacker.
        attacker: EntityId,
        /// The victim.
        target: EntityId,
        /// What triggered.
        kind: SpecialKind,
    },

    /// Thorns damage was reflected.
    Reflect {
        /// Who took the reflected damage.
        target: EntityId,
        /// How much.
        damage: i32,
    },

    /// Poison or self-burn dealt damage.
    Periodic {
        /// The sufferer.
        entity: EntityId,
        /// Total damage.
        damage: i32,
    },

    /// A status effect ran out.
    EffectExpired {
        /// The bearer.
        entity: EntityId,
        /// Which effect.
        kind: StatusKind,
    },

    /// An entity died.
    Death {
        /// Who.
        entity: EntityId,
    },

    /// An actor's action was refused.
    Rejected {
        /// The actor.
        actor: EntityId,
        /// Why.
        reason: Rejection,
    },

    /// An item changed hands or was used.
    Item {
        /// The actor.
        actor: EntityId,
        /// The item.
        item: EntityId,
        /// What happened to it: `pickup`, `use`, `equip` or `unequip`.
        verb: &'static str,
    },

    /// The party reached a new floor.
    FloorChange {
        /// The new floor number.
        floor: u32,
    },

    /// Free-form note.
    Note {
        /// Short label.
        name: String,
        /// Details.
        detail: String,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RoundStart { .. } => "round-start",
            Self::RoundEnd { .. } => "round-end",
            Self::Moved { .. } => "moved",
            Self::Attack { .. } => "attack",
            Self::Special { .. } => "special",
            Self::Reflect { .. } => "reflect",
            Self::Periodic { .. } => "periodic",
            Self::EffectExpired { .. } => "effect-expired",
            Self::Death { .. } => "death",
            Self::Rejected { .. } => "rejected",
            Self::Item { .. } => "item",
            Self::FloorChange { .. } => "floor-change",
            Self::Note { .. } => "note",
        }
    }

    /// Returns true if this is a round boundary event.
    #[must_use]
    pub fn is_round_boundary(&self) -> bool {
        matches!(self, Self::RoundStart { .. } | Self::RoundEnd { .. })
    }

    /// Returns true if this event changed someone's health.
    #[must_use]
    pub fn is_damage(&self) -> bool {
        matches!(
            self,
            Self::Attack { .. } | Self::Reflect { .. } | Self::Periodic { .. }
        )
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A numbered trace record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// The round when this event occurred.
    pub round: u64,
    /// Timestamp in nanoseconds since the tracer was created.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, round: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            round,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}
