//! Ring buffer for trace records.
//!
//! Holds the most recent records up to a fixed size, oldest first.

use std::collections::{BTreeMap, VecDeque};

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Buffer
// =============================================================================

/// A bounded buffer of trace records.
///
/// When full, the oldest record is discarded for each new one. Record ids
/// keep increasing across evictions and clears.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    records: VecDeque<TraceRecord>,
    max_size: usize,
    next_id: u64,
}

impl TraceBuffer {
    /// Creates a new trace buffer with the given maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Creates a buffer with the default size (4096 records).
    #[must_use]
    pub fn default_size() -> Self {
        Self::new(4096)
    }

    /// Appends an event and returns the assigned record id.
    pub fn push(&mut self, round: u64, timestamp_ns: u64, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.max_size == 0 {
            return id;
        }
        while self.records.len() >= self.max_size {
            self.records.pop_front();
        }
        self.records
            .push_back(TraceRecord::new(id, round, timestamp_ns, event));
        id
    }

    /// Returns the number of records in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Clears all records from the buffer.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns an iterator over all records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// The newest record.
    #[must_use]
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.back()
    }

    /// Returns records for a specific round.
    #[must_use]
    pub fn records_for_round(&self, round: u64) -> Vec<&TraceRecord> {
        self.records.iter().filter(|r| r.round == round).collect()
    }

    /// Returns the most recent `count` records, oldest first.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&TraceRecord> {
        let start = self.records.len().saturating_sub(count);
        self.records.iter().skip(start).collect()
    }

    /// Returns records matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> Vec<&TraceRecord>
    where
        F: Fn(&TraceRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Returns records of a specific event type.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.filter(|r| r.event_type() == event_type)
    }

    /// Returns the oldest round in the buffer.
    #[must_use]
    pub fn oldest_round(&self) -> Option<u64> {
        self.records.front().map(|r| r.round)
    }

    /// Returns the newest round in the buffer.
    #[must_use]
    pub fn newest_round(&self) -> Option<u64> {
        self.records.back().map(|r| r.round)
    }

    /// Returns statistics about the buffer.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        let mut event_counts = BTreeMap::new();
        for record in &self.records {
            *event_counts.entry(record.event_type()).or_insert(0) += 1;
        }
        TraceBufferStats {
            record_count: self.records.len(),
            max_size: self.max_size,
            oldest_round: self.oldest_round(),
            newest_round: self.newest_round(),
            event_counts,
        }
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::default_size()
    }
}

// =============================================================================
// Buffer Statistics
// =============================================================================

/// Statistics about a trace buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceBufferStats {
    /// Number of records currently in buffer.
    pub record_count: usize,
    /// Maximum buffer size.
    pub max_size: usize,
    /// Oldest round in buffer.
    pub oldest_round: Option<u64>,
    /// Newest round in buffer.
    pub newest_round: Option<u64>,
    /// Count of each event type.
    pub event_counts: BTreeMap<&'static str, usize>,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_exceeds_capacity(cap in 0usize..20, pushes in 0usize..100) {
            let mut buffer = TraceBuffer::new(cap);
            for i in 0..pushes {
                buffer.push(i as u64, 0, TraceEvent::RoundStart { round: i as u64 });
            }
            prop_assert_eq!(buffer.len(), pushes.min(cap));
            if let Some(last) = buffer.last() {
                prop_assert_eq!(last.id, pushes as u64 - 1);
            }
        }
    }
}
