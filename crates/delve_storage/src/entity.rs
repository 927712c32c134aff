//! Entity lifecycle with monotonic identifiers.
//!
//! The `EntityStore` hands out ids from a counter that only moves forward.
//! A destroyed id is never issued again, so a stale id held by a caller can
//! only ever resolve to "absent".

use delve_foundation::EntityId;
use im::OrdSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tracks which entity ids are alive.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityStore {
    /// Next raw id to issue.
    next: u64,
    /// Live ids in creation order.
    live: OrdSet<EntityId>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    /// Creates a new empty entity store. The first id issued is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: 1,
            live: OrdSet::new(),
        }
    }

    /// Issues a fresh entity id.
    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId::new(self.next);
        self.next += 1;
        self.live.insert(id);
        id
    }

    /// Retires an id. Returns `false` if it was not alive.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Checks if an entity is alive.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Iterates over live ids in creation order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.live.iter().copied()
    }

    /// The raw id that the next `spawn` will return.
    #[must_use]
    pub fn peek_next(&self) -> u64 {
        self.next
    }
}
