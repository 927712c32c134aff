//! The entity-component store.
//!
//! One sparse table per [`ComponentKind`], each mapping entity id to record.
//! Tables are persistent `im` maps so cloning the whole store is cheap.

use delve_foundation::EntityId;
use im::OrdMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind, ComponentRecord};
use crate::entity::EntityStore;

/// Storage for all entities and their attribute records.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Store {
    entities: EntityStore,
    /// Indexed by `ComponentKind::index()`.
    tables: Vec<OrdMap<EntityId, Component>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: EntityStore::new(),
            tables: (0..ComponentKind::COUNT).map(|_| OrdMap::new()).collect(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Creates a new entity with no records.
    pub fn create(&mut self) -> EntityId {
        self.entities.spawn()
    }

    /// Removes every record of `id` and retires it.
    ///
    /// Returns `false` for ids that are already dead or were never issued.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if !self.entities.destroy(id) {
            return false;
        }
        for table in &mut self.tables {
            table.remove(&id);
        }
        true
    }

    /// True while `id` is alive.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.entities.exists(id)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no entity is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Attaches `record`, replacing any record of the same kind.
    ///
    /// Returns `false` (and stores nothing) if `id` is not alive.
    pub fn add<R: ComponentRecord>(&mut self, id: EntityId, record: R) -> bool {
        self.insert(id, record.into())
    }

    /// Untyped form of [`Store::add`].
    pub fn insert(&mut self, id: EntityId, component: Component) -> bool {
        if !self.entities.exists(id) {
            return false;
        }
        self.tables[component.kind().index()].insert(id, component);
        true
    }

    /// Borrows the record of type `R`.
    #[must_use]
    pub fn get<R: ComponentRecord>(&self, id: EntityId) -> Option<&R> {
        self.tables[R::KIND.index()]
            .get(&id)
            .and_then(R::from_component)
    }

    /// Mutably borrows the record of type `R`.
    pub fn get_mut<R: ComponentRecord>(&mut self, id: EntityId) -> Option<&mut R> {
        self.tables[R::KIND.index()]
            .get_mut(&id)
            .and_then(R::from_component_mut)
    }

    /// Borrows the record of `kind`, whatever its type.
    #[must_use]
    pub fn get_any(&self, id: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.tables[kind.index()].get(&id)
    }

    /// True when `id` carries a record of `kind`.
    #[must_use]
    pub fn has(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.tables[kind.index()].contains_key(&id)
    }

    /// Detaches and returns the record of type `R`.
    pub fn remove<R: ComponentRecord>(&mut self, id: EntityId) -> Option<R> {
        self.tables[R::KIND.index()]
            .remove(&id)
            .and_then(R::from_owned)
    }

    /// Number of entities carrying `kind`.
    #[must_use]
    pub fn count(&self, kind: ComponentKind) -> usize {
        self.tables[kind.index()].len()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Entities carrying every kind in `kinds`, in id order.
    ///
    /// Candidates come from the smallest of the requested tables and are
    /// filtered against the others, so the cost follows the rarest kind.
    /// An empty list yields every live entity.
    #[must_use]
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        let Some(&smallest) = kinds.iter().min_by_key(|k| self.count(**k)) else {
            return self.entities.iter().collect();
        };
        self.tables[smallest.index()]
            .keys()
            .copied()
            .filter(|id| {
                kinds
                    .iter()
                    .filter(|k| **k != smallest)
                    .all(|k| self.has(*id, *k))
            })
            .collect()
    }

    /// Like [`Store::query`] but stops at the first match.
    #[must_use]
    pub fn query_first(&self, kinds: &[ComponentKind]) -> Option<EntityId> {
        let Some(&smallest) = kinds.iter().min_by_key(|k| self.count(**k)) else {
            return self.entities.iter().next();
        };
        self.tables[smallest.index()]
            .keys()
            .copied()
            .find(|id| kinds.iter().filter(|k| **k != smallest).all(|k| self.has(*id, *k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Blocking, CombatStats, Health, Player, Position};
    use delve_foundation::Point;

    #[test]
    fn add_then_get() {
        let mut store = Store::new();
        let e = store.create();
        assert!(store.add(e, Health::full(10)));
        assert_eq!(store.get::<Health>(e), Some(&Health::full(10)));
        assert!(store.has(e, ComponentKind::Health));
        assert!(!store.has(e, ComponentKind::Combat));
    }

    #[test]
    fn add_replaces_same_kind() {
        let mut store = Store::new();
        let e = store.create();
        store.add(e, Health::full(10));
        store.add(e, Health::full(3));
        assert_eq!(store.get::<Health>(e).map(|h| h.max), Some(3));
        assert_eq!(store.count(ComponentKind::Health), 1);
    }

    #[test]
    fn add_to_dead_entity_is_rejected() {
        let mut store = Store::new();
        let e = store.create();
        store.destroy(e);
        assert!(!store.add(e, Player));
        assert!(store.get::<Player>(e).is_none());
    }

    #[test]
    fn destroy_clears_every_kind() {
        let mut store = Store::new();
        let e = store.create();
        store.add(e, Position(Point::new(1, 1)));
        store.add(e, Health::full(5));
        assert!(store.destroy(e));
        for kind in ComponentKind::ALL {
            assert!(store.get_any(e, kind).is_none());
        }
        assert!(!store.destroy(e));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut store = Store::new();
        let e = store.create();
        store.add(e, Health::full(10));
        if let Some(hp) = store.get_mut::<Health>(e) {
            hp.damage(4);
        }
        assert_eq!(store.get::<Health>(e).map(|h| h.current), Some(6));
    }

    #[test]
    fn remove_detaches() {
        let mut store = Store::new();
        let e = store.create();
        store.add(e, Blocking);
        assert_eq!(store.remove::<Blocking>(e), Some(Blocking));
        assert!(!store.has(e, ComponentKind::Blocking));
        assert!(store.exists(e));
    }

    #[test]
    fn query_intersects_kinds() {
        let mut store = Store::new();
        let a = store.create();
        let b = store.create();
        let c = store.create();
        store.add(a, Position(Point::new(0, 0)));
        store.add(a, Health::full(1));
        store.add(b, Position(Point::new(1, 0)));
        store.add(c, Health::full(1));
        store.add(c, Position(Point::new(2, 0)));
        store.add(c, CombatStats::default());

        assert_eq!(
            store.query(&[ComponentKind::Position, ComponentKind::Health]),
            vec![a, c]
        );
        assert_eq!(store.query(&[ComponentKind::Combat]), vec![c]);
        assert!(store.query(&[ComponentKind::Player]).is_empty());
    }

    #[test]
    fn query_first_skips_partial_matches() {
        let mut store = Store::new();
        let a = store.create();
        let b = store.create();
        let c = store.create();
        store.add(a, Position(Point::new(0, 0)));
        store.add(b, Health::full(1));
        store.add(b, Position(Point::new(1, 0)));
        store.add(c, Health::full(1));
        store.add(c, Position(Point::new(2, 0)));

        assert_eq!(store.query_first(&[ComponentKind::Health, ComponentKind::Position]), Some(b));
        assert_eq!(store.query_first(&[ComponentKind::Player]), None);
        store.destroy(a);
        assert_eq!(store.query_first(&[]), Some(b));
    }

    #[test]
    fn empty_query_lists_all_live() {
        let mut store = Store::new();
        let a = store.create();
        let b = store.create();
        store.destroy(a);
        assert_eq!(store.query(&[]), vec![b]);
    }

    #[test]
    fn clone_is_independent() {
        let mut store = Store::new();
        let e = store.create();
        store.add(e, Health::full(10));
        let snapshot = store.clone();
        if let Some(hp) = store.get_mut::<Health>(e) {
            hp.damage(10);
        }
        assert_eq!(snapshot.get::<Health>(e).map(|h| h.current), Some(10));
    }
}
