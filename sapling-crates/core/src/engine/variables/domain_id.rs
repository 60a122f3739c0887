use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use enumset::EnumSet;

use super::AffineView;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::containers::StorageKey;
use crate::engine::notifications::Delta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::OpaqueDelta;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;

/// The lineage of a store: a store created with [`crate::State::default`] gets a fresh one, and
/// its clones keep it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct StoreId(u32);

impl StoreId {
    /// Handles made with [`DomainId::new`], and the arenas which are not part of a store.
    pub(crate) const DETACHED: StoreId = StoreId(0);

    pub(crate) fn fresh() -> StoreId {
        static NEXT_STORE: AtomicU32 = AtomicU32::new(1);
        StoreId(NEXT_STORE.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to a domain owned by a [`crate::State`].
///
/// It is an index into the domain arena of the store, tagged with the lineage of that store.
/// Cloning a store copies the arena and keeps the lineage, so a [`DomainId`] refers to the
/// corresponding domain in every clone of the store it was created in. Posting over a handle of
/// another lineage panics.
#[derive(Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct DomainId {
    pub id: u32,
    store: StoreId,
}

impl DomainId {
    /// A handle which does not belong to any store.
    pub fn new(id: u32) -> Self {
        DomainId {
            id,
            store: StoreId::DETACHED,
        }
    }

    pub(crate) fn in_store(self, store: StoreId) -> Self {
        DomainId { store, ..self }
    }

    pub(crate) fn store(&self) -> StoreId {
        self.store
    }
}

impl IntegerVariable for DomainId {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        assignments.get_lower_bound(*self)
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        assignments.get_upper_bound(*self)
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        assignments.is_value_in_domain(*self, value)
    }

    fn size(&self, assignments: &Assignments) -> usize {
        assignments.get_domain_size(*self)
    }

    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32> {
        assignments.get_domain_iterator(*self)
    }

    fn domain_id(&self) -> DomainId {
        *self
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        watchers.watch_all(*self, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent {
        event.unwrap()
    }

    fn unpack_delta(&self, delta: OpaqueDelta) -> Delta {
        Delta {
            events: delta.events(),
            removed: delta.removed(),
        }
    }
}

impl TransformableVariable<AffineView<DomainId>> for DomainId {
    fn scaled(&self, scale: i32) -> AffineView<DomainId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<DomainId> {
        AffineView::new(*self, 1, offset)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId::new(index as u32)
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
