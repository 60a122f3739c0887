use crate::containers::KeyedVec;
use crate::engine::failure_counts::FailureRecord;
use crate::engine::notifications::OpaqueDelta;
use crate::engine::notifications::Subscription;
use crate::propagation::CopyContext;
use crate::propagation::LocalId;
use crate::propagation::Propagator;
use crate::propagation::PropagatorId;

/// Everything the store keeps for one live propagator.
pub(crate) struct PropagatorSlot {
    pub(crate) propagator: Box<dyn Propagator>,
    /// Every watcher created on behalf of the propagator.
    pub(crate) subscriptions: Vec<Subscription>,
    /// Domain changes waiting to be handed to the advisors, in arrival order.
    pub(crate) pending_deltas: Vec<(LocalId, OpaqueDelta)>,
    /// Whether a subscription woke the propagator since it last ran.
    pub(crate) woken: bool,
    /// The cost class the propagator is scheduled in.
    pub(crate) class: usize,
    pub(crate) failure_record: FailureRecord,
}

impl PropagatorSlot {
    fn copy(&self, context: CopyContext) -> PropagatorSlot {
        let mut propagator = dyn_clone::clone_box(&*self.propagator);
        propagator.after_copy(context);

        PropagatorSlot {
            propagator,
            subscriptions: self.subscriptions.clone(),
            pending_deltas: Vec::new(),
            woken: false,
            class: self.class,
            failure_record: self.failure_record,
        }
    }

    pub(crate) fn memory_usage(&self) -> usize {
        std::mem::size_of::<PropagatorSlot>()
            + self.propagator.memory_usage()
            + self.subscriptions.capacity() * std::mem::size_of::<Subscription>()
            + self.pending_deltas.capacity() * std::mem::size_of::<(LocalId, OpaqueDelta)>()
    }
}

impl std::fmt::Debug for PropagatorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagatorSlot")
            .field("propagator", &self.propagator.name())
            .field("subscriptions", &self.subscriptions)
            .field("pending_deltas", &self.pending_deltas)
            .field("woken", &self.woken)
            .field("class", &self.class)
            .finish()
    }
}

/// The arena of propagators of a store.
///
/// A propagator keeps its [`PropagatorId`] until it is disposed, after which its slot stays empty.
/// Slots are never reused, so an id never refers to two different propagators.
#[derive(Debug, Default)]
pub(crate) struct PropagatorStore {
    slots: KeyedVec<PropagatorId, Option<PropagatorSlot>>,
    num_alive: usize,
}

impl PropagatorStore {
    pub(crate) fn next_id(&self) -> PropagatorId {
        self.slots.next_key()
    }

    pub(crate) fn push(&mut self, slot: PropagatorSlot) -> PropagatorId {
        self.num_alive += 1;
        self.slots.push(Some(slot))
    }

    pub(crate) fn get(&self, propagator_id: PropagatorId) -> Option<&PropagatorSlot> {
        self.slots.get(propagator_id).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, propagator_id: PropagatorId) -> Option<&mut PropagatorSlot> {
        self.slots.get_mut(propagator_id).and_then(Option::as_mut)
    }

    /// Remove the propagator from the arena.
    pub(crate) fn remove(&mut self, propagator_id: PropagatorId) -> Option<PropagatorSlot> {
        let slot = self.slots.get_mut(propagator_id).and_then(Option::take);
        if slot.is_some() {
            self.num_alive -= 1;
        }
        slot
    }

    pub(crate) fn num_alive(&self) -> usize {
        self.num_alive
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (PropagatorId, &PropagatorSlot)> + '_ {
        self.slots
            .entries()
            .filter_map(|(propagator_id, slot)| slot.as_ref().map(|slot| (propagator_id, slot)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PropagatorSlot> + '_ {
        self.slots.iter_mut().flatten()
    }

    /// Copy every live propagator into a new arena; ids are preserved.
    pub(crate) fn copy(&self, context: CopyContext) -> PropagatorStore {
        PropagatorStore {
            slots: KeyedVec::from_vec(
                self.slots
                    .iter()
                    .map(|slot| slot.as_ref().map(|slot| slot.copy(context)))
                    .collect(),
            ),
            num_alive: self.num_alive,
        }
    }

    pub(crate) fn memory_usage(&self) -> usize {
        self.slots.len() * std::mem::size_of::<Option<PropagatorSlot>>()
            + self
                .iter()
                .map(|(_, slot)| slot.memory_usage())
                .sum::<usize>()
    }
}
