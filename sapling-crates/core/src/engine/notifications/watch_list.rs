use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::DomainId;
use crate::engine::variables::StoreId;
use crate::propagation::LocalId;
use crate::propagation::PropagatorId;

/// Whether a watcher schedules its propagator or hands the change to one of its advisors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum WatchKind {
    Propagation,
    Advice,
}

/// An entry in the watch list of a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Watcher {
    pub(crate) propagator_id: PropagatorId,
    pub(crate) local_id: LocalId,
    pub(crate) events: EnumSet<DomainEvent>,
    pub(crate) kind: WatchKind,
}

/// The record a propagator slot keeps of every watcher created on its behalf.
///
/// The store uses these records to remove all watchers of a propagator when it is disposed, so a
/// disposed propagator never leaves entries behind in a watch list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Subscription {
    pub(crate) domain: DomainId,
    pub(crate) local_id: LocalId,
    pub(crate) events: EnumSet<DomainEvent>,
    pub(crate) kind: WatchKind,
}

impl Subscription {
    pub(crate) fn watcher(&self, propagator_id: PropagatorId) -> Watcher {
        Watcher {
            propagator_id,
            local_id: self.local_id,
            events: self.events,
            kind: self.kind,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct WatchListCP {
    watchers: KeyedVec<DomainId, Vec<Watcher>>,
}

impl WatchListCP {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Vec::new());
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.watchers.len()
    }

    pub(crate) fn get_watchers(&self, domain: DomainId) -> &[Watcher] {
        &self.watchers[domain]
    }

    pub(crate) fn degree(&self, domain: DomainId) -> usize {
        self.watchers[domain].len()
    }

    pub(crate) fn add(&mut self, domain: DomainId, watcher: Watcher) {
        self.watchers[domain].push(watcher);
    }

    /// Remove the watcher matching `watcher`. Returns whether it was present.
    pub(crate) fn remove(&mut self, domain: DomainId, watcher: &Watcher) -> bool {
        let watchers = &mut self.watchers[domain];
        match watchers.iter().position(|candidate| candidate == watcher) {
            Some(position) => {
                // Removal keeps the order of the remaining watchers, which is the order in which
                // they are notified.
                let _ = watchers.remove(position);
                true
            }
            None => false,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (DomainId, &Watcher)> + '_ {
        self.watchers
            .entries()
            .flat_map(|(domain, watchers)| watchers.iter().map(move |watcher| (domain, watcher)))
    }

    pub(crate) fn memory_usage(&self) -> usize {
        self.watchers
            .iter()
            .map(|watchers| {
                std::mem::size_of::<Vec<Watcher>>()
                    + watchers.capacity() * std::mem::size_of::<Watcher>()
            })
            .sum()
    }
}

/// Used to register a subscription for a propagator on the domains underneath a variable.
///
/// Obtained from [`crate::propagation::PropagatorConstructorContext::register`] and handed to
/// [`crate::variables::IntegerVariable::watch_all`], which lets every view forward the
/// subscription to the domain it is defined over.
#[derive(Debug)]
pub struct Watchers<'a> {
    /// The lineage of the store the propagator is posted in.
    store: StoreId,
    propagator_id: PropagatorId,
    local_id: LocalId,
    kind: WatchKind,
    watch_list: &'a mut WatchListCP,
    subscriptions: &'a mut Vec<Subscription>,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(
        store: StoreId,
        propagator_id: PropagatorId,
        local_id: LocalId,
        kind: WatchKind,
        watch_list: &'a mut WatchListCP,
        subscriptions: &'a mut Vec<Subscription>,
    ) -> Self {
        Watchers {
            store,
            propagator_id,
            local_id,
            kind,
            watch_list,
            subscriptions,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        assert!(
            domain.store() == self.store && domain.index() < self.watch_list.num_domains(),
            "{domain} does not belong to the store the propagator is posted in"
        );

        let subscription = Subscription {
            domain,
            local_id: self.local_id,
            events,
            kind: self.kind,
        };
        self.watch_list
            .add(domain, subscription.watcher(self.propagator_id));
        self.subscriptions.push(subscription);
    }
}
