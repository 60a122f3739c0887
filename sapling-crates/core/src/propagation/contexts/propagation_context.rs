use crate::engine::notifications::Subscription;
use crate::engine::notifications::WatchKind;
use crate::engine::notifications::WatchListCP;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::notifications::ModEvent;
use crate::predicates::Predicate;
use crate::propagation::Domains;
use crate::propagation::HasAssignments;
use crate::propagation::LocalId;
#[cfg(doc)]
use crate::propagation::Propagator;
use crate::propagation::PropagatorId;
use crate::sapling_assert_moderate;

/// Provides information about the state of the store to a propagator.
///
/// Domains can be read through the implementation of [`crate::propagation::ReadDomains`], and
/// changes to the domains can be made via [`Self::post`].
#[derive(Debug)]
pub struct PropagationContext<'a> {
    pub(crate) assignments: &'a mut Assignments,
    pub(crate) propagator_id: PropagatorId,
    pub(crate) watch_list: &'a mut WatchListCP,
    pub(crate) subscriptions: &'a mut Vec<Subscription>,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(
        assignments: &'a mut Assignments,
        watch_list: &'a mut WatchListCP,
        subscriptions: &'a mut Vec<Subscription>,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagationContext {
            assignments,
            propagator_id,
            watch_list,
            subscriptions,
        }
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    /// Get the current domain information.
    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self.assignments)
    }

    /// Make `predicate` true.
    ///
    /// Returns the strongest modification event that the change caused, which is
    /// [`ModEvent::None`] when the predicate already held. An [`EmptyDomain`] error means the
    /// propagator should give up; it is usually forwarded with `?`.
    pub fn post(&mut self, predicate: Predicate) -> Result<ModEvent, EmptyDomain> {
        self.assignments.post_predicate(predicate)
    }

    /// Cancel the subscriptions scheduling this propagator that were registered with `local_id`.
    pub fn unregister(&mut self, local_id: LocalId) {
        self.cancel(local_id, WatchKind::Propagation);
    }

    /// Dispose of the advisor that was registered with `local_id`.
    pub fn unregister_advisor(&mut self, local_id: LocalId) {
        self.cancel(local_id, WatchKind::Advice);
    }

    fn cancel(&mut self, local_id: LocalId, kind: WatchKind) {
        cancel_subscriptions(
            self.subscriptions,
            self.watch_list,
            self.propagator_id,
            local_id,
            kind,
        );
    }
}

impl HasAssignments for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// Remove all subscriptions of `propagator_id` with the given local id and kind, both from the
/// records of the propagator and from the watch list.
pub(crate) fn cancel_subscriptions(
    subscriptions: &mut Vec<Subscription>,
    watch_list: &mut WatchListCP,
    propagator_id: PropagatorId,
    local_id: LocalId,
    kind: WatchKind,
) {
    subscriptions.retain(|subscription| {
        if subscription.local_id != local_id || subscription.kind != kind {
            return true;
        }

        let removed = watch_list.remove(subscription.domain, &subscription.watcher(propagator_id));
        sapling_assert_moderate!(removed, "a subscription without a watcher was recorded");
        false
    });
}
