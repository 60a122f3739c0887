use super::Domains;
use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use crate::engine::notifications::Subscription;
use crate::engine::notifications::WatchKind;
use crate::engine::notifications::WatchListCP;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;
use crate::propagation::DomainEvents;
use crate::propagation::HasAssignments;
#[cfg(doc)]
use crate::State;
use crate::variables::IntegerVariable;

/// A propagator constructor creates a fully initialized instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// scheduled or advised. Additionally, the propagator can be initialized with values that come
/// from the current domains.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator + Clone;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// Propagators use it to subscribe to domain changes and to read the current domains when they
/// are added to a [`State`].
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    assignments: &'a Assignments,
    watch_list: &'a mut WatchListCP,
    subscriptions: &'a mut Vec<Subscription>,
    pub(crate) propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        assignments: &'a Assignments,
        watch_list: &'a mut WatchListCP,
        subscriptions: &'a mut Vec<Subscription>,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagatorConstructorContext {
            assignments,
            watch_list,
            subscriptions,
            propagator_id,
        }
    }

    /// Get domain information.
    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self.assignments)
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    /// Subscribes the propagator to the given [`DomainEvents`].
    ///
    /// When one of the events happens to `var` the propagator is scheduled. The [`LocalId`] is
    /// used to cancel the subscription later through
    /// [`crate::propagation::PropagationContext::unregister`].
    pub fn register(
        &mut self,
        var: impl IntegerVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        self.watch(var, domain_events, local_id, WatchKind::Propagation);
    }

    /// Registers an advisor for `var` on the given [`DomainEvents`].
    ///
    /// Instead of scheduling the propagator, every matching change is handed to
    /// [`Propagator::advise`] together with `local_id`, which should therefore be unique among the
    /// advisors of the propagator. Most often this would be the index of the variable in the
    /// internal array of variables.
    pub fn register_advisor(
        &mut self,
        var: impl IntegerVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        self.watch(var, domain_events, local_id, WatchKind::Advice);
    }

    fn watch(
        &mut self,
        var: impl IntegerVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
        kind: WatchKind,
    ) {
        let mut watchers = Watchers::new(
            self.assignments.store(),
            self.propagator_id,
            local_id,
            kind,
            self.watch_list,
            self.subscriptions,
        );
        var.watch_all(&mut watchers, domain_events.get_int_events());
    }
}

impl HasAssignments for PropagatorConstructorContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
