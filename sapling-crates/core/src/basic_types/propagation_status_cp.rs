use crate::engine::EmptyDomain;

/// The result of invoking a propagator: either an outcome telling the scheduler what to do with the
/// propagator next, or an [`Inconsistency`] which fails the store.
pub type PropagationStatusCP = Result<PropagatorOutcome, Inconsistency>;

/// What a propagator reports after a successful call to
/// [`crate::propagation::Propagator::propagate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagatorOutcome {
    /// The propagator is at a fixpoint with respect to its own modifications; events it caused
    /// itself do not reschedule it.
    Fix,
    /// The propagator might not be at a fixpoint; it is rescheduled when its own modifications
    /// match one of its subscriptions.
    NoFix,
    /// The propagator is entailed and will never prune again. The store removes its subscriptions
    /// and disposes of it.
    Subsumed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Inconsistency {
    /// A domain update left a domain without values.
    EmptyDomain,
    /// The propagator detected that no solution is possible without emptying a domain.
    Conflict,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

/// What an advisor reports after seeing a domain change through
/// [`crate::propagation::Propagator::advise`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdviseStatus {
    /// The propagator does not need to run because of this change.
    Fix,
    /// The propagator needs to run.
    NoFix,
    /// The advisor is no longer needed and is removed; the propagator does not need to run.
    Dispose,
    /// The advisor is removed and the propagator needs to run.
    DisposeNoFix,
}

impl AdviseStatus {
    pub(crate) fn schedules_propagator(self) -> bool {
        matches!(self, AdviseStatus::NoFix | AdviseStatus::DisposeNoFix)
    }

    pub(crate) fn disposes_advisor(self) -> bool {
        matches!(self, AdviseStatus::Dispose | AdviseStatus::DisposeNoFix)
    }
}
