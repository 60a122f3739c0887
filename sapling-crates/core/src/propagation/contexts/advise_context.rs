use crate::engine::Assignments;
use crate::propagation::Domains;
use crate::propagation::HasAssignments;
#[cfg(doc)]
use crate::propagation::Propagator;
use crate::propagation::PropagatorId;

/// Provided to [`Propagator::advise`] when an advisor is handed a domain change.
///
/// Domains can be read through [`crate::propagation::ReadDomains`], but an advisor cannot change
/// them.
#[derive(Clone, Copy, Debug)]
pub struct AdviseContext<'a> {
    pub(crate) assignments: &'a Assignments,
    pub(crate) propagator_id: PropagatorId,
}

impl<'a> AdviseContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments, propagator_id: PropagatorId) -> Self {
        AdviseContext {
            assignments,
            propagator_id,
        }
    }

    pub fn domains(&self) -> Domains<'a> {
        Domains::new(self.assignments)
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }
}

impl HasAssignments for AdviseContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
