use enumset::EnumSet;

use super::DomainEvent;
#[cfg(doc)]
use crate::variables::IntegerVariable;

/// The description of a single domain update as recorded by the underlying domain. Advisors
/// obtain it through [`IntegerVariable::unpack_delta`], which translates it into the values of
/// the view they registered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpaqueDelta {
    events: EnumSet<DomainEvent>,
    removed: Option<(i32, i32)>,
}

impl OpaqueDelta {
    pub(crate) fn new(events: EnumSet<DomainEvent>, removed: Option<(i32, i32)>) -> OpaqueDelta {
        OpaqueDelta { events, removed }
    }

    pub(crate) fn events(&self) -> EnumSet<DomainEvent> {
        self.events
    }

    pub(crate) fn removed(&self) -> Option<(i32, i32)> {
        self.removed
    }
}

/// A domain change from the perspective of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta {
    /// The events caused by the change.
    pub events: EnumSet<DomainEvent>,
    /// When the removed values form one interval, its smallest and largest value.
    ///
    /// [`None`] means the removed values are not contiguous (for example when a domain is assigned
    /// to a value between its bounds); the current domain should then be inspected instead.
    pub removed: Option<(i32, i32)>,
}

impl Delta {
    pub fn contains(&self, event: DomainEvent) -> bool {
        self.events.contains(event)
    }
}
