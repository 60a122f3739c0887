use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// The kind of change which happened to the domain of an integer variable.
///
/// A single update can cause multiple events; fixing `x ∈ [0, 9]` to `4` causes
/// [`DomainEvent::LowerBound`], [`DomainEvent::UpperBound`] and [`DomainEvent::Assign`].
#[derive(Debug, EnumSetType, Hash)]
pub enum DomainEvent {
    /// The domain was reduced to a single value.
    Assign,
    /// The lower bound was raised.
    LowerBound,
    /// The upper bound was lowered.
    UpperBound,
    /// A value strictly between the bounds was removed.
    Removal,
}

/// The modification event reported by a single domain update.
///
/// The variants are ordered by strength: an update which assigns a domain also changes its bounds,
/// and a bound change also changes the domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ModEvent {
    /// The update did not change the domain.
    #[default]
    None,
    /// Values between the bounds were removed.
    Domain,
    /// At least one of the bounds changed.
    Bounds,
    /// The domain became a single value.
    Assigned,
}

impl ModEvent {
    /// Classifies the strongest event in `events`.
    pub fn from_events(events: EnumSet<DomainEvent>) -> ModEvent {
        if events.contains(DomainEvent::Assign) {
            ModEvent::Assigned
        } else if events.contains(DomainEvent::LowerBound) || events.contains(DomainEvent::UpperBound)
        {
            ModEvent::Bounds
        } else if events.contains(DomainEvent::Removal) {
            ModEvent::Domain
        } else {
            ModEvent::None
        }
    }

    pub fn is_none(self) -> bool {
        self == ModEvent::None
    }
}

/// The propagation condition of a subscription: the set of [`DomainEvent`]s on which the
/// subscriber is woken up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    int_events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Wake up only when the domain becomes assigned.
    pub const ASSIGN: DomainEvents = DomainEvents::create_with_int_events(enum_set!(DomainEvent::Assign));
    /// Wake up when either of the bounds changes.
    pub const BOUNDS: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        DomainEvent::LowerBound | DomainEvent::UpperBound | DomainEvent::Assign
    ));
    /// Wake up when the lower bound is raised.
    pub const LOWER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(DomainEvent::LowerBound | DomainEvent::Assign));
    /// Wake up when the upper bound is lowered.
    pub const UPPER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(DomainEvent::UpperBound | DomainEvent::Assign));
    /// Wake up on any change to the domain.
    pub const ANY_INT: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound | DomainEvent::Removal
    ));

    pub const fn create_with_int_events(int_events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { int_events }
    }

    pub fn get_int_events(&self) -> EnumSet<DomainEvent> {
        self.int_events
    }
}

/// A [`DomainEvent`] as seen by the underlying domain.
///
/// Obtain the event from the perspective of a variable through
/// [`crate::variables::IntegerVariable::unpack_event`].
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct OpaqueDomainEvent(DomainEvent);

impl From<DomainEvent> for OpaqueDomainEvent {
    fn from(event: DomainEvent) -> Self {
        OpaqueDomainEvent(event)
    }
}

impl OpaqueDomainEvent {
    pub(crate) fn unwrap(self) -> DomainEvent {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strongest_event_determines_the_mod_event() {
        assert_eq!(ModEvent::None, ModEvent::from_events(EnumSet::empty()));
        assert_eq!(ModEvent::Domain, ModEvent::from_events(enum_set!(DomainEvent::Removal)));
        assert_eq!(
            ModEvent::Bounds,
            ModEvent::from_events(enum_set!(DomainEvent::UpperBound))
        );
        assert_eq!(
            ModEvent::Assigned,
            ModEvent::from_events(enum_set!(DomainEvent::LowerBound | DomainEvent::Assign))
        );
        assert!(ModEvent::Assigned > ModEvent::Bounds && ModEvent::Bounds > ModEvent::Domain);
    }
}
