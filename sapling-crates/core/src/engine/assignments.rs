use enumset::enum_set;
use enumset::EnumSet;

use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::ModEvent;
use crate::engine::notifications::OpaqueDelta;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::variables::StoreId;
use crate::sapling_assert_moderate;

/// The largest value a domain may contain.
pub const MAX_DOMAIN_VALUE: i32 = i32::MAX - 1;
/// The smallest value a domain may contain.
pub const MIN_DOMAIN_VALUE: i32 = -(i32::MAX - 1);

/// Returned by a domain update which would leave a domain without values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// A change to a single domain, recorded so the store can notify the watchers of that domain once
/// the operation which caused it has returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DomainUpdate {
    pub(crate) domain: DomainId,
    pub(crate) events: EnumSet<DomainEvent>,
    pub(crate) removed: Option<(i32, i32)>,
}

impl DomainUpdate {
    pub(crate) fn delta(&self) -> OpaqueDelta {
        OpaqueDelta::new(self.events, self.removed)
    }
}

/// The domains of all variables in a store.
///
/// Domains only shrink; every successful update returns the [`ModEvent`] describing how much the
/// domain changed, and an update which changes nothing returns [`ModEvent::None`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    updates: Vec<DomainUpdate>,
    /// The lineage of the handles created by [`Assignments::grow`].
    store: StoreId,
}

impl Assignments {
    pub(crate) fn new(store: StoreId) -> Self {
        Assignments {
            domains: KeyedVec::default(),
            updates: Vec::new(),
            store,
        }
    }

    pub(crate) fn store(&self) -> StoreId {
        self.store
    }

    /// Whether `domain_id` was handed out by these assignments or one of their clones.
    pub(crate) fn owns(&self, domain_id: DomainId) -> bool {
        domain_id.store() == self.store && domain_id.index() < self.domains.len()
    }

    /// Registers the domain `[lower_bound, upper_bound]`.
    ///
    /// # Panics
    /// If `lower_bound > upper_bound` or if a bound lies outside of
    /// `[MIN_DOMAIN_VALUE, MAX_DOMAIN_VALUE]`.
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        assert!(
            lower_bound <= upper_bound,
            "The lower bound {lower_bound} of a domain exceeds its upper bound {upper_bound}"
        );
        assert!(
            (MIN_DOMAIN_VALUE..=MAX_DOMAIN_VALUE).contains(&lower_bound)
                && (MIN_DOMAIN_VALUE..=MAX_DOMAIN_VALUE).contains(&upper_bound),
            "The domain [{lower_bound}, {upper_bound}] exceeds the representable values"
        );

        self.domains
            .push(IntegerDomain {
                lower_bound,
                upper_bound,
                holes: HashSet::default(),
            })
            .in_store(self.store)
    }

    /// Registers a domain containing exactly `values`.
    ///
    /// # Panics
    /// If `values` is empty or contains a value outside of
    /// `[MIN_DOMAIN_VALUE, MAX_DOMAIN_VALUE]`.
    pub(crate) fn create_new_integer_variable_sparse(&mut self, mut values: Vec<i32>) -> DomainId {
        assert!(
            !values.is_empty(),
            "A sparse domain must contain at least one value"
        );
        values.sort_unstable();
        values.dedup();

        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];
        let domain_id = self.grow(lower_bound, upper_bound);

        let holes = &mut self.domains[domain_id].holes;
        let mut present = values.iter().peekable();
        for value in lower_bound..=upper_bound {
            if present.peek() == Some(&&value) {
                let _ = present.next();
            } else {
                let _ = holes.insert(value);
            }
        }

        domain_id
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn domains(&self) -> impl Iterator<Item = DomainId> {
        let store = self.store;
        self.domains.keys().map(move |domain_id| domain_id.in_store(store))
    }

    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn get_domain_size(&self, domain_id: DomainId) -> usize {
        self.domains[domain_id].size()
    }

    pub fn is_domain_fixed(&self, domain_id: DomainId) -> bool {
        let domain = &self.domains[domain_id];
        domain.lower_bound == domain.upper_bound
    }

    pub fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.is_domain_fixed(domain_id)
            .then(|| self.get_lower_bound(domain_id))
    }

    pub fn get_domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        let domain = &self.domains[domain_id];
        (domain.lower_bound..=domain.upper_bound).filter(move |value| !domain.holes.contains(value))
    }

    /// Whether `predicate` holds for every value in the current domain.
    pub fn does_predicate_hold(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => self.get_lower_bound(domain_id) >= lower_bound,
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => self.get_upper_bound(domain_id) <= upper_bound,
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => !self.is_value_in_domain(domain_id, not_equal_constant),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => self.get_assigned_value(domain_id) == Some(equality_constant),
            Predicate::True => true,
            Predicate::False => false,
        }
    }

    /// Apply the domain operation described by `predicate`.
    ///
    /// # Panics
    /// If the predicate is over a domain of another store.
    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<ModEvent, EmptyDomain> {
        if let Some(domain_id) = predicate.get_domain() {
            assert!(
                self.owns(domain_id),
                "{domain_id} does not belong to the store it is posted in"
            );
        }

        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => self.tighten_lower_bound(domain_id, lower_bound),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => self.tighten_upper_bound(domain_id, upper_bound),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => self.remove_value_from_domain(domain_id, not_equal_constant),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => self.make_assignment(domain_id, equality_constant),
            Predicate::True => Ok(ModEvent::None),
            Predicate::False => Err(EmptyDomain),
        }
    }

    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[domain_id];
        if new_lower_bound <= domain.lower_bound {
            return Ok(ModEvent::None);
        }
        if new_lower_bound > domain.upper_bound {
            return Err(EmptyDomain);
        }

        let old_lower_bound = domain.lower_bound;
        domain.set_lower_bound(new_lower_bound);

        let mut events = enum_set!(DomainEvent::LowerBound);
        if domain.lower_bound == domain.upper_bound {
            events |= DomainEvent::Assign;
        }
        let removed = Some((old_lower_bound, domain.lower_bound - 1));

        Ok(self.record(domain_id, events, removed))
    }

    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[domain_id];
        if new_upper_bound >= domain.upper_bound {
            return Ok(ModEvent::None);
        }
        if new_upper_bound < domain.lower_bound {
            return Err(EmptyDomain);
        }

        let old_upper_bound = domain.upper_bound;
        domain.set_upper_bound(new_upper_bound);

        let mut events = enum_set!(DomainEvent::UpperBound);
        if domain.lower_bound == domain.upper_bound {
            events |= DomainEvent::Assign;
        }
        let removed = Some((domain.upper_bound + 1, old_upper_bound));

        Ok(self.record(domain_id, events, removed))
    }

    pub(crate) fn make_assignment(
        &mut self,
        domain_id: DomainId,
        assigned_value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[domain_id];
        if !domain.contains(assigned_value) {
            return Err(EmptyDomain);
        }
        if domain.lower_bound == domain.upper_bound {
            return Ok(ModEvent::None);
        }

        let (old_lower_bound, old_upper_bound) = (domain.lower_bound, domain.upper_bound);
        domain.lower_bound = assigned_value;
        domain.upper_bound = assigned_value;
        domain.holes.clear();

        let mut events = enum_set!(DomainEvent::Assign);
        if old_lower_bound < assigned_value {
            events |= DomainEvent::LowerBound;
        }
        if assigned_value < old_upper_bound {
            events |= DomainEvent::UpperBound;
        }
        let removed = if old_lower_bound == assigned_value {
            Some((assigned_value + 1, old_upper_bound))
        } else if old_upper_bound == assigned_value {
            Some((old_lower_bound, assigned_value - 1))
        } else {
            None
        };

        Ok(self.record(domain_id, events, removed))
    }

    pub(crate) fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        removed_value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[domain_id];
        if !domain.contains(removed_value) {
            return Ok(ModEvent::None);
        }
        if domain.lower_bound == domain.upper_bound {
            return Err(EmptyDomain);
        }

        if removed_value == domain.lower_bound {
            self.tighten_lower_bound(domain_id, removed_value + 1)
        } else if removed_value == domain.upper_bound {
            self.tighten_upper_bound(domain_id, removed_value - 1)
        } else {
            let _ = domain.holes.insert(removed_value);
            Ok(self.record(
                domain_id,
                enum_set!(DomainEvent::Removal),
                Some((removed_value, removed_value)),
            ))
        }
    }

    fn record(
        &mut self,
        domain: DomainId,
        events: EnumSet<DomainEvent>,
        removed: Option<(i32, i32)>,
    ) -> ModEvent {
        sapling_assert_moderate!(!events.is_empty());
        self.updates.push(DomainUpdate {
            domain,
            events,
            removed,
        });
        ModEvent::from_events(events)
    }

    /// Take the updates recorded since the last call.
    pub(crate) fn take_updates(&mut self) -> Vec<DomainUpdate> {
        std::mem::take(&mut self.updates)
    }

    pub(crate) fn has_pending_updates(&self) -> bool {
        !self.updates.is_empty()
    }

    pub(crate) fn discard_updates(&mut self) {
        self.updates.clear();
    }

    pub(crate) fn memory_usage(&self) -> usize {
        self.domains
            .iter()
            .map(|domain| {
                std::mem::size_of::<IntegerDomain>()
                    + domain.holes.capacity() * std::mem::size_of::<i32>()
            })
            .sum()
    }
}

/// An interval with holes.
///
/// The holes are kept strictly between the bounds, so the bounds are always values of the domain
/// and the size follows from the interval width.
#[derive(Clone, Debug, PartialEq, Eq)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: HashSet<i32>,
}

impl IntegerDomain {
    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound && !self.holes.contains(&value)
    }

    fn size(&self) -> usize {
        (self.upper_bound as i64 - self.lower_bound as i64 + 1) as usize - self.holes.len()
    }

    fn set_lower_bound(&mut self, bound: i32) {
        let mut lower_bound = bound;
        while self.holes.remove(&lower_bound) {
            lower_bound += 1;
        }
        self.lower_bound = lower_bound;
        if !self.holes.is_empty() {
            self.holes.retain(|&hole| hole > lower_bound);
        }
    }

    fn set_upper_bound(&mut self, bound: i32) {
        let mut upper_bound = bound;
        while self.holes.remove(&upper_bound) {
            upper_bound -= 1;
        }
        self.upper_bound = upper_bound;
        if !self.holes.is_empty() {
            self.holes.retain(|&hole| hole < upper_bound);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tightening_to_a_weaker_bound_is_a_no_op() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 9);

        assert_eq!(Ok(ModEvent::Bounds), assignments.tighten_lower_bound(x, 3));
        assert_eq!(Ok(ModEvent::None), assignments.tighten_lower_bound(x, 2));
        assert_eq!(Ok(ModEvent::None), assignments.tighten_upper_bound(x, 9));
        assert_eq!(1, assignments.take_updates().len());
    }

    #[test]
    fn bounds_skip_over_holes() {
        let mut assignments = Assignments::default();
        let x = assignments.create_new_integer_variable_sparse(vec![1, 4, 5, 9]);

        assert_eq!(4, assignments.get_domain_size(x));
        assert_eq!(Ok(ModEvent::Bounds), assignments.tighten_lower_bound(x, 2));
        assert_eq!(4, assignments.get_lower_bound(x));
        assert_eq!(Ok(ModEvent::Bounds), assignments.tighten_upper_bound(x, 8));
        assert_eq!(5, assignments.get_upper_bound(x));
        assert_eq!(vec![4, 5], assignments.get_domain_iterator(x).collect::<Vec<_>>());
    }

    #[test]
    fn removing_an_interior_value_is_a_domain_event() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 4);

        assert_eq!(Ok(ModEvent::Domain), assignments.remove_value_from_domain(x, 2));
        assert_eq!(Ok(ModEvent::None), assignments.remove_value_from_domain(x, 2));
        assert_eq!(4, assignments.get_domain_size(x));

        let updates = assignments.take_updates();
        assert_eq!(Some((2, 2)), updates[0].removed);
    }

    #[test]
    fn removing_the_last_value_empties_the_domain() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 1);

        assert_eq!(Ok(ModEvent::Assigned), assignments.remove_value_from_domain(x, 0));
        assert_eq!(Err(EmptyDomain), assignments.remove_value_from_domain(x, 1));
        assert_eq!(Some(1), assignments.get_assigned_value(x));
    }

    #[test]
    fn assignment_reports_contiguous_removal_only_at_a_bound() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 9);
        let y = assignments.grow(0, 9);

        assert_eq!(Ok(ModEvent::Assigned), assignments.make_assignment(x, 0));
        assert_eq!(Ok(ModEvent::Assigned), assignments.make_assignment(y, 4));

        let updates = assignments.take_updates();
        assert_eq!(Some((1, 9)), updates[0].removed);
        assert_eq!(None, updates[1].removed);
        assert_eq!(Err(EmptyDomain), assignments.make_assignment(y, 5));
    }

    #[test]
    #[should_panic(expected = "exceeds its upper bound")]
    fn inverted_bounds_are_rejected() {
        let mut assignments = Assignments::default();
        let _ = assignments.grow(3, 2);
    }

    #[test]
    #[should_panic(expected = "exceeds the representable values")]
    fn unrepresentable_bounds_are_rejected() {
        let mut assignments = Assignments::default();
        let _ = assignments.grow(0, i32::MAX);
    }

    #[test]
    #[should_panic(expected = "at least one value")]
    fn empty_sparse_domains_are_rejected() {
        let mut assignments = Assignments::default();
        let _ = assignments.create_new_integer_variable_sparse(vec![]);
    }
}
