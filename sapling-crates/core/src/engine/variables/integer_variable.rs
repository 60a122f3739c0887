use std::fmt::Debug;

use enumset::EnumSet;

use super::DomainId;
use super::TransformableVariable;
use crate::engine::notifications::Delta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::OpaqueDelta;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::Assignments;

/// A trait specifying the required behaviour of an integer variable such as retrieving a
/// lower-bound ([`IntegerVariable::lower_bound`]).
///
/// Both [`DomainId`] and the views over it implement this trait. Writes go through
/// [`PredicateConstructor`]: a view translates a predicate over its own values into a predicate
/// over the underlying domain, so propagators can be written once for every kind of view.
pub trait IntegerVariable:
    Clone + Debug + Send + PredicateConstructor<Value = i32> + TransformableVariable<Self::AffineView> + 'static
{
    type AffineView: IntegerVariable;

    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    /// The number of values in the domain of this variable.
    fn size(&self, assignments: &Assignments) -> usize;

    /// Iterate over the values of the domain.
    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32>;

    /// The domain this variable is defined over.
    ///
    /// Two variables with the same [`DomainId`] share their domain, even when they apply
    /// different transformations to it.
    fn domain_id(&self) -> DomainId;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);

    /// Decode a domain event for this variable.
    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent;

    /// Decode a domain change for this variable.
    fn unpack_delta(&self, delta: OpaqueDelta) -> Delta;
}
