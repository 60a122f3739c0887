//! Defines the constraints which can be added to a [`State`].
//!
//! A constraint is a relation over variables. In the store, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators.
//!
//! # Example
//! ```
//! # use sapling_core::constraints;
//! # use sapling_core::constraints::Constraint;
//! # use sapling_core::State;
//! let mut state = State::default();
//!
//! let a = state.new_bounded_integer(0, 3);
//! let b = state.new_bounded_integer(0, 3);
//!
//! constraints::less_than_or_equals([a, b], 2)
//!     .post(&mut state)
//!     .expect("the constraint can be satisfied");
//!
//! assert_eq!(2, state.upper_bound(a));
//! ```
mod all_different;
mod arithmetic;
mod table;

pub use all_different::*;
pub use arithmetic::*;
pub use table::*;

use crate::basic_types::ConstraintOperationError;
use crate::engine::State;
use crate::engine::StateStatus;
use crate::propagation::PropagatorConstructor;

/// A [`Constraint`] is a relation over variables. It disqualifies certain partial assignments of
/// making it into a solution of the problem.
///
/// For example, the constraint `a = b` over two variables `a` and `b` only allows assignments to
/// `a` and `b` of the same value, and rejects any assignment where `a` and `b` differ.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`State`] and run the propagators to their fixpoint.
    ///
    /// This method returns a [`ConstraintOperationError`] if the state was already failed, or if
    /// the propagators of the [`Constraint`] made it fail.
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError>;
}

impl<ConcretePropagator> Constraint for ConcretePropagator
where
    ConcretePropagator: PropagatorConstructor + 'static,
{
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        if state.is_failed() {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let _ = state.add_propagator(self);
        match state.stabilize() {
            StateStatus::Stable => Ok(()),
            StateStatus::Failed => Err(ConstraintOperationError::InfeasiblePropagator),
        }
    }
}
