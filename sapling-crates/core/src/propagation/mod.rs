//! Contains the main building blocks for propagators.
//!
//! # Background
//!
//! A propagator takes as input a set of variables (<code>x<sub>i</sub> ∈ X</code>) and for each
//! variable a corresponding domain (<code>D<sub>i</sub> ∈ D</code>); it can then be seen as a
//! function which maps `D ↦ D'` such that <code>D'<sub>i</sub> ⊆ D<sub>i</sub></code> for all
//! variables (i.e. the domain of a variable either remains the same after applying the propagator
//! or it becomes a subset of the domain before applying the propagator).
//!
//! A propagator is said to be at fix-point if applying it again does not change any domain. The
//! store runs propagators until all of them are at fix-point, or until one of them reports that
//! no solution exists under the current domains.
//!
//! # Practical
//!
//! Each concrete propagator implements [`Propagator`]. The main function of that trait is
//! [`Propagator::propagate`], which performs the domain reduction and reports whether the
//! propagator is at its fix-point ([`PropagatorOutcome::Fix`]), may not be
//! ([`PropagatorOutcome::NoFix`]), or is entailed ([`PropagatorOutcome::Subsumed`]).
//!
//! A propagator is created by a [`PropagatorConstructor`], which subscribes it to domain events
//! through the [`PropagatorConstructorContext`]. A subscription either schedules the propagator
//! ([`PropagatorConstructorContext::register`]) or hands the change to an advisor
//! ([`PropagatorConstructorContext::register_advisor`]), which sees the [`Delta`] of the change
//! and decides whether the propagator needs to run.
//!
//! Propagators are scheduled by their [`PropagatorCost`]: all cheap propagators reach their
//! fix-point before an expensive one runs.
//!
//! See the [`crate::propagators`] module for concrete propagator implementations.
//!
//! # Bibliography
//!
//! \[1\] C. Schulte and P. J. Stuckey, ‘Efficient constraint propagation engines’, ACM Transactions
//! on Programming Languages and Systems (TOPLAS), vol. 31, no. 1, pp. 1–43, 2008.
//!
//! \[2\] C. Schulte and G. Tack, ‘Views and iterators for generic constraint implementations’, in
//! International Workshop on Constraint Solving and Constraint Logic Programming, 2005, pp.
//! 118–132.
//!
//! \[3\] M. Z. Lagerkvist and C. Schulte, ‘Advisors for incremental propagation’, in Principles and
//! Practice of Constraint Programming, 2007, pp. 409–422.

mod constructor;
mod contexts;
mod cost;
mod domains;
mod local_id;
mod propagator;

pub(crate) mod propagator_id;

pub use constructor::*;
pub(crate) use contexts::cancel_subscriptions;
pub use contexts::AdviseContext;
pub use contexts::CopyContext;
pub use contexts::PropagationContext;
pub use cost::*;
pub use domains::*;
pub use local_id::*;
pub use propagator::*;
pub use propagator_id::PropagatorHandle;
pub use propagator_id::PropagatorId;

pub use crate::basic_types::AdviseStatus;
pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagationStatusCP;
pub use crate::basic_types::PropagatorOutcome;
pub use crate::engine::notifications::Delta;
pub use crate::engine::notifications::DomainEvent;
pub use crate::engine::notifications::DomainEvents;
pub use crate::engine::notifications::ModEvent;
pub use crate::engine::notifications::OpaqueDelta;
