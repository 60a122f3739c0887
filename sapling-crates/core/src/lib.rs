//! # Sapling
//! The core of the Sapling constraint solver: a constraint store which is driven to a fixpoint by
//! its propagators, and search engines which explore the search tree by copying the store instead
//! of undoing changes to it.
//!
//! # Usage
//! A [`State`] holds the domains of the variables and the propagators posted over them. The
//! [`constraints`] module creates the propagators for common relations. The search engines in
//! [`search`] split the nodes of the tree with a [`branching::Brancher`].
//!
//! ```
//! use sapling_core::branching::BranchingOptions;
//! use sapling_core::constraints;
//! use sapling_core::constraints::Constraint;
//! use sapling_core::search::DepthFirstSearch;
//! use sapling_core::search::SearchOptions;
//! use sapling_core::variables::TransformableVariable;
//! use sapling_core::State;
//!
//! let mut state = State::default();
//! let x = state.new_bounded_integer(0, 9);
//! let y = state.new_bounded_integer(0, 9);
//!
//! // x = y + 1
//! constraints::equals(x, y.offset(1))
//!     .post(&mut state)
//!     .expect("the constraint can be satisfied");
//! assert_eq!(1, state.lower_bound(x));
//! assert_eq!(8, state.upper_bound(y));
//!
//! let brancher = BranchingOptions::default().create_brancher(&[x, y]);
//! let search = DepthFirstSearch::new(state, brancher, SearchOptions::default())
//!     .expect("the default options are valid");
//!
//! assert_eq!(9, search.count());
//! ```
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod sapling_asserts;

pub mod branching;
pub mod constraints;
pub mod propagation;
pub mod propagators;
pub mod search;
pub mod statistics;

pub use convert_case;
pub use rand;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use sapling_core::variables::DomainId;`
// vs.
// `use sapling_core::api::variables::DomainId;`
mod api;

pub use api::*;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Random;
pub use crate::basic_types::Solution;
pub use crate::engine::AgendaOrder;
pub use crate::engine::EmptyDomain;
pub use crate::engine::State;
pub use crate::engine::StateStatistics;
pub use crate::engine::StateStatus;
pub use crate::engine::SubscriptionError;
pub use crate::engine::MAX_DOMAIN_VALUE;
pub use crate::engine::MIN_DOMAIN_VALUE;
