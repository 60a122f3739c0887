//! Contains the search engines, which explore the search tree defined by a [`State`] and a
//! [`Brancher`].
//!
//! - [`DepthFirstSearch`] enumerates the solutions of a [`State`].
//! - [`BranchAndBound`] looks for a solution which optimises an [`Objective`].
//! - [`Restart`] optimises an [`Objective`] as well, but starts over from the root after every
//!   solution.
//!
//! The engines only ever move forward: a node is either a clone kept on the path or it is
//! recomputed from the closest ancestor clone by committing the recorded choices again. How often
//! clones are kept is determined by the [`SearchOptions`], following the adaptive recomputation
//! scheme of \[1\].
//!
//! # Bibliography
//! \[1\] C. Schulte, ‘Comparing trailing and copying for constraint programming’, in ICLP, 1999,
//! pp. 275–289.

mod branch_and_bound;
mod depth_first_search;
mod options;
mod path;
mod restart;
mod statistics;

pub use branch_and_bound::*;
pub use depth_first_search::*;
pub use options::SearchOptions;
pub use options::SearchOptionsError;
pub use restart::Restart;
pub use statistics::SearchStatistics;

#[cfg(doc)]
use crate::branching::Brancher;
#[cfg(doc)]
use crate::engine::State;
