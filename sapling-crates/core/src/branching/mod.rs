//! Contains structures and traits to define how the search engines split a node of the search
//! tree.
//!
//! In general, it provides 3 traits:
//! - The [`Brancher`] which produces the [`Choice`] at a node (selecting an unfixed variable and
//!   splitting its domain in some way, see [Section 4.3.1 of \[1\]](http://www.cse.unsw.com.au/~tw/brwhkr08.pdf)
//!   for more information); the main method of this trait is [`Brancher::next_choice`]. An example
//!   implementation of this trait is the [`IndependentVariableValueBrancher`].
//! - The [`VariableSelector`] which selects the variable to branch on; the main method of this
//!   trait is [`VariableSelector::select_variable`]. An example implementation of this trait is
//!   the [`AntiFirstFail`] strategy.
//! - The [`ValueSelector`] which selects how to split the domain of the selected variable; the
//!   main method of this trait is [`ValueSelector::select_value`].
//!
//! A brancher never changes the store it inspects. The [`Choice`] it returns describes the
//! alternatives without referring to a particular store, so the search engines can commit it to
//! any clone of that store and obtain the same result.
//!
//! \[1\] F. Rossi, P. Van Beek, and T. Walsh, Handbook of constraint programming. Elsevier, 2006.

mod brancher;
pub mod branchers;
mod branching_options;
mod choice;
mod selection_context;
pub mod tie_breaking;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::*;
pub use branching_options::*;
pub use choice::Choice;
pub use selection_context::SelectionContext;

#[cfg(doc)]
use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::AntiFirstFail;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
