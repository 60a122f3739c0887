//! Tie-breakers decide which variable a [`crate::branching::variable_selection::VariableSelector`]
//! returns when several variables have the best value.
mod in_order_tie_breaker;
mod tie_breaker;

pub use in_order_tie_breaker::InOrderTieBreaker;
pub use tie_breaker::*;
