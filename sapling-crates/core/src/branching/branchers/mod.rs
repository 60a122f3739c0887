//! Provides several implementations of [`Brancher`]s.

pub mod dynamic_brancher;
pub mod independent_variable_value_brancher;
#[cfg(doc)]
use super::Brancher;
