//! Contains propagator implementations which are used by the [`crate::constraints`].
//!
//! See [`crate::propagation`] for info on propagators.

mod all_different;
mod negative_table;

pub mod arithmetic;

pub use all_different::*;
pub use arithmetic::*;
pub use negative_table::*;
