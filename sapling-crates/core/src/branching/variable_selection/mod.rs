//! Provides the [`VariableSelector`] trait which is required for variable selectors to implement;
//! the main method in this trait is [`VariableSelector::select_variable`].
//!
//! Contains variable selection strategies such as [`FirstFail`] and [`MaxAccumulatedFailure`].
mod anti_first_fail;
mod first_fail;
mod input_order;
mod max_accumulated_failure;
mod most_constrained;
mod variable_selector;

pub use anti_first_fail::AntiFirstFail;
pub use first_fail::FirstFail;
pub use input_order::InputOrder;
pub use max_accumulated_failure::FailureWeight;
pub use max_accumulated_failure::MaxAccumulatedFailure;
pub use most_constrained::MostConstrained;
pub use most_constrained::MostConstrainedValue;
pub use variable_selector::VariableSelector;
