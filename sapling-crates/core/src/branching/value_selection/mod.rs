//! Provides the [`ValueSelector`] trait which is required for value selectors to implement; the
//! main method in this trait is [`ValueSelector::select_value`].
//!
//! The selected [`crate::predicates::Predicate`] is the first alternative of a binary
//! [`crate::branching::Choice`]; its negation is the second.
mod in_domain_max;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;
mod value_selector;

pub use in_domain_max::InDomainMax;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;
pub use in_domain_split::InDomainSplit;
pub use value_selector::ValueSelector;
