//! A [`TerminationCondition`] is a condition which is polled by the search engines between two
//! nodes. It indicates when the search should stop, even if no definitive conclusions have been
//! made. The most common example would be [`time_budget::TimeBudget`], which gives the search a
//! certain time budget to complete.
//!
//! Once a condition has stopped a search, the engine reports its result as incomplete.

pub(crate) mod combinator;
pub(crate) mod indefinite;
pub(crate) mod limits;
pub(crate) mod time_budget;

pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use limits::FailLimit;
pub use limits::MemoryLimit;
pub use limits::NodeLimit;
pub use time_budget::TimeBudget;

use crate::search::SearchStatistics;

/// The central trait that defines a termination condition. A termination condition determines when
/// the search should give up exploring the tree.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool;
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        match self {
            Some(t) => t.should_stop(statistics),
            None => false,
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for Box<T> {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        (**self).should_stop(statistics)
    }
}
