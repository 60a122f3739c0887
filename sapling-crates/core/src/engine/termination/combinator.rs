use super::TerminationCondition;
use crate::search::SearchStatistics;

/// Stops the search as soon as either of two [`TerminationCondition`]s does.
///
/// The engines use it to join the limits of the [`crate::search::SearchOptions`] with the
/// condition passed to [`crate::search::DepthFirstSearch::with_termination`], and the options
/// nest it to join their own limits.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> Combinator<First, Second> {
    pub fn new(first: First, second: Second) -> Self {
        Combinator { first, second }
    }
}

impl<First, Second> TerminationCondition for Combinator<First, Second>
where
    First: TerminationCondition,
    Second: TerminationCondition,
{
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        // Not short-circuited: a condition may count the calls it receives.
        let first = self.first.should_stop(statistics);
        let second = self.second.should_stop(statistics);
        first || second
    }
}
