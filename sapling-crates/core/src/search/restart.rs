use log::debug;

use crate::basic_types::Random;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::engine::State;
use crate::engine::StateStatus;
use crate::search::DepthFirstSearch;
use crate::search::Objective;
use crate::search::OptimisationResult;
use crate::search::SearchEvent;
use crate::search::SearchOptions;
use crate::search::SearchOptionsError;
use crate::search::SearchStatistics;
use crate::search::SearchStatus;
use crate::statistics::StatisticLogger;
use crate::termination::TerminationCondition;
use crate::variables::IntegerVariable;

/// Optimises an [`Objective`] by exploring the tree from the root again after every solution,
/// with the root constrained to be strictly better than that solution.
///
/// Like [`crate::search::BranchAndBound`] every reported solution improves on the previous one,
/// but the nodes of a restart never see a bound tighter than the one posted at its root. The
/// limits of the [`SearchOptions`] count the work of all restarts together.
///
/// # Example
/// ```
/// use sapling_core::branching::BranchingOptions;
/// use sapling_core::search::Objective;
/// use sapling_core::search::OptimisationResult;
/// use sapling_core::search::Restart;
/// use sapling_core::search::SearchOptions;
/// use sapling_core::State;
///
/// let mut state = State::default();
/// let x = state.new_bounded_integer(3, 7);
///
/// let brancher = BranchingOptions::default().create_brancher(&[x]);
/// let mut search = Restart::new(state, brancher, Objective::maximise(x), SearchOptions::default())
///     .expect("the default options are valid");
///
/// let OptimisationResult::Optimal(solution) = search.optimise() else {
///     panic!("the search is not limited");
/// };
/// assert_eq!(7, solution.get_integer_value(x));
/// assert_eq!(5, search.statistics().restarts);
/// ```
#[derive(Debug)]
pub struct Restart<B, Var> {
    search: DepthFirstSearch<B>,
    /// A copy of the stabilized root, or [`None`] if the root failed.
    root: Option<State>,
    objective: Objective<Var>,
    best: Option<(i32, Solution)>,
    /// Set when a solution was found since the last restart.
    improved: bool,
}

impl<B: Brancher, Var: IntegerVariable> Restart<B, Var> {
    pub fn new(
        mut root: State,
        brancher: B,
        objective: Objective<Var>,
        options: SearchOptions,
    ) -> Result<Self, SearchOptionsError> {
        options.validate()?;

        let root_copy = match root.stabilize() {
            StateStatus::Stable => Some(root.clone_state(true)),
            StateStatus::Failed => None,
        };

        Ok(Restart {
            search: DepthFirstSearch::new(root, brancher, options)?,
            root: root_copy,
            objective,
            best: None,
            improved: false,
        })
    }

    /// See [`DepthFirstSearch::with_termination`].
    pub fn with_termination(mut self, termination: impl TerminationCondition + 'static) -> Self {
        self.search = self.search.with_termination(termination);
        self
    }

    /// See [`DepthFirstSearch::with_random`].
    pub fn with_random(mut self, random: impl Random + 'static) -> Self {
        self.search = self.search.with_random(random);
        self
    }

    pub fn statistics(&self) -> SearchStatistics {
        self.search.statistics()
    }

    pub fn status(&self) -> SearchStatus {
        self.search.status()
    }

    /// The value of the objective in the best solution found so far.
    pub fn best_value(&self) -> Option<i32> {
        self.best.as_ref().map(|(value, _)| *value)
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.search.log_statistics(statistic_logger)
    }

    /// Explore the tree until a solution better than the previous one is found, restarting from
    /// the root if the previous call found one.
    pub fn next_solution(&mut self) -> SearchEvent {
        if self.improved && self.search.status() == SearchStatus::InProgress {
            self.improved = false;

            if let (Some(root), Some((best, _))) = (&self.root, &self.best) {
                debug!("restarting the search to improve on {best}");
                let mut restarted = root.clone_state(true);
                let _ = restarted.post(self.objective.improving_predicate(*best));
                self.search.restart(restarted);
            }
        }

        let event = self.search.next_solution();

        if let SearchEvent::Solution(solution) = &event {
            let value = self.objective.value(solution);
            debug!("found a solution with objective value {value}");
            self.best = Some((value, solution.clone()));
            self.improved = true;
        }

        event
    }

    /// Run the search to the end, or until it is stopped.
    pub fn optimise(&mut self) -> OptimisationResult {
        while let SearchEvent::Solution(_) = self.next_solution() {}
        OptimisationResult::new(self.status(), self.best.as_ref().map(|(_, solution)| solution))
    }
}

impl<B: Brancher, Var: IntegerVariable> Iterator for Restart<B, Var> {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_solution() {
            SearchEvent::Solution(solution) => Some(solution),
            SearchEvent::Exhausted | SearchEvent::Stopped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::BranchingOptions;
    use crate::predicate;

    #[test]
    fn every_solution_restarts_from_the_root() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 3);
        let brancher = BranchingOptions::default().create_brancher(&[x]);

        let mut search = Restart::new(
            state,
            brancher,
            Objective::maximise(x),
            SearchOptions::default(),
        )
        .expect("valid");

        let values = search
            .by_ref()
            .map(|solution| solution.get_integer_value(x))
            .collect::<Vec<_>>();

        assert_eq!(vec![0, 1, 2, 3], values);
        assert_eq!(4, search.statistics().restarts);
        assert_eq!(SearchStatus::Exhausted, search.status());
        assert_eq!(Some(3), search.best_value());
    }

    #[test]
    fn a_failed_root_is_unsatisfiable() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 3);
        let _ = state.post(predicate!(x >= 5));
        let brancher = BranchingOptions::default().create_brancher(&[x]);

        let mut search = Restart::new(
            state,
            brancher,
            Objective::minimise(x),
            SearchOptions::default(),
        )
        .expect("valid");

        assert_eq!(OptimisationResult::Unsatisfiable, search.optimise());
        assert_eq!(0, search.statistics().restarts);
    }

    #[test]
    fn limits_span_all_restarts() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 9);
        let brancher = BranchingOptions::default().create_brancher(&[x]);

        let mut search = Restart::new(
            state,
            brancher,
            Objective::maximise(x),
            SearchOptions {
                node_limit: Some(6),
                ..Default::default()
            },
        )
        .expect("valid");

        let OptimisationResult::Satisfiable(solution) = search.optimise() else {
            panic!("the node limit stops the search before the optimum is proven");
        };

        assert!(solution.get_integer_value(x) < 9);
        assert_eq!(6, search.statistics().nodes);
        assert_eq!(SearchStatus::Incomplete, search.status());
    }
}
