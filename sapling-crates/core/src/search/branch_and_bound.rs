use log::debug;

use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::engine::State;
use crate::predicate;
use crate::predicates::Predicate;
use crate::search::DepthFirstSearch;
use crate::search::SearchEvent;
use crate::search::SearchOptions;
use crate::search::SearchOptionsError;
use crate::search::SearchStatistics;
use crate::search::SearchStatus;
use crate::statistics::StatisticLogger;
use crate::termination::TerminationCondition;
use crate::variables::IntegerVariable;

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}

/// The variable whose value is optimised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Objective<Var> {
    variable: Var,
    direction: OptimisationDirection,
}

impl<Var: IntegerVariable> Objective<Var> {
    pub fn minimise(variable: Var) -> Self {
        Objective {
            variable,
            direction: OptimisationDirection::Minimise,
        }
    }

    pub fn maximise(variable: Var) -> Self {
        Objective {
            variable,
            direction: OptimisationDirection::Maximise,
        }
    }

    pub fn direction(&self) -> OptimisationDirection {
        self.direction
    }

    /// The value of the objective in `solution`.
    ///
    /// If the objective is not fixed in the solution, the bound which can still be improved
    /// upon is used.
    pub fn value(&self, solution: &Solution) -> i32 {
        match self.direction {
            OptimisationDirection::Minimise => self.variable.lower_bound(solution.assignments()),
            OptimisationDirection::Maximise => self.variable.upper_bound(solution.assignments()),
        }
    }

    /// The predicate which holds for solutions that are strictly better than `value`.
    pub(crate) fn improving_predicate(&self, value: i32) -> Predicate {
        let variable = self.variable.clone();
        match self.direction {
            OptimisationDirection::Minimise => predicate!(variable <= value - 1),
            OptimisationDirection::Maximise => predicate!(variable >= value + 1),
        }
    }
}

/// The outcome of [`BranchAndBound::optimise`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimisationResult {
    /// The tree was explored, so no solution is better than this one.
    Optimal(Solution),
    /// The search was stopped; this is the best solution found before that.
    Satisfiable(Solution),
    /// The tree was explored without finding a solution.
    Unsatisfiable,
    /// The search was stopped before a solution was found.
    Unknown,
}

impl OptimisationResult {
    pub(crate) fn new(status: SearchStatus, best: Option<&Solution>) -> Self {
        match (status, best) {
            (SearchStatus::Exhausted, Some(solution)) => {
                OptimisationResult::Optimal(solution.clone())
            }
            (SearchStatus::Exhausted, None) => OptimisationResult::Unsatisfiable,
            (_, Some(solution)) => OptimisationResult::Satisfiable(solution.clone()),
            (_, None) => OptimisationResult::Unknown,
        }
    }
}

/// A [`DepthFirstSearch`] in which every node is constrained to be strictly better than the best
/// solution found so far.
///
/// Every solution reported by [`BranchAndBound::next_solution`] is better than the previous one;
/// once the search is exhausted, the last one is optimal.
///
/// # Example
/// ```
/// use sapling_core::branching::BranchingOptions;
/// use sapling_core::search::BranchAndBound;
/// use sapling_core::search::Objective;
/// use sapling_core::search::OptimisationResult;
/// use sapling_core::search::SearchOptions;
/// use sapling_core::State;
///
/// let mut state = State::default();
/// let x = state.new_bounded_integer(3, 7);
///
/// let brancher = BranchingOptions::default().create_brancher(&[x]);
/// let mut search = BranchAndBound::new(
///     state,
///     brancher,
///     Objective::maximise(x),
///     SearchOptions::default(),
/// )
/// .expect("the default options are valid");
///
/// let OptimisationResult::Optimal(solution) = search.optimise() else {
///     panic!("the search is not limited");
/// };
/// assert_eq!(7, solution.get_integer_value(x));
/// ```
#[derive(Debug)]
pub struct BranchAndBound<B, Var> {
    search: DepthFirstSearch<B>,
    objective: Objective<Var>,
    best: Option<(i32, Solution)>,
}

impl<B: Brancher, Var: IntegerVariable> BranchAndBound<B, Var> {
    pub fn new(
        root: State,
        brancher: B,
        objective: Objective<Var>,
        options: SearchOptions,
    ) -> Result<Self, SearchOptionsError> {
        Ok(BranchAndBound {
            search: DepthFirstSearch::new(root, brancher, options)?,
            objective,
            best: None,
        })
    }

    /// See [`DepthFirstSearch::with_termination`].
    pub fn with_termination(mut self, termination: impl TerminationCondition + 'static) -> Self {
        self.search = self.search.with_termination(termination);
        self
    }

    /// See [`DepthFirstSearch::with_random`].
    pub fn with_random(mut self, random: impl crate::basic_types::Random + 'static) -> Self {
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

    /// Explore the tree until a solution better than the previous one is found.
    pub fn next_solution(&mut self) -> SearchEvent {
        let bound = self
            .best_value()
            .map(|best| self.objective.improving_predicate(best));

        let event = self.search.next_solution_with(|state| {
            if let Some(bound) = bound {
                let _ = state.post(bound);
            }
        });

        if let SearchEvent::Solution(solution) = &event {
            let value = self.objective.value(solution);
            debug!("found a solution with objective value {value}");
            self.best = Some((value, solution.clone()));
        }

        event
    }

    /// Run the search to the end, or until it is stopped.
    pub fn optimise(&mut self) -> OptimisationResult {
        while let SearchEvent::Solution(_) = self.next_solution() {}
        OptimisationResult::new(self.status(), self.best.as_ref().map(|(_, solution)| solution))
    }
}

impl<B: Brancher, Var: IntegerVariable> Iterator for BranchAndBound<B, Var> {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_solution() {
            SearchEvent::Solution(solution) => Some(solution),
            SearchEvent::Exhausted | SearchEvent::Stopped => None,
        }
    }
}
