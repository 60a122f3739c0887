use log::debug;
use log::trace;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::basic_types::Random;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::State;
use crate::engine::StateStatus;
use crate::search::options::OptionLimits;
use crate::search::path::Path;
use crate::search::SearchOptions;
use crate::search::SearchOptionsError;
use crate::search::SearchStatistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::termination::Combinator;
use crate::termination::Indefinite;
use crate::termination::TerminationCondition;

/// What happened during a call to [`DepthFirstSearch::next_solution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Solution(Solution),
    /// The whole tree has been explored.
    Exhausted,
    /// A limit or a termination condition stopped the search before the tree was explored.
    Stopped,
}

/// Whether a search engine has explored its whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// Every node of the tree has been explored, so every solution has been reported.
    Exhausted,
    /// The search was stopped; solutions may have been missed.
    Incomplete,
    InProgress,
}

/// Explores the search tree of a [`State`] depth-first, from the left alternative to the right.
///
/// Solutions are produced one at a time by [`DepthFirstSearch::next_solution`] (or by iterating
/// over the engine). Nodes are never restored by undoing changes: the engine keeps clones on its
/// path every [`SearchOptions::copying_distance`] levels and recomputes the other nodes by
/// replaying their choices.
///
/// # Example
/// ```
/// use sapling_core::branching::BranchingOptions;
/// use sapling_core::search::DepthFirstSearch;
/// use sapling_core::search::SearchOptions;
/// use sapling_core::State;
///
/// let mut state = State::default();
/// let x = state.new_bounded_integer(0, 2);
/// let y = state.new_bounded_integer(0, 1);
///
/// let brancher = BranchingOptions::default().create_brancher(&[x, y]);
/// let search = DepthFirstSearch::new(state, brancher, SearchOptions::default())
///     .expect("the default options are valid");
///
/// assert_eq!(6, search.count());
/// ```
pub struct DepthFirstSearch<B> {
    brancher: B,
    path: Path,
    /// The node which is explored next, if it is not on the path.
    current: Option<State>,
    /// The number of edges since the last clone on the path.
    distance: u32,
    options: SearchOptions,
    termination: Combinator<OptionLimits, Box<dyn TerminationCondition>>,
    random: Box<dyn Random>,
    statistics: SearchStatistics,
    status: SearchStatus,
}

impl<B> std::fmt::Debug for DepthFirstSearch<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthFirstSearch")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("statistics", &self.statistics)
            .field("status", &self.status)
            .finish()
    }
}

impl<B: Brancher> DepthFirstSearch<B> {
    /// Creates a search over `root`; the limits of `options` start counting now.
    pub fn new(root: State, brancher: B, options: SearchOptions) -> Result<Self, SearchOptionsError> {
        options.validate()?;
        if options.worker_count > 1 {
            warn!(
                "{} workers were requested but the search explores with a single one",
                options.worker_count
            );
        }

        Ok(DepthFirstSearch {
            brancher,
            path: Path::default(),
            current: Some(root),
            distance: 0,
            options,
            termination: Combinator::new(options.limits(), Box::new(Indefinite)),
            random: Box::new(SmallRng::seed_from_u64(42)),
            statistics: SearchStatistics::default(),
            status: SearchStatus::InProgress,
        })
    }

    /// Stop the search when `termination` says so, in addition to the limits of the
    /// [`SearchOptions`].
    pub fn with_termination(mut self, termination: impl TerminationCondition + 'static) -> Self {
        self.termination = Combinator::new(self.options.limits(), Box::new(termination));
        self
    }

    /// Use `random` as the source of randomness of the brancher.
    pub fn with_random(mut self, random: impl Random + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn brancher(&self) -> &B {
        &self.brancher
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger.clone());
        self.brancher
            .log_statistics(statistic_logger.attach_to_prefix("brancher"));
    }

    /// Discard the tree explored so far and continue with the tree below `root`.
    ///
    /// The statistics, the termination condition and the random generator carry over, so limits
    /// apply to all explored trees together.
    pub(crate) fn restart(&mut self, root: State) {
        self.path = Path::default();
        self.current = Some(root);
        self.distance = 0;
        self.status = SearchStatus::InProgress;
        self.statistics.restarts += 1;
    }

    /// Explore the tree until the next solution is found.
    pub fn next_solution(&mut self) -> SearchEvent {
        self.next_solution_with(|_| {})
    }

    /// Explore the tree until the next solution is found, calling `constrain` on every node
    /// before it is stabilized.
    pub(crate) fn next_solution_with(&mut self, mut constrain: impl FnMut(&mut State)) -> SearchEvent {
        match self.status {
            SearchStatus::Exhausted => return SearchEvent::Exhausted,
            SearchStatus::Incomplete => return SearchEvent::Stopped,
            SearchStatus::InProgress => {}
        }

        loop {
            if self.current.is_none() && !self.path.next() {
                debug!("search exhausted after {} nodes", self.statistics.nodes);
                self.status = SearchStatus::Exhausted;
                return SearchEvent::Exhausted;
            }

            self.statistics.record_memory(self.path.memory_usage());
            if self.termination.should_stop(&self.statistics) {
                debug!("search stopped after {} nodes", self.statistics.nodes);
                self.current = None;
                self.status = SearchStatus::Incomplete;
                return SearchEvent::Stopped;
            }

            let mut state = match self.current.take() {
                Some(state) => state,
                None => match self.path.recompute(
                    &mut self.distance,
                    self.options.adaptive_distance,
                    &mut self.statistics,
                ) {
                    Some(state) => state,
                    None => {
                        self.brancher.on_failure();
                        continue;
                    }
                },
            };

            self.statistics.nodes += 1;
            constrain(&mut state);

            let propagations_before = state.propagation_count();
            let status = state.stabilize();
            self.statistics.propagations += state.propagation_count() - propagations_before;

            if status == StateStatus::Failed {
                self.statistics.failures += 1;
                self.brancher.on_failure();
                continue;
            }

            let choice = {
                let mut context = SelectionContext::new(&state, self.random.as_mut());
                self.brancher.next_choice(&mut context)
            };

            match choice {
                None => {
                    self.statistics.solutions += 1;
                    let solution = Solution::new(state.assignments());
                    self.brancher.on_solution(&solution);
                    return SearchEvent::Solution(solution);
                }
                Some(choice) => {
                    trace!("branching on {choice} at depth {}", self.path.depth());

                    let clone = if self.distance == 0 || self.distance >= self.options.copying_distance
                    {
                        self.distance = 1;
                        self.statistics.clones += 1;
                        Some(state.clone_state(true))
                    } else {
                        self.distance += 1;
                        None
                    };

                    let _ = state.post(choice.alternative(0));
                    self.path.push(clone, choice);
                    self.statistics.record_depth(self.path.depth());
                    self.current = Some(state);
                }
            }
        }
    }
}

impl<B: Brancher> Iterator for DepthFirstSearch<B> {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_solution() {
            SearchEvent::Solution(solution) => Some(solution),
            SearchEvent::Exhausted | SearchEvent::Stopped => None,
        }
    }
}
