use enum_map::Enum;

#[cfg(doc)]
use crate::basic_types::Random;
use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching;
#[cfg(doc)]
use crate::branching::branchers::dynamic_brancher::DynamicBrancher;
use crate::branching::Choice;
use crate::branching::SelectionContext;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::statistics::StatisticLogger;

/// A trait for definining a branching strategy (oftentimes utilising a
/// [`crate::branching::variable_selection::VariableSelector`] and a
/// [`crate::branching::value_selection::ValueSelector`]).
///
/// In general, implementations of this trait define how the search explores the tree: every
/// alternative of a returned [`Choice`] should shrink the domain of at least one variable. See
/// [`branching`] for example usages.
///
/// The same sequence of calls on structurally equal stores must produce the same choices;
/// otherwise a node recomputed by the search engine could differ from the node that was branched
/// on.
pub trait Brancher {
    /// Logs statistics of the brancher using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}

    /// Returns the [`Choice`] to branch on, or [`None`] if all variables under consideration are
    /// fixed.
    ///
    /// Note that this method **cannot** change the store; the [`SelectionContext`] is only
    /// mutable to account for the usage of random generators (e.g. see [`Random`]).
    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice>;

    /// Called when a node of the search tree failed.
    ///
    /// To receive information about this event, use [`BrancherEvent::Failure`] in
    /// [`Self::subscribe_to_events`]
    fn on_failure(&mut self) {}

    /// Called when a solution is found; for optimisation this is every improving solution.
    ///
    /// To receive information about this event, use [`BrancherEvent::Solution`] in
    /// [`Self::subscribe_to_events`]
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Indicates which [`BrancherEvent`] are relevant for this particular [`Brancher`].
    ///
    /// This can be used by [`DynamicBrancher`] to determine upon which events which brancher
    /// should be called.
    fn subscribe_to_events(&self) -> Vec<BrancherEvent>;
}

impl<B: Brancher + ?Sized> Brancher for Box<B> {
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        (**self).log_statistics(statistic_logger)
    }

    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice> {
        (**self).next_choice(context)
    }

    fn on_failure(&mut self) {
        (**self).on_failure()
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }

    fn subscribe_to_events(&self) -> Vec<BrancherEvent> {
        (**self).subscribe_to_events()
    }
}

/// The events which the search engines report to a [`Brancher`].
#[derive(Debug, Clone, Copy, Enum, Hash, PartialEq, Eq)]
pub enum BrancherEvent {
    /// Event for when a node failed
    Failure,
    /// Event for when a solution has been found
    Solution,
}
