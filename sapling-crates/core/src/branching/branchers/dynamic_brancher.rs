//! A [`Brancher`] which sequentially applies a list of [`Brancher`]s until all of them can not find
//! another choice.
//!
//! Note that this structure should be used if you want to use dynamic [`Brancher`]s but
//! require a [`Sized`] object (e.g. when a function takes as input `impl Brancher`).
use std::fmt::Debug;

use enum_map::EnumMap;

use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::BrancherEvent;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::statistics::StatisticLogger;

/// An implementation of a [`Brancher`] which takes a [`Vec`] of `Box<dyn Brancher>` and
/// sequentially applies [`Brancher::next_choice`] until all of them return [`None`].
///
/// For any other method in [`Brancher`] it will simply pass it along to the provided
/// `Box<dyn Brancher>`s which subscribed to the corresponding [`BrancherEvent`].
///
/// # Note
/// The search engines jump between nodes of the tree, so the brancher does not remember which of
/// its branchers was used last; every call to [`DynamicBrancher::next_choice`] starts from the
/// first brancher. Branchers that are done with their variables return [`None`] cheaply.
pub struct DynamicBrancher {
    branchers: Vec<Box<dyn Brancher>>,

    relevant_event_to_index: EnumMap<BrancherEvent, Vec<usize>>,
    relevant_events: Vec<BrancherEvent>,
}

impl Debug for DynamicBrancher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBrancher").finish()
    }
}

impl DynamicBrancher {
    /// Creates a new [`DynamicBrancher`] with the provided `branchers`. It will attempt to use the
    /// `branchers` in the order in which they were provided.
    pub fn new(branchers: Vec<Box<dyn Brancher>>) -> Self {
        let mut brancher = DynamicBrancher {
            branchers: Vec::with_capacity(branchers.len()),
            relevant_event_to_index: EnumMap::default(),
            relevant_events: Vec::new(),
        };
        for inner in branchers {
            brancher.add_brancher(inner);
        }
        brancher
    }

    pub fn add_brancher(&mut self, brancher: Box<dyn Brancher>) {
        for event in brancher.subscribe_to_events() {
            self.relevant_event_to_index[event].push(self.branchers.len());
            if !self.relevant_events.contains(&event) {
                self.relevant_events.push(event);
            }
        }
        self.branchers.push(brancher);
    }
}

impl Brancher for DynamicBrancher {
    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice> {
        self.branchers
            .iter_mut()
            .find_map(|brancher| brancher.next_choice(context))
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.branchers
            .iter()
            .enumerate()
            .for_each(move |(index, brancher)| {
                brancher.log_statistics(statistic_logger.attach_to_prefix(index))
            })
    }

    fn on_failure(&mut self) {
        self.relevant_event_to_index[BrancherEvent::Failure]
            .iter()
            .for_each(|&brancher_index| self.branchers[brancher_index].on_failure());
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.relevant_event_to_index[BrancherEvent::Solution]
            .iter()
            .for_each(|&brancher_index| self.branchers[brancher_index].on_solution(solution));
    }

    fn subscribe_to_events(&self) -> Vec<BrancherEvent> {
        self.relevant_events.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMax;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::predicate;

    #[test]
    fn later_branchers_are_used_once_earlier_ones_are_exhausted() {
        let mut state = SelectionContext::create_for_testing(vec![(0, 3), (0, 3)]);
        let domain_ids = state.domains().collect::<Vec<_>>();
        let _ = state.post(predicate!(domain_ids[0] == 1));

        let mut brancher = DynamicBrancher::new(vec![
            Box::new(IndependentVariableValueBrancher::new(
                InputOrder::new(&[domain_ids[0]]),
                InDomainMin,
            )),
            Box::new(IndependentVariableValueBrancher::new(
                InputOrder::new(&[domain_ids[1]]),
                InDomainMax,
            )),
        ]);

        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&state, &mut test_rng);
        let choice = brancher
            .next_choice(&mut context)
            .expect("the second variable is unfixed");

        assert_eq!(predicate!(domain_ids[1] == 3), choice.alternative(0));
    }

    #[derive(Default)]
    struct FailureCounter {
        failures: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl Brancher for FailureCounter {
        fn next_choice(&mut self, _context: &mut SelectionContext) -> Option<Choice> {
            None
        }

        fn on_failure(&mut self) {
            self.failures.set(self.failures.get() + 1);
        }

        fn subscribe_to_events(&self) -> Vec<BrancherEvent> {
            vec![BrancherEvent::Failure]
        }
    }

    #[test]
    fn failures_are_only_routed_to_subscribed_branchers() {
        let state = SelectionContext::create_for_testing(vec![(0, 3)]);
        let domain_ids = state.domains().collect::<Vec<_>>();
        let counter = FailureCounter::default();
        let failures = std::rc::Rc::clone(&counter.failures);

        let mut brancher = DynamicBrancher::new(vec![
            Box::new(IndependentVariableValueBrancher::new(
                InputOrder::new(&domain_ids),
                InDomainMin,
            )),
            Box::new(counter),
        ]);
        assert_eq!(vec![BrancherEvent::Failure], brancher.subscribe_to_events());

        brancher.on_failure();
        brancher.on_failure();

        assert_eq!(2, failures.get());
    }
}
