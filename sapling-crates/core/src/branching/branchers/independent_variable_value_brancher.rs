//! A [`Brancher`] which simply uses a single [`VariableSelector`] and a single
//! [`ValueSelector`].

use std::marker::PhantomData;

use crate::basic_types::Solution;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::BrancherEvent;
use crate::branching::Choice;
use crate::branching::SelectionContext;

/// An implementation of a [`Brancher`] which simply uses a single
/// [`VariableSelector`] and a single [`ValueSelector`] independently of one another.
///
/// The predicate selected by the [`ValueSelector`] is the left alternative of a binary
/// [`Choice`], its negation the right one.
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    /// The [`VariableSelector`] of the [`Brancher`], determines which (unfixed) variable to branch
    /// next on.
    pub(crate) variable_selector: VariableSelect,
    /// The [`ValueSelector`] of the [`Brancher`] determines which value in the domain to branch
    /// next on given a variable.
    pub(crate) value_selector: ValueSelect,
    /// [`PhantomData`] to ensure that the variable type is bound to the
    /// [`IndependentVariableValueBrancher`]
    pub(crate) variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(var_selector: VariableSelect, val_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector: var_selector,
            value_selector: val_selector,
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    /// First we select a variable
    ///  - If all variables under consideration are fixed (i.e. `select_variable` return None) then
    ///    we simply return None
    ///  - Otherwise we select a value and return the choice between it and its negation
    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice> {
        self.variable_selector
            .select_variable(context)
            .map(|selected_variable| {
                Choice::binary(self.value_selector.select_value(context, selected_variable))
            })
    }

    fn on_failure(&mut self) {
        self.variable_selector.on_failure()
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.variable_selector.on_solution(solution);
        self.value_selector.on_solution(solution);
    }

    fn subscribe_to_events(&self) -> Vec<BrancherEvent> {
        let mut events = self.variable_selector.subscribe_to_events();
        for event in self.value_selector.subscribe_to_events() {
            if !events.contains(&event) {
                events.push(event);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::FirstFail;
    use crate::predicate;

    #[test]
    fn the_smallest_domain_is_split_on_its_minimum() {
        let state = SelectionContext::create_for_testing(vec![(0, 10), (5, 7)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&state, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();

        let mut brancher =
            IndependentVariableValueBrancher::new(FirstFail::new(&domain_ids), InDomainMin);

        let choice = brancher
            .next_choice(&mut context)
            .expect("there are unfixed variables");

        assert_eq!(2, choice.num_alternatives());
        assert_eq!(predicate!(domain_ids[1] == 5), choice.alternative(0));
        assert_eq!(predicate!(domain_ids[1] != 5), choice.alternative(1));
    }

    #[test]
    fn no_choice_when_all_variables_are_fixed() {
        let state = SelectionContext::create_for_testing(vec![(3, 3)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&state, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();

        let mut brancher =
            IndependentVariableValueBrancher::new(FirstFail::new(&domain_ids), InDomainMin);

        assert!(brancher.next_choice(&mut context).is_none());
    }
}
