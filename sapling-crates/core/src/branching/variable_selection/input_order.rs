use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the first unfixed variable in the order in which the
/// variables were provided.
#[derive(Debug, Clone)]
pub struct InputOrder<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> InputOrder<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for InputOrder<Var> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .find(|variable| !context.is_integer_fixed((*variable).clone()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::predicate;

    #[test]
    fn the_first_unfixed_variable_is_selected() {
        let mut state = SelectionContext::create_for_testing(vec![(0, 10), (5, 20), (0, 3)]);
        let variables = state.domains().collect::<Vec<_>>();
        let mut selector = InputOrder::new(&variables);
        let mut random = TestRandom::default();

        {
            let mut context = SelectionContext::new(&state, &mut random);
            assert_eq!(Some(variables[0]), selector.select_variable(&mut context));
        }

        let _ = state.post(predicate!(variables[0] == 3));
        let mut context = SelectionContext::new(&state, &mut random);
        assert_eq!(Some(variables[1]), selector.select_variable(&mut context));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let state = SelectionContext::create_for_testing(vec![(10, 10), (20, 20)]);
        let variables = state.domains().collect::<Vec<_>>();
        let mut selector = InputOrder::new(&variables);
        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&state, &mut random);

        assert_eq!(None, selector.select_variable(&mut context));
    }
}
