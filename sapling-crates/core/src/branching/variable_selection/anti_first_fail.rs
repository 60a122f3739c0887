use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the unfixed variable with the largest domain.
pub struct AntiFirstFail<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for AntiFirstFail<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AntiFirstFail").finish()
    }
}

impl<Var: Clone> AntiFirstFail<Var, InOrderTieBreaker<Var, usize>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The AntiFirstFail variable selector was not provided with any variables");
        }
        Self {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Maximum),
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for AntiFirstFail<Var, TieBreaking>
where
    Var: IntegerVariable + Copy,
    TieBreaking: TieBreaker<Var, usize>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(**variable))
            .for_each(|variable| {
                self.tie_breaker.consider(*variable, context.size(*variable));
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;

    #[test]
    fn the_largest_domain_is_selected() {
        let state = SelectionContext::create_for_testing(vec![(0, 10), (5, 20), (3, 3)]);
        let mut test_rng = TestRandom::default();
        let integer_variables = state.domains().collect::<Vec<_>>();
        let mut strategy = AntiFirstFail::new(&integer_variables);

        let mut context = SelectionContext::new(&state, &mut test_rng);
        assert_eq!(
            Some(integer_variables[1]),
            strategy.select_variable(&mut context)
        );
    }
}
