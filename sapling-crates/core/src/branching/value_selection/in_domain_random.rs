use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::predicates::Predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which assigns to a random value in the domain.
///
/// The values come from the [`crate::basic_types::Random`] of the [`SelectionContext`], so a
/// search with a fixed seed is reproducible.
#[derive(Debug, Clone, Copy)]
pub struct InDomainRandom;

impl<Var: IntegerVariable + Copy> ValueSelector<Var> for InDomainRandom {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        let values_in_domain = context
            .iterate_domain(&decision_variable)
            .collect::<Vec<_>>();
        let random_index = context
            .random()
            .generate_usize_in_range(0..values_in_domain.len());
        predicate!(decision_variable == values_in_domain[random_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;

    #[test]
    fn test_returns_correct_literal() {
        let mut state = SelectionContext::create_for_testing(vec![(0, 10)]);
        let domain_id = state.domains().collect::<Vec<_>>()[0];
        let _ = state.post(predicate!(domain_id != 1));

        let mut test_random = TestRandom { usizes: vec![3] };
        let mut context = SelectionContext::new(&state, &mut test_random);

        let selected_predicate = InDomainRandom.select_value(&mut context, domain_id);

        // The fourth value of {0, 2, 3, 4, ...}.
        assert_eq!(predicate!(domain_id == 4), selected_predicate)
    }
}
