use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::predicates::Predicate;
use crate::variables::IntegerVariable;

/// [`ValueSelector`] which chooses to assign the lower bound of the domain; the other alternative
/// removes that value.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl<Var: IntegerVariable + Copy> ValueSelector<Var> for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        predicate!(decision_variable == context.lower_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;

    #[test]
    fn the_lower_bound_is_assigned() {
        let state = SelectionContext::create_for_testing(vec![(3, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&state, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();

        let selected_predicate = InDomainMin.select_value(&mut context, domain_ids[0]);

        assert_eq!(predicate!(domain_ids[0] == 3), selected_predicate);
    }
}
