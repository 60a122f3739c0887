use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::predicates::Predicate;
use crate::variables::IntegerVariable;

/// [`ValueSelector`] which chooses to assign the upper bound of the domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMax;

impl<Var: IntegerVariable + Copy> ValueSelector<Var> for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        predicate!(decision_variable == context.upper_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::variables::TransformableVariable;

    #[test]
    fn the_upper_bound_of_a_view_is_assigned() {
        let state = SelectionContext::create_for_testing(vec![(3, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&state, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();
        let negated = domain_ids[0].scaled(-1);

        let selected_predicate = InDomainMax.select_value(&mut context, negated);

        assert_eq!(predicate!(domain_ids[0] == 3), selected_predicate);
    }
}
