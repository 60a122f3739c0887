use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::predicates::Predicate;
use crate::sapling_assert_advanced;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and removes the upper-half from the domain.
///
/// Note that this strategy will not necessarily result in an equal split if there are holes in the
/// domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainSplit;

impl<Var: IntegerVariable + Copy> ValueSelector<Var> for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        InDomainSplit::get_predicate_excluding_upper_half(context, decision_variable)
    }
}

impl InDomainSplit {
    pub fn get_predicate_excluding_upper_half<Var: IntegerVariable + Copy>(
        context: &SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        // The domain has at least 2 values, otherwise the variable would be fixed and not
        // selected.
        let bound =
            context.lower_bound(decision_variable) + context.get_size_of_domain(decision_variable) / 2;
        sapling_assert_advanced!(
            bound >= context.lower_bound(decision_variable)
                && bound < context.upper_bound(decision_variable),
            "It should hold that {} <= {bound} < {}",
            context.lower_bound(decision_variable),
            context.upper_bound(decision_variable)
        );
        predicate!(decision_variable <= bound)
    }
}
