use crate::basic_types::Solution;
use crate::branching::BrancherEvent;
#[cfg(doc)]
use crate::branching::value_selection::InDomainMin;
use crate::branching::SelectionContext;
use crate::predicates::Predicate;

/// A trait containing the interface for [`ValueSelector`]s, specifying the appropriate hooks into
/// the search and the methods required for selecting a value for a given variable.
pub trait ValueSelector<Var> {
    /// Determines which value in the domain of `decision_variable` to branch next on.
    /// The domain of the `decision_variable` variable should have at least 2 values in it (as it
    /// otherwise should not have been selected as `decision_variable`). Returns a
    /// [`Predicate`] specifying the required change in the domain.
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var)
        -> Predicate;

    /// This method is called when a solution is found; either when iterating over all solutions
    /// or on solutions of increasing quality when optimising.
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Indicates which [`BrancherEvent`] are relevant for this particular [`ValueSelector`].
    ///
    /// Static strategies such as [`InDomainMin`] are not interested in any event.
    fn subscribe_to_events(&self) -> Vec<BrancherEvent> {
        vec![]
    }
}
