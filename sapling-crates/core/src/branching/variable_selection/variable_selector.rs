use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::branching::BrancherEvent;
use crate::branching::SelectionContext;

/// A trait containing the interface for [`VariableSelector`]s, specifying the appropriate hooks
/// into the search and the methods required for selecting variables.
pub trait VariableSelector<Var> {
    /// Determines which variable to select next if there are any left to branch on.
    /// Should only return [`None`] when all variables which have been passed to the
    /// [`VariableSelector`] have been assigned. Otherwise it should return the variable to
    /// branch on next.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var>;

    /// Called when a node failed.
    ///
    /// To receive information about this event, use [`BrancherEvent::Failure`] in
    /// [`Self::subscribe_to_events`]
    fn on_failure(&mut self) {}

    /// Called when a solution is found.
    ///
    /// To receive information about this event, use [`BrancherEvent::Solution`] in
    /// [`Self::subscribe_to_events`]
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Indicates which [`BrancherEvent`] are relevant for this particular [`VariableSelector`].
    ///
    /// This can be used by [`Brancher::subscribe_to_events`] to determine upon which
    /// events which [`VariableSelector`] should be called.
    fn subscribe_to_events(&self) -> Vec<BrancherEvent> {
        vec![]
    }
}
