use downcast_rs::impl_downcast;
use downcast_rs::Downcast;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::AdviseContext;
use super::CopyContext;
use super::LocalId;
use super::PropagationContext;
use super::PropagatorCost;
use crate::basic_types::AdviseStatus;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::basic_types::PropagatorOutcome;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::notifications::OpaqueDelta;
#[cfg(doc)]
use crate::propagation::PropagatorConstructorContext;
use crate::statistics::StatisticLogger;

// Needed to go from `Box<dyn Propagator>` back to the concrete propagator behind a
// `PropagatorHandle`.
impl_downcast!(Propagator);

// Cloning a store clones every propagator it holds.
clone_trait_object!(Propagator);

/// A propagator removes values from domains which will never be in any solution, or reports that
/// the current domains cannot lead to a solution.
///
/// The only required functions are [`Propagator::name`] and [`Propagator::propagate`]; all
/// other functions have default implementations.
///
/// See the [`crate::propagation`] documentation for more details.
pub trait Propagator: Downcast + DynClone + Send {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Prunes the domains of the variables of the propagator.
    ///
    /// Domains are changed with [`PropagationContext::post`]; the first empty domain should be
    /// returned as an error with `?`. The returned [`PropagatorOutcome`] tells the store whether
    /// the propagator is at its fixpoint ([`PropagatorOutcome::Fix`]), may need to run again
    /// ([`PropagatorOutcome::NoFix`]) or can be removed ([`PropagatorOutcome::Subsumed`]).
    fn propagate(&mut self, context: PropagationContext) -> PropagationStatusCP;

    /// Called with the change to one of the variables an advisor was registered for through
    /// [`PropagatorConstructorContext::register_advisor`].
    ///
    /// Advisors are meant for cheap incremental bookkeeping. Their status decides whether the
    /// propagator is scheduled and whether the advisor stays. By default every change schedules
    /// the propagator.
    fn advise(
        &mut self,
        _context: AdviseContext,
        _local_id: LocalId,
        _delta: OpaqueDelta,
    ) -> AdviseStatus {
        AdviseStatus::NoFix
    }

    /// The scheduling class of the propagator. It is read again after every call to
    /// [`Propagator::propagate`], so a propagator may become cheaper as its variables get fixed.
    ///
    /// By default the propagator is put in the most expensive class.
    fn cost(&self) -> PropagatorCost {
        PropagatorCost::default()
    }

    /// Called on the copy of the propagator in a cloned store, directly after it was cloned.
    fn after_copy(&mut self, _context: CopyContext) {}

    /// An estimate of the memory used by the propagator, in bytes.
    fn memory_usage(&self) -> usize {
        std::mem::size_of_val(self)
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}
