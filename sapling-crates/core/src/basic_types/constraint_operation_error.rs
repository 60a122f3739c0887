use thiserror::Error;

/// Reported when a constraint cannot be added to a [`crate::State`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("Adding the propagator failed because it is infeasible at the current node")]
    InfeasiblePropagator,
    #[error("Adding constraint failed because the state is failed")]
    InfeasibleState,
}
