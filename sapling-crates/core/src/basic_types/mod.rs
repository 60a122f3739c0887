mod constraint_operation_error;
mod propagation_status_cp;
mod random;
mod solution;
pub(crate) mod time;

pub use constraint_operation_error::ConstraintOperationError;
pub use propagation_status_cp::*;
pub use random::Random;
pub use solution::Solution;

#[cfg(test)]
pub(crate) mod tests {
    pub(crate) use super::random::tests::TestRandom;
}
