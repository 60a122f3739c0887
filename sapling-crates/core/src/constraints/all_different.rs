use super::Constraint;
use crate::propagators::AllDifferentArgs;
use crate::variables::IntegerVariable;

/// Creates the [`Constraint`] that enforces that all the given `variables` are distinct.
pub fn all_different<Var: IntegerVariable + 'static>(
    variables: impl Into<Box<[Var]>>,
) -> impl Constraint {
    AllDifferentArgs {
        x: variables.into(),
    }
}
