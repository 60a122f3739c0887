use super::Constraint;
use crate::propagators::NegativeTableArgs;
use crate::variables::IntegerVariable;

/// Create the negative table [`Constraint`].
///
/// A negative table is essentially a set of conflicts over the given variables. For example:
/// ```ignore
/// (x1, x2, x3) not in {(1, 3, 5), (3, 1, 4)}
/// ```
/// This prevents any solution where the variables have either the first or the second tuple as
/// values.
///
/// # Panics
/// If a tuple does not have exactly one value for every variable.
pub fn negative_table<Var: IntegerVariable + 'static>(
    xs: impl IntoIterator<Item = Var>,
    table: Vec<Vec<i32>>,
) -> impl Constraint {
    NegativeTableArgs {
        x: xs.into_iter().collect(),
        forbidden: table,
    }
}
