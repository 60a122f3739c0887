use super::Constraint;
use crate::basic_types::ConstraintOperationError;
use crate::engine::State;
use crate::propagators::BinaryEqualsPropagatorArgs;
use crate::propagators::BinaryNotEqualsPropagatorArgs;
use crate::propagators::LinearLessOrEqualPropagatorArgs;
use crate::variables::IntegerVariable;

/// Creates the [`Constraint`] `a = b`.
///
/// Either side can be a view, e.g. `equals(x, y.offset(1))` for `x = y + 1`.
pub fn equals<AVar, BVar>(a: AVar, b: BVar) -> impl Constraint
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    BinaryEqualsPropagatorArgs { a, b }
}

/// Creates the [`Constraint`] `a != b`.
pub fn not_equals<AVar, BVar>(a: AVar, b: BVar) -> impl Constraint
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    BinaryNotEqualsPropagatorArgs { a, b }
}

/// Creates the [`Constraint`] `\sum terms_i <= rhs`.
pub fn less_than_or_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearLessOrEqualPropagatorArgs {
        x: terms.into(),
        c: rhs,
    }
}

/// Creates the [`Constraint`] `\sum terms_i >= rhs`.
pub fn greater_than_or_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    let terms: Box<[Var]> = terms.into();
    less_than_or_equals(
        terms
            .iter()
            .map(|term| term.negated())
            .collect::<Box<[_]>>(),
        -rhs,
    )
}

/// Creates the [`Constraint`] `\sum terms_i = rhs`.
pub fn linear_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearEquals {
        terms: terms.into(),
        rhs,
    }
}

struct LinearEquals<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable + 'static> Constraint for LinearEquals<Var> {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        less_than_or_equals(self.terms.clone(), self.rhs).post(state)?;
        greater_than_or_equals(self.terms, self.rhs).post(state)
    }
}
