use super::predicate::Predicate;
use crate::engine::variables::DomainId;

/// Turns a comparison of a variable with a constant into the [`Predicate`] over its domain.
///
/// [`DomainId`] builds the predicate directly. A view first maps the constant back to the value
/// of the domain underneath it, which may turn the comparison into another kind of predicate or
/// into [`Predicate::True`] or [`Predicate::False`]. Use the [`crate::predicate!`] macro rather
/// than calling these methods.
pub trait PredicateConstructor {
    type Value;

    /// `[self >= bound]`
    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// `[self <= bound]`
    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// `[self == value]`
    fn equality_predicate(&self, value: Self::Value) -> Predicate;

    /// `[self != value]`
    fn disequality_predicate(&self, value: Self::Value) -> Predicate;
}

impl PredicateConstructor for DomainId {
    type Value = i32;

    fn lower_bound_predicate(&self, lower_bound: i32) -> Predicate {
        Predicate::LowerBound {
            domain_id: *self,
            lower_bound,
        }
    }

    fn upper_bound_predicate(&self, upper_bound: i32) -> Predicate {
        Predicate::UpperBound {
            domain_id: *self,
            upper_bound,
        }
    }

    fn equality_predicate(&self, equality_constant: i32) -> Predicate {
        Predicate::Equal {
            domain_id: *self,
            equality_constant,
        }
    }

    fn disequality_predicate(&self, not_equal_constant: i32) -> Predicate {
        Predicate::NotEqual {
            domain_id: *self,
            not_equal_constant,
        }
    }
}

/// Creates the [`Predicate`] for a comparison `variable op constant`, where `op` is one of `>=`,
/// `<=`, `==` and `!=`, and the variable is a [`DomainId`] or a view.
///
/// # Example
/// ```rust
/// # use sapling_core::State;
/// # use sapling_core::predicate;
/// # use sapling_core::predicates::Predicate;
/// # use sapling_core::variables::TransformableVariable;
/// let mut state = State::default();
/// let xs = [state.new_bounded_integer(0, 10), state.new_bounded_integer(0, 10)];
///
/// assert_eq!(
///     Predicate::UpperBound {
///         domain_id: xs[1],
///         upper_bound: 7
///     },
///     predicate!(xs[1] <= 7)
/// );
///
/// // `10 - x >= 4` holds exactly when `x <= 6`.
/// let complement = xs[0].negated().offset(10);
/// assert_eq!(predicate!(xs[0] <= 6), predicate!(complement >= 4));
/// ```
#[macro_export]
macro_rules! predicate {
    ($($var:ident).+$([$index:expr])? >= $bound:expr) => {
        $crate::predicate!(@construct lower_bound_predicate, $($var).+$([$index])?, $bound)
    };
    ($($var:ident).+$([$index:expr])? <= $bound:expr) => {
        $crate::predicate!(@construct upper_bound_predicate, $($var).+$([$index])?, $bound)
    };
    ($($var:ident).+$([$index:expr])? == $value:expr) => {
        $crate::predicate!(@construct equality_predicate, $($var).+$([$index])?, $value)
    };
    ($($var:ident).+$([$index:expr])? != $value:expr) => {
        $crate::predicate!(@construct disequality_predicate, $($var).+$([$index])?, $value)
    };
    (@construct $constructor:ident, $variable:expr, $value:expr) => {{
        #[allow(unused_imports, reason = "the caller may have imported the trait already")]
        use $crate::predicates::PredicateConstructor;
        $variable.$constructor($value)
    }};
}
