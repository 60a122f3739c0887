use std::cmp::Ordering;

use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the largest accumulated failure count
/// relative to its domain size.
///
/// The accumulated failure count of a variable is the sum of the failure counts of the
/// propagators watching it (see [`crate::State::accumulated_failure_count`]), which are shared
/// across all clones of a store. Variables whose propagators fail often are branched on first.
pub struct MaxAccumulatedFailure<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for MaxAccumulatedFailure<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxAccumulatedFailure").finish()
    }
}

/// The failure count divided by the domain size, compared without floating point arithmetic.
#[derive(Clone, Copy, Debug)]
pub struct FailureWeight {
    failures: u64,
    domain_size: u64,
}

impl PartialEq for FailureWeight {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for FailureWeight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let lhs = self.failures as u128 * other.domain_size as u128;
        let rhs = other.failures as u128 * self.domain_size as u128;
        Some(lhs.cmp(&rhs))
    }
}

impl<Var: Clone> MaxAccumulatedFailure<Var, InOrderTieBreaker<Var, FailureWeight>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The MaxAccumulatedFailure variable selector was not provided with any variables");
        }
        MaxAccumulatedFailure {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Maximum),
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for MaxAccumulatedFailure<Var, TieBreaking>
where
    Var: IntegerVariable + Copy,
    TieBreaking: TieBreaker<Var, FailureWeight>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(**variable))
            .for_each(|variable| {
                self.tie_breaker.consider(
                    *variable,
                    FailureWeight {
                        failures: context.accumulated_failure_count(*variable),
                        domain_size: context.size(*variable) as u64,
                    },
                );
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_compared_as_ratios() {
        let heavy = FailureWeight {
            failures: 6,
            domain_size: 2,
        };
        let light = FailureWeight {
            failures: 8,
            domain_size: 4,
        };

        assert!(heavy > light);
        assert_eq!(
            Some(Ordering::Equal),
            FailureWeight {
                failures: 2,
                domain_size: 1
            }
            .partial_cmp(&light)
        );
    }
}
