use std::cmp::Ordering;

use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
#[cfg(doc)]
use crate::branching::variable_selection::FirstFail;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the smallest domain (similar to
/// [`FirstFail`]).
///
/// It breaks ties according to the degree of the variables in the store (giving priority to
/// variable with more attached propagators).
pub struct MostConstrained<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for MostConstrained<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MostConstrained").finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MostConstrainedValue {
    domain_size: usize,
    degree: usize,
}

impl PartialOrd for MostConstrainedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.domain_size.cmp(&other.domain_size) {
            Ordering::Equal => Some(
                // Note that we are comparing `other` to `self` instead of the normal `self` to
                // `other`, this is because the tie-breaking is minimizing while we want to
                // tie-break in the maximizing direction.
                other.degree.cmp(&self.degree),
            ),
            ordering => Some(ordering),
        }
    }
}

impl<Var: Clone> MostConstrained<Var, InOrderTieBreaker<Var, MostConstrainedValue>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The MostConstrained variable selector was not provided with any variables");
        }
        MostConstrained {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Minimum),
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for MostConstrained<Var, TieBreaking>
where
    Var: IntegerVariable + Copy,
    TieBreaking: TieBreaker<Var, MostConstrainedValue>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(**variable))
            .for_each(|variable| {
                self.tie_breaker.consider(
                    *variable,
                    MostConstrainedValue {
                        domain_size: context.size(*variable),
                        degree: context.degree(*variable),
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
    fn smaller_domains_come_before_larger_degrees() {
        let small = MostConstrainedValue {
            domain_size: 2,
            degree: 0,
        };
        let constrained = MostConstrainedValue {
            domain_size: 3,
            degree: 5,
        };

        assert!(small < constrained);
    }

    #[test]
    fn equal_domains_prefer_the_larger_degree() {
        let loose = MostConstrainedValue {
            domain_size: 3,
            degree: 1,
        };
        let constrained = MostConstrainedValue {
            domain_size: 3,
            degree: 5,
        };

        assert!(constrained < loose);
    }
}
