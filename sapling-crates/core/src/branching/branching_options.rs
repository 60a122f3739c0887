use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMax;
use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::InDomainRandom;
use crate::branching::value_selection::InDomainSplit;
use crate::branching::variable_selection::AntiFirstFail;
use crate::branching::variable_selection::FirstFail;
use crate::branching::variable_selection::InputOrder;
use crate::branching::variable_selection::MaxAccumulatedFailure;
use crate::branching::variable_selection::MostConstrained;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::variables::DomainId;

/// Which variable is branched on next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableSelection {
    /// The first unfixed variable in the order in which they were given.
    InputOrder,
    /// The unfixed variable with the smallest domain.
    #[default]
    FirstFail,
    /// The unfixed variable with the largest domain.
    AntiFirstFail,
    /// The unfixed variable with the smallest domain, ties broken by the largest degree.
    MostConstrained,
    /// The unfixed variable with the largest accumulated failure count per domain value.
    MaxAccumulatedFailure,
}

/// How the domain of the selected variable is split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ValueSelection {
    /// `x == min | x != min`
    #[default]
    InDomainMin,
    /// `x == max | x != max`
    InDomainMax,
    /// `x <= mid | x > mid`
    InDomainSplit,
    /// `x == v | x != v` for a random value `v` in the domain.
    InDomainRandom,
}

/// Options which describe a [`Brancher`] over a list of variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchingOptions {
    pub variable_selection: VariableSelection,
    pub value_selection: ValueSelection,
    /// The seed of the random generator created by [`BranchingOptions::create_random`].
    pub seed: u64,
}

impl Default for BranchingOptions {
    fn default() -> Self {
        BranchingOptions {
            variable_selection: VariableSelection::default(),
            value_selection: ValueSelection::default(),
            seed: 42,
        }
    }
}

impl BranchingOptions {
    /// Creates the [`Brancher`] which applies the selected strategies to `variables`.
    pub fn create_brancher(&self, variables: &[DomainId]) -> Box<dyn Brancher> {
        match self.variable_selection {
            VariableSelection::InputOrder => {
                with_value_selection(InputOrder::new(variables), self.value_selection)
            }
            VariableSelection::FirstFail => {
                with_value_selection(FirstFail::new(variables), self.value_selection)
            }
            VariableSelection::AntiFirstFail => {
                with_value_selection(AntiFirstFail::new(variables), self.value_selection)
            }
            VariableSelection::MostConstrained => {
                with_value_selection(MostConstrained::new(variables), self.value_selection)
            }
            VariableSelection::MaxAccumulatedFailure => {
                with_value_selection(MaxAccumulatedFailure::new(variables), self.value_selection)
            }
        }
    }

    /// Creates a random generator seeded with [`BranchingOptions::seed`].
    pub fn create_random(&self) -> SmallRng {
        SmallRng::seed_from_u64(self.seed)
    }
}

fn with_value_selection<VariableSelect>(
    variable_selector: VariableSelect,
    value_selection: ValueSelection,
) -> Box<dyn Brancher>
where
    VariableSelect: VariableSelector<DomainId> + 'static,
{
    match value_selection {
        ValueSelection::InDomainMin => Box::new(IndependentVariableValueBrancher::new(
            variable_selector,
            InDomainMin,
        )),
        ValueSelection::InDomainMax => Box::new(IndependentVariableValueBrancher::new(
            variable_selector,
            InDomainMax,
        )),
        ValueSelection::InDomainSplit => Box::new(IndependentVariableValueBrancher::new(
            variable_selector,
            InDomainSplit,
        )),
        ValueSelection::InDomainRandom => Box::new(IndependentVariableValueBrancher::new(
            variable_selector,
            InDomainRandom,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::SelectionContext;
    use crate::predicate;

    #[test]
    fn anti_first_fail_with_split_halves_the_largest_domain() {
        let state = SelectionContext::create_for_testing(vec![(0, 3), (0, 9)]);
        let domain_ids = state.domains().collect::<Vec<_>>();
        let options = BranchingOptions {
            variable_selection: VariableSelection::AntiFirstFail,
            value_selection: ValueSelection::InDomainSplit,
            ..Default::default()
        };

        let mut brancher = options.create_brancher(&domain_ids);
        let mut random = options.create_random();
        let mut context = SelectionContext::new(&state, &mut random);

        let choice = brancher
            .next_choice(&mut context)
            .expect("both variables are unfixed");
        assert_eq!(predicate!(domain_ids[1] <= 4), choice.alternative(0));
    }
}
