use crate::basic_types::Random;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::Assignments;
use crate::engine::State;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;

/// The context provided to the [`Brancher`], it allows the retrieval of domain values,
/// degrees and failure counts of variables and access to methods from a [`Random`] generator.
///
/// The store itself cannot be changed through the context.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    state: &'a State,
    random_generator: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub fn new(state: &'a State, rng: &'a mut dyn Random) -> Self {
        SelectionContext {
            state,
            random_generator: rng,
        }
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }

    /// Returns the difference between the upper-bound and the lower-bound of the provided
    /// [`IntegerVariable`]. Note that this is different from the number of values which are in the
    /// domain of `var` since this calculation does not take into account holes in the domain.
    pub fn get_size_of_domain<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.upper_bound(var.clone()) - self.lower_bound(var)
    }

    /// The number of values in the domain of `var`.
    pub fn size<Var: IntegerVariable>(&self, var: Var) -> usize {
        self.state.size(var)
    }

    /// Returns the lower bound of the provided [`IntegerVariable`]
    pub fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.lower_bound(var)
    }

    /// Returns the upper bound of the provided [`IntegerVariable`]
    pub fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.upper_bound(var)
    }

    /// Determines whether the provided value is in the domain of the provided [`IntegerVariable`]
    pub fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        self.state.contains(var, value)
    }

    /// Determines whether the provided [`IntegerVariable`] has a unit domain (i.e. a domain of size
    /// 1)
    pub fn is_integer_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        self.state.is_fixed(var)
    }

    /// The values in the domain of `var`, in increasing order.
    pub fn iterate_domain<'b, Var: IntegerVariable>(
        &'b self,
        var: &'b Var,
    ) -> impl Iterator<Item = i32> + 'b {
        let assignments: &'b Assignments = self.state.assignments();
        var.iterate_domain(assignments)
    }

    /// The number of watchers on the domain of `var`, see [`State::degree`].
    pub fn degree<Var: IntegerVariable>(&self, var: Var) -> usize {
        self.state.degree(var)
    }

    /// See [`State::accumulated_failure_count`].
    pub fn accumulated_failure_count<Var: IntegerVariable>(&self, var: Var) -> u64 {
        self.state.accumulated_failure_count(var)
    }

    /// Returns all the domains of the store.
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.state.domains()
    }

    #[cfg(test)]
    /// Creates a store with the given bounded domains for testing selectors.
    pub(crate) fn create_for_testing(domains: Vec<(i32, i32)>) -> State {
        let mut state = State::default();
        for (lower_bound, upper_bound) in domains {
            let _ = state.new_bounded_integer(lower_bound, upper_bound);
        }
        state
    }
}
