use std::sync::Arc;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorOutcome;
use crate::predicate;
use crate::propagation::CopyContext;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorCost;
use crate::propagation::ReadDomains;
use crate::sapling_assert_simple;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`NegativeTablePropagator`].
#[derive(Clone, Debug)]
pub struct NegativeTableArgs<Var> {
    pub x: Box<[Var]>,
    pub forbidden: Vec<Vec<i32>>,
}

impl<Var: IntegerVariable + 'static> PropagatorConstructor for NegativeTableArgs<Var> {
    type PropagatorImpl = NegativeTablePropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let NegativeTableArgs { x, forbidden } = self;
        sapling_assert_simple!(
            forbidden.iter().all(|tuple| tuple.len() == x.len()),
            "every forbidden tuple should have a value for each variable"
        );

        for (i, x_i) in x.iter().enumerate() {
            context.register(x_i.clone(), DomainEvents::ASSIGN, LocalId::from(i as u32));
        }

        NegativeTablePropagator {
            watching: vec![true; x.len()].into(),
            x,
            forbidden: Arc::new(forbidden),
        }
    }
}

/// Propagator which forbids the variables `x` to take the values of any of the `forbidden`
/// tuples.
///
/// A tuple is only used for pruning once all but one of its variables are assigned to its values.
/// The tuples are never modified, so copies of the store share them unless a copy asks for its own
/// (see [`CopyContext::share`]).
#[derive(Clone, Debug)]
pub struct NegativeTablePropagator<Var> {
    x: Box<[Var]>,
    forbidden: Arc<Vec<Vec<i32>>>,
    /// Whether the subscription of `x[i]` is still registered.
    watching: Box<[bool]>,
}

impl<Var: IntegerVariable + 'static> Propagator for NegativeTablePropagator<Var> {
    fn name(&self) -> &str {
        "NegativeTable"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::LINEAR_HIGH
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        let mut all_excluded = true;

        'tuples: for tuple in self.forbidden.iter() {
            let mut unassigned = None;

            for (x_i, &value) in self.x.iter().zip(tuple) {
                if !context.contains(x_i, value) {
                    continue 'tuples;
                }
                if !context.is_fixed(x_i) {
                    if unassigned.is_some() {
                        all_excluded = false;
                        continue 'tuples;
                    }
                    unassigned = Some((x_i, value));
                }
            }

            match unassigned {
                None => return Err(Inconsistency::Conflict),
                Some((x_i, value)) => {
                    let _ = context.post(predicate![x_i != value])?;
                }
            }
        }

        if all_excluded {
            return Ok(PropagatorOutcome::Subsumed);
        }

        // An assigned variable cannot wake the propagator again.
        for (i, x_i) in self.x.iter().enumerate() {
            if self.watching[i] && context.is_fixed(x_i) {
                context.unregister(LocalId::from(i as u32));
                self.watching[i] = false;
            }
        }

        Ok(PropagatorOutcome::NoFix)
    }

    fn after_copy(&mut self, context: CopyContext) {
        if !context.share() {
            self.forbidden = Arc::new(self.forbidden.as_ref().clone());
        }
    }

    fn memory_usage(&self) -> usize {
        let tuples = self
            .forbidden
            .iter()
            .map(|tuple| tuple.len() * std::mem::size_of::<i32>())
            .sum::<usize>();
        std::mem::size_of_val(self) + self.x.len() * std::mem::size_of::<Var>() + tuples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;
    use crate::engine::StateStatus;
    use crate::propagation::PropagatorHandle;
    use crate::variables::DomainId;

    fn forbid_pattern(
        state: &mut State,
    ) -> (
        Vec<DomainId>,
        PropagatorHandle<NegativeTablePropagator<DomainId>>,
    ) {
        let x = (0..3).map(|_| state.new_boolean()).collect::<Vec<_>>();
        let handle = state.add_propagator(NegativeTableArgs {
            x: x.clone().into(),
            forbidden: vec![vec![1, 0, 1], vec![0, 0, 0]],
        });
        (x, handle)
    }

    #[test]
    fn the_last_value_of_a_tuple_is_removed() {
        let mut state = State::default();
        let (x, _) = forbid_pattern(&mut state);
        state.assert_stable();

        let _ = state.post(predicate!(x[0] == 1));
        let _ = state.post(predicate!(x[1] == 0));
        state.assert_stable();

        assert_eq!(Some(0), state.fixed_value(x[2]));
    }

    #[test]
    fn a_forbidden_assignment_fails() {
        let mut state = State::default();
        let (x, _) = forbid_pattern(&mut state);

        for variable in &x {
            let _ = state.post(predicate!(variable == 0));
        }

        assert_eq!(StateStatus::Failed, state.stabilize());
    }

    #[test]
    fn excluded_tuples_subsume() {
        let mut state = State::default();
        let (x, handle) = forbid_pattern(&mut state);

        let _ = state.post(predicate!(x[1] == 1));
        state.assert_stable();

        assert!(!state.is_propagator_alive(handle.propagator_id()));
    }

    #[test]
    fn assigned_variables_are_no_longer_watched() {
        let mut state = State::default();
        let (x, handle) = forbid_pattern(&mut state);
        assert_eq!(1, state.degree(x[0]));

        let _ = state.post(predicate!(x[0] == 1));
        state.assert_stable();

        assert!(state.is_propagator_alive(handle.propagator_id()));
        assert_eq!(0, state.degree(x[0]));
        assert_eq!(1, state.degree(x[2]));
        assert!(state.audit_subscriptions().is_ok());
    }

    #[test]
    fn copies_share_the_tuples_only_when_asked() {
        let mut state = State::default();
        let (_, handle) = forbid_pattern(&mut state);
        state.assert_stable();

        let original = &state.get_propagator(handle).expect("alive").forbidden;

        let shared = state.clone_state(true);
        assert!(Arc::ptr_eq(
            original,
            &shared.get_propagator(handle).expect("alive").forbidden
        ));

        let separate = state.clone_state(false);
        let copied = &separate.get_propagator(handle).expect("alive").forbidden;
        assert!(!Arc::ptr_eq(original, copied));
        assert_eq!(original, copied);
    }
}
