use crate::basic_types::AdviseStatus;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorOutcome;
use crate::engine::notifications::OpaqueDelta;
use crate::predicate;
use crate::propagation::AdviseContext;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorCost;
use crate::propagation::ReadDomains;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`AllDifferentPropagator`].
#[derive(Clone, Debug)]
pub struct AllDifferentArgs<Var> {
    pub x: Box<[Var]>,
}

impl<Var: IntegerVariable + 'static> PropagatorConstructor for AllDifferentArgs<Var> {
    type PropagatorImpl = AllDifferentPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let mut newly_assigned = Vec::new();

        for (i, x_i) in self.x.iter().enumerate() {
            if context.is_fixed(x_i) {
                newly_assigned.push(i);
            } else {
                context.register_advisor(x_i.clone(), DomainEvents::ASSIGN, LocalId::from(i as u32));
            }
        }

        AllDifferentPropagator {
            assigned: vec![false; self.x.len()].into(),
            x: self.x,
            newly_assigned,
        }
    }
}

/// Value propagator for the constraint that all `x` take pairwise distinct values.
///
/// The advisors collect the variables which became assigned; propagating removes their values from
/// the domains of the other variables.
#[derive(Clone, Debug)]
pub struct AllDifferentPropagator<Var> {
    x: Box<[Var]>,
    /// Whether the value of `x[i]` has been removed from the other variables.
    assigned: Box<[bool]>,
    newly_assigned: Vec<usize>,
}

impl<Var: IntegerVariable + 'static> Propagator for AllDifferentPropagator<Var> {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::LINEAR_LOW
    }

    fn advise(
        &mut self,
        _context: AdviseContext,
        local_id: LocalId,
        _delta: OpaqueDelta,
    ) -> AdviseStatus {
        let index = local_id.unpack() as usize;
        if self.assigned[index] {
            AdviseStatus::Dispose
        } else {
            self.newly_assigned.push(index);
            AdviseStatus::DisposeNoFix
        }
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        while let Some(index) = self.newly_assigned.pop() {
            if self.assigned[index] {
                continue;
            }
            self.assigned[index] = true;
            // A handled variable has nothing left to report.
            context.unregister_advisor(LocalId::from(index as u32));

            let Some(value) = context.fixed_value(&self.x[index]) else {
                continue;
            };

            for (j, x_j) in self.x.iter().enumerate() {
                if j == index {
                    continue;
                }

                let _ = context.post(predicate![x_j != value])?;
                if !self.assigned[j] && context.is_fixed(x_j) {
                    self.newly_assigned.push(j);
                }
            }
        }

        if self.assigned.iter().all(|&assigned| assigned) {
            Ok(PropagatorOutcome::Subsumed)
        } else {
            Ok(PropagatorOutcome::Fix)
        }
    }

    fn memory_usage(&self) -> usize {
        std::mem::size_of_val(self)
            + self.x.len() * (std::mem::size_of::<Var>() + std::mem::size_of::<bool>())
            + self.newly_assigned.capacity() * std::mem::size_of::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;
    use crate::engine::StateStatus;

    #[test]
    fn assigned_values_are_removed_in_a_cascade() {
        let mut state = State::default();
        let x = state.new_bounded_integer(1, 1);
        let y = state.new_bounded_integer(1, 2);
        let z = state.new_bounded_integer(1, 3);

        let handle = state.add_propagator(AllDifferentArgs { x: [x, y, z].into() });
        state.assert_stable();

        assert_eq!(Some(2), state.fixed_value(y));
        assert_eq!(Some(3), state.fixed_value(z));
        assert!(!state.is_propagator_alive(handle.propagator_id()));
    }

    #[test]
    fn variables_fixed_by_the_propagator_lose_their_advisor() {
        let mut state = State::default();
        let x = state.new_bounded_integer(1, 1);
        let y = state.new_bounded_integer(1, 2);
        let z = state.new_bounded_integer(1, 5);

        let handle = state.add_propagator(AllDifferentArgs { x: [x, y, z].into() });
        state.assert_stable();

        state.assert_bounds(z, 3, 5);
        assert!(state.is_propagator_alive(handle.propagator_id()));
        assert_eq!(0, state.degree(y));
        assert_eq!(1, state.degree(z));
        assert!(state.audit_subscriptions().is_ok());
    }

    #[test]
    fn values_are_removed_after_a_branching_decision() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 3);
        let y = state.new_bounded_integer(0, 3);
        let z = state.new_bounded_integer(0, 3);

        let handle = state.add_propagator(AllDifferentArgs { x: [x, y, z].into() });
        state.assert_stable();

        let _ = state.post(predicate!(y == 2));
        state.assert_stable();

        assert!(!state.contains(x, 2));
        assert!(!state.contains(z, 2));
        assert!(state.is_propagator_alive(handle.propagator_id()));
        assert_eq!(0, state.degree(y));
    }

    #[test]
    fn too_few_values_fail() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 1);
        let y = state.new_bounded_integer(0, 1);
        let z = state.new_bounded_integer(0, 1);

        let _ = state.add_propagator(AllDifferentArgs { x: [x, y, z].into() });
        state.assert_stable();

        let _ = state.post(predicate!(x == 0));

        assert_eq!(StateStatus::Failed, state.stabilize());
    }
}
