use crate::basic_types::AdviseStatus;
use crate::basic_types::Inconsistency;
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
use crate::sapling_assert_moderate;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`LinearLessOrEqualPropagator`].
#[derive(Clone, Debug)]
pub struct LinearLessOrEqualPropagatorArgs<Var> {
    pub x: Box<[Var]>,
    pub c: i32,
}

impl<Var> PropagatorConstructor for LinearLessOrEqualPropagatorArgs<Var>
where
    Var: IntegerVariable + 'static,
{
    type PropagatorImpl = LinearLessOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearLessOrEqualPropagatorArgs { x, c } = self;

        let mut c = c as i64;
        c -= x
            .iter()
            .filter(|var| context.is_fixed(*var))
            .map(|var| context.lower_bound(var) as i64)
            .sum::<i64>();
        let x: Box<[Var]> = x
            .iter()
            .filter(|var| !context.is_fixed(*var))
            .cloned()
            .collect();

        let mut lower_bound_left_hand_side = 0_i64;
        let mut current_bounds = Vec::with_capacity(x.len());

        for (i, x_i) in x.iter().enumerate() {
            context.register_advisor(
                x_i.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(i as u32),
            );
            lower_bound_left_hand_side += context.lower_bound(x_i) as i64;
            current_bounds.push(context.lower_bound(x_i) as i64);
        }

        LinearLessOrEqualPropagator {
            x,
            c,
            lower_bound_left_hand_side,
            current_bounds: current_bounds.into(),
        }
    }
}

/// Propagator for the constraint `\sum x_i <= c`.
///
/// The advisors keep the sum of the lower bounds up to date, so propagating does not need to visit
/// the lower bounds of all terms. An advisor is disposed once its term is assigned.
#[derive(Clone, Debug)]
pub struct LinearLessOrEqualPropagator<Var> {
    x: Box<[Var]>,
    c: i64,

    /// The lower bound of the sum of the left-hand side.
    lower_bound_left_hand_side: i64,
    /// The value at index `i` is the lower bound of `x[i]` seen by its advisor.
    current_bounds: Box<[i64]>,
}

impl<Var: IntegerVariable + 'static> Propagator for LinearLessOrEqualPropagator<Var> {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::LINEAR_LOW
    }

    fn advise(
        &mut self,
        context: AdviseContext,
        local_id: LocalId,
        _delta: OpaqueDelta,
    ) -> AdviseStatus {
        let index = local_id.unpack() as usize;
        let x_i = &self.x[index];

        let old_bound = self.current_bounds[index];
        let new_bound = context.lower_bound(x_i) as i64;
        sapling_assert_moderate!(
            old_bound <= new_bound,
            "lower bounds only increase, old_bound={old_bound}, new_bound={new_bound}"
        );

        self.lower_bound_left_hand_side += new_bound - old_bound;
        self.current_bounds[index] = new_bound;

        if context.is_fixed(x_i) {
            AdviseStatus::DisposeNoFix
        } else if old_bound == new_bound {
            AdviseStatus::Fix
        } else {
            AdviseStatus::NoFix
        }
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        if self.c < self.lower_bound_left_hand_side {
            return Err(Inconsistency::Conflict);
        }

        for (i, x_i) in self.x.iter().enumerate() {
            let bound = self.c - (self.lower_bound_left_hand_side - self.current_bounds[i]);

            if context.upper_bound(x_i) as i64 > bound {
                let bound = bound.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
                let _ = context.post(predicate![x_i <= bound])?;
            }
        }

        let upper_bound_left_hand_side = self
            .x
            .iter()
            .map(|x_i| context.upper_bound(x_i) as i64)
            .sum::<i64>();

        // Pruning an upper bound can raise the lower bound of a term over the same domain, which
        // the advisors report as a new event.
        if upper_bound_left_hand_side <= self.c {
            Ok(PropagatorOutcome::Subsumed)
        } else {
            Ok(PropagatorOutcome::NoFix)
        }
    }

    fn memory_usage(&self) -> usize {
        std::mem::size_of_val(self)
            + self.x.len() * std::mem::size_of::<Var>()
            + self.current_bounds.len() * std::mem::size_of::<i64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;
    use crate::engine::StateStatus;
    use crate::engine::MAX_DOMAIN_VALUE;
    use crate::variables::DomainId;
    use crate::variables::TransformableVariable;

    #[test]
    fn test_bounds_are_propagated() {
        let mut state = State::default();
        let x = state.new_bounded_integer(1, 5);
        let y = state.new_bounded_integer(0, 10);

        let _ = state.add_propagator(LinearLessOrEqualPropagatorArgs {
            x: [x, y].into(),
            c: 7,
        });
        state.assert_stable();

        state.assert_bounds(x, 1, 5);
        state.assert_bounds(y, 0, 6);
    }

    #[test]
    fn raised_lower_bounds_are_seen_by_the_advisors() {
        let mut state = State::default();
        let x = state.new_bounded_integer(1, 5);
        let y = state.new_bounded_integer(0, 10);

        let _ = state.add_propagator(LinearLessOrEqualPropagatorArgs {
            x: [x, y].into(),
            c: 7,
        });
        state.assert_stable();

        let _ = state.post(predicate!(x >= 4));
        state.assert_stable();

        state.assert_bounds(y, 0, 3);
    }

    #[test]
    fn advisors_are_disposed_of_assigned_terms() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 5);
        let y = state.new_bounded_integer(0, 10);
        let z = state.new_bounded_integer(0, 10);

        let handle = state.add_propagator(LinearLessOrEqualPropagatorArgs {
            x: [x, y, z].into(),
            c: 12,
        });
        state.assert_stable();
        assert_eq!(1, state.degree(x));

        let _ = state.post(predicate!(x == 3));
        state.assert_stable();

        assert_eq!(0, state.degree(x));
        assert_eq!(1, state.degree(y));
        assert!(state.audit_subscriptions().is_ok());
        state.assert_bounds(y, 0, 9);
        state.assert_bounds(z, 0, 9);
        assert_eq!(
            3,
            state
                .get_propagator(handle)
                .expect("the upper bounds still sum to more than 12")
                .lower_bound_left_hand_side
        );
    }

    #[test]
    fn entailed_constraints_are_subsumed() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 2);
        let y = state.new_bounded_integer(0, 2);

        let handle = state.add_propagator(LinearLessOrEqualPropagatorArgs {
            x: [x.scaled(1), y.scaled(2)].into(),
            c: 6,
        });
        state.assert_stable();

        assert!(!state.is_propagator_alive(handle.propagator_id()));
    }

    #[test]
    fn exceeding_the_right_hand_side_fails() {
        let mut state = State::default();
        let x = state.new_bounded_integer(3, 5);
        let y = state.new_bounded_integer(3, 10);

        let _ = state.add_propagator(LinearLessOrEqualPropagatorArgs {
            x: [x, y].into(),
            c: 5,
        });

        assert_eq!(StateStatus::Failed, state.stabilize());
    }

    #[test]
    fn sums_beyond_the_integer_range_fail() {
        let mut state = State::default();
        let x = state.new_bounded_integer(MAX_DOMAIN_VALUE - 10, MAX_DOMAIN_VALUE);
        let y = state.new_bounded_integer(MAX_DOMAIN_VALUE - 10, MAX_DOMAIN_VALUE);

        let _ = state.add_propagator(LinearLessOrEqualPropagatorArgs {
            x: [x, y].into(),
            c: i32::MAX,
        });

        assert_eq!(StateStatus::Failed, state.stabilize());
    }

    #[test]
    fn const_inline() {
        let mut state = State::default();
        let x = state.new_bounded_integer(-1, 1);
        let y = state.new_bounded_integer(-1, -1);

        let handle = state.add_propagator(LinearLessOrEqualPropagatorArgs {
            x: [x, y].into(),
            c: 0,
        });
        let propagator: &LinearLessOrEqualPropagator<DomainId> =
            state.get_propagator(handle).expect("just added");

        assert_eq!(propagator.c, 1, "RHS has to be equal to negative constant");
        assert_eq!(
            propagator.x,
            Box::from(vec![x]),
            "LHS has to have exactly one non-constant term"
        );
    }
}
