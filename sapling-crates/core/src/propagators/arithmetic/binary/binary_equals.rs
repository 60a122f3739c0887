use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorOutcome;
use crate::predicate;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorCost;
use crate::propagation::ReadDomains;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`BinaryEqualsPropagator`].
#[derive(Clone, Debug)]
pub struct BinaryEqualsPropagatorArgs<AVar, BVar> {
    pub a: AVar,
    pub b: BVar,
}

impl<AVar, BVar> PropagatorConstructor for BinaryEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    type PropagatorImpl = BinaryEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryEqualsPropagatorArgs { a, b } = self;

        context.register(a.clone(), DomainEvents::BOUNDS, LocalId::from(0));
        context.register(b.clone(), DomainEvents::BOUNDS, LocalId::from(1));

        BinaryEqualsPropagator { a, b }
    }
}

/// Bounds consistent propagator for the constraint `a = b`.
///
/// Both sides can be views, so `x = y + 1` is posted as `BinaryEquals(x, y.offset(1))`. The
/// propagator is subsumed once both sides are assigned.
#[derive(Clone, Debug)]
pub struct BinaryEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar, BVar> Propagator for BinaryEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "BinaryEq"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::BINARY_LOW
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        let a = &self.a;
        let b = &self.b;

        // A bound can land on a hole of the other domain, in which case it moves further and the
        // bounds have to be exchanged again.
        loop {
            let lower_bound = context.lower_bound(a).max(context.lower_bound(b));
            let upper_bound = context.upper_bound(a).min(context.upper_bound(b));

            let changed = [
                context.post(predicate![a >= lower_bound])?,
                context.post(predicate![b >= lower_bound])?,
                context.post(predicate![a <= upper_bound])?,
                context.post(predicate![b <= upper_bound])?,
            ]
            .iter()
            .any(|mod_event| !mod_event.is_none());

            if !changed {
                break;
            }
        }

        if context.is_fixed(a) && context.is_fixed(b) {
            Ok(PropagatorOutcome::Subsumed)
        } else {
            Ok(PropagatorOutcome::Fix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;
    use crate::engine::StateStatus;
    use crate::variables::TransformableVariable;

    #[test]
    fn bounds_are_shifted_through_an_offset() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 9);
        let y = state.new_bounded_integer(0, 9);

        let handle = state.add_propagator(BinaryEqualsPropagatorArgs {
            a: x,
            b: y.offset(1),
        });
        state.assert_stable();

        state.assert_bounds(x, 1, 9);
        state.assert_bounds(y, 0, 8);
        assert!(state.is_propagator_alive(handle.propagator_id()));
    }

    #[test]
    fn assigning_one_side_subsumes() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 9);
        let y = state.new_bounded_integer(0, 9);

        let handle = state.add_propagator(BinaryEqualsPropagatorArgs {
            a: x,
            b: y.offset(1),
        });
        state.assert_stable();

        let _ = state.post(predicate!(y == 5));
        state.assert_stable();

        assert_eq!(Some(6), state.fixed_value(x));
        assert!(!state.is_propagator_alive(handle.propagator_id()));
        assert_eq!(0, state.degree(x));
    }

    #[test]
    fn holes_move_the_bounds_further() {
        let mut state = State::default();
        let x = state.new_sparse_integer(vec![0, 3, 6]);
        let y = state.new_bounded_integer(1, 5);

        let _ = state.add_propagator(BinaryEqualsPropagatorArgs { a: x, b: y });
        state.assert_stable();

        assert_eq!(Some(3), state.fixed_value(x));
        assert_eq!(Some(3), state.fixed_value(y));
    }

    #[test]
    fn disjoint_domains_fail() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 3);
        let y = state.new_bounded_integer(5, 8);

        let handle = state.add_propagator(BinaryEqualsPropagatorArgs {
            a: x,
            b: y.scaled(-1),
        });

        assert_eq!(StateStatus::Failed, state.stabilize());
        assert_eq!(2, state.propagator_failure_count(handle.propagator_id()));
    }
}
