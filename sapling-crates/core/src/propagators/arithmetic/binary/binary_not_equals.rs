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

/// The [`PropagatorConstructor`] for the [`BinaryNotEqualsPropagator`].
#[derive(Clone, Debug)]
pub struct BinaryNotEqualsPropagatorArgs<AVar, BVar> {
    pub a: AVar,
    pub b: BVar,
}

impl<AVar, BVar> PropagatorConstructor for BinaryNotEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    type PropagatorImpl = BinaryNotEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryNotEqualsPropagatorArgs { a, b } = self;

        context.register(a.clone(), DomainEvents::ASSIGN, LocalId::from(0));
        context.register(b.clone(), DomainEvents::ASSIGN, LocalId::from(1));

        BinaryNotEqualsPropagator { a, b }
    }
}

/// Propagator for the constraint `a != b`.
///
/// Nothing can be removed until one of the sides is assigned; the value is then removed from the
/// other side and the propagator is subsumed.
#[derive(Clone, Debug)]
pub struct BinaryNotEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar, BVar> Propagator for BinaryNotEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "BinaryNotEq"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::BINARY_LOW
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        let a = &self.a;
        let b = &self.b;

        if let Some(value) = context.fixed_value(a) {
            let _ = context.post(predicate![b != value])?;
            return Ok(PropagatorOutcome::Subsumed);
        }

        if let Some(value) = context.fixed_value(b) {
            let _ = context.post(predicate![a != value])?;
            return Ok(PropagatorOutcome::Subsumed);
        }

        Ok(PropagatorOutcome::Fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;
    use crate::engine::StateStatus;

    #[test]
    fn equal_fixed_sides_fail() {
        let mut state = State::default();
        let x = state.new_bounded_integer(3, 3);
        let y = state.new_bounded_integer(3, 3);

        let _ = state.add_propagator(BinaryNotEqualsPropagatorArgs { a: x, b: y });

        assert_eq!(StateStatus::Failed, state.stabilize());
        assert!(state.is_failed());
    }

    #[test]
    fn the_value_is_removed_once_a_side_is_assigned() {
        let mut state = State::default();
        let x = state.new_bounded_integer(0, 5);
        let y = state.new_bounded_integer(0, 5);

        let handle = state.add_propagator(BinaryNotEqualsPropagatorArgs { a: x, b: y });
        state.assert_stable();
        assert_eq!(6, state.size(y));

        let _ = state.post(predicate!(x == 2));
        state.assert_stable();

        assert!(!state.contains(y, 2));
        assert_eq!(5, state.size(y));
        assert!(!state.is_propagator_alive(handle.propagator_id()));
    }
}
