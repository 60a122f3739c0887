use std::cmp::Ordering;

use enumset::EnumSet;

use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::notifications::Delta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::OpaqueDelta;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::Assignments;
use crate::math::num_ext::NumExt;

/// Models the constraint `y = ax + b`, by expressing the domain of `y` as a transformation of the
/// domain of `x`.
///
/// The view stores no domain of its own: reads are mapped from the inner variable and predicates
/// are mapped back to the inner variable, rounding towards the inside of the domain.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "Multiplication by zero is not invertable");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    /// Apply the inverse transformation of this view on a value, to go from the value in the domain
    /// of `self` to a value in the domain of `self.inner`.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let inverted_translation = value - self.offset;

        match rounding {
            Rounding::Up => <i32 as NumExt>::div_ceil(inverted_translation, self.scale),
            Rounding::Down => <i32 as NumExt>::div_floor(inverted_translation, self.scale),
        }
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }

    fn is_image(&self, value: i32) -> bool {
        (value - self.offset) % self.scale == 0
    }
}

impl<View> IntegerVariable for AffineView<View>
where
    View: IntegerVariable,
{
    type AffineView = Self;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(assignments))
        } else {
            self.map(self.inner.lower_bound(assignments))
        }
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(assignments))
        } else {
            self.map(self.inner.upper_bound(assignments))
        }
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        if self.is_image(value) {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.contains(assignments, inverted)
        } else {
            false
        }
    }

    fn size(&self, assignments: &Assignments) -> usize {
        self.inner.size(assignments)
    }

    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32> {
        self.inner
            .iterate_domain(assignments)
            .map(|value| self.map(value))
    }

    fn domain_id(&self) -> DomainId {
        self.inner.domain_id()
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, mut events: EnumSet<DomainEvent>) {
        let bound = DomainEvent::LowerBound | DomainEvent::UpperBound;
        let intersection = events.intersection(bound);
        if intersection.len() == 1 && self.scale.is_negative() {
            events = events.symmetric_difference(bound);
        }
        self.inner.watch_all(watchers, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent {
        if self.scale.is_negative() {
            match self.inner.unpack_event(event) {
                DomainEvent::LowerBound => DomainEvent::UpperBound,
                DomainEvent::UpperBound => DomainEvent::LowerBound,
                event => event,
            }
        } else {
            self.inner.unpack_event(event)
        }
    }

    fn unpack_delta(&self, delta: OpaqueDelta) -> Delta {
        let inner = self.inner.unpack_delta(delta);

        let mut events = inner.events;
        if self.scale.is_negative() {
            let bound = DomainEvent::LowerBound | DomainEvent::UpperBound;
            if events.intersection(bound).len() == 1 {
                events = events.symmetric_difference(bound);
            }
        }

        let removed = inner.removed.map(|(min, max)| {
            let (first, second) = (self.map(min), self.map(max));
            (first.min(second), first.max(second))
        });

        Delta { events, removed }
    }
}

impl<View> TransformableVariable<AffineView<View>> for AffineView<View>
where
    View: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl<Var: std::fmt::Debug> std::fmt::Debug for AffineView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset)?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

impl<Var: PredicateConstructor<Value = i32>> PredicateConstructor for AffineView<Var> {
    type Value = Var::Value;

    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate {
        if self.scale < 0 {
            let inverted_bound = self.invert(bound, Rounding::Down);
            self.inner.upper_bound_predicate(inverted_bound)
        } else {
            let inverted_bound = self.invert(bound, Rounding::Up);
            self.inner.lower_bound_predicate(inverted_bound)
        }
    }

    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate {
        if self.scale < 0 {
            let inverted_bound = self.invert(bound, Rounding::Up);
            self.inner.lower_bound_predicate(inverted_bound)
        } else {
            let inverted_bound = self.invert(bound, Rounding::Down);
            self.inner.upper_bound_predicate(inverted_bound)
        }
    }

    fn equality_predicate(&self, bound: Self::Value) -> Predicate {
        if self.is_image(bound) {
            let inverted_bound = self.invert(bound, Rounding::Up);
            self.inner.equality_predicate(inverted_bound)
        } else {
            Predicate::False
        }
    }

    fn disequality_predicate(&self, bound: Self::Value) -> Predicate {
        if self.is_image(bound) {
            let inverted_bound = self.invert(bound, Rounding::Up);
            self.inner.disequality_predicate(inverted_bound)
        } else {
            Predicate::True
        }
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(value: DomainId) -> Self {
        AffineView::new(value, 1, 0)
    }
}

enum Rounding {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use enumset::enum_set;

    use super::*;
    use crate::predicate;

    #[test]
    fn scaling_an_affine_view() {
        let view = AffineView::new(DomainId::new(0), 3, 4);
        let scaled_view = view.scaled(6);
        assert_eq!(18, scaled_view.scale);
        assert_eq!(24, scaled_view.offset);
    }

    #[test]
    fn offsetting_an_affine_view() {
        let view = AffineView::new(DomainId::new(0), 3, 4);
        let offset_view = view.offset(6);
        assert_eq!(3, offset_view.scale);
        assert_eq!(10, offset_view.offset);
    }

    #[test]
    fn negated_view_swaps_the_bounds() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(2, 7);
        let view = x.scaled(-1).offset(10);

        assert_eq!(3, view.lower_bound(&assignments));
        assert_eq!(8, view.upper_bound(&assignments));
        assert!(view.contains(&assignments, 5));
        assert_eq!(6, view.size(&assignments));
        assert_eq!(x, view.domain_id());
    }

    #[test]
    fn bounds_are_rounded_towards_the_inside_of_the_inner_domain() {
        let x = DomainId::new(0);
        let view = x.scaled(2);

        assert_eq!(predicate![x >= 3], predicate![view >= 5]);
        assert_eq!(predicate![x <= 2], predicate![view <= 5]);
        assert_eq!(Predicate::False, predicate![view == 5]);
        assert_eq!(Predicate::True, predicate![view != 5]);
    }

    #[test]
    fn predicates_over_a_negated_view_map_to_the_opposite_bound() {
        let x = DomainId::new(0);
        let view = x.scaled(-1);

        assert_eq!(predicate![x <= -3], predicate![view >= 3]);
        assert_eq!(predicate![x >= 2], predicate![view <= -2]);
    }

    #[test]
    fn deltas_are_translated_into_view_values() {
        let view = DomainId::new(0).scaled(-2).offset(1);
        let delta = OpaqueDelta::new(enum_set!(DomainEvent::LowerBound), Some((0, 2)));

        let unpacked = view.unpack_delta(delta);

        assert_eq!(enum_set!(DomainEvent::UpperBound), unpacked.events);
        assert_eq!(Some((-3, 1)), unpacked.removed);
    }
}
