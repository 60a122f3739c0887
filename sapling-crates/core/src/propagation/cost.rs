/// How expensive a single call to a propagator is relative to the other propagators of the same
/// [`Complexity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CostLevel {
    Low = 0,
    Medium = 1,
    High = 2,
}

/// How the work of a single propagator call grows with the number of variables it is posted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Complexity {
    Unary = 0,
    Binary = 1,
    Linear = 2,
    Superlinear = 3,
}

/// The scheduling hint of a propagator.
///
/// The store keeps one agenda per cost class and always runs a propagator from the cheapest
/// non-empty class, so cheap propagators reach their fixpoint before expensive ones run. The cost
/// never affects which domains the fixpoint ends up with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropagatorCost {
    pub complexity: Complexity,
    pub level: CostLevel,
}

impl PropagatorCost {
    /// The number of distinct cost classes.
    pub const NUM_CLASSES: usize = 12;

    pub const UNARY_LOW: PropagatorCost = PropagatorCost::new(Complexity::Unary, CostLevel::Low);
    pub const BINARY_LOW: PropagatorCost = PropagatorCost::new(Complexity::Binary, CostLevel::Low);
    pub const BINARY_HIGH: PropagatorCost =
        PropagatorCost::new(Complexity::Binary, CostLevel::High);
    pub const LINEAR_LOW: PropagatorCost = PropagatorCost::new(Complexity::Linear, CostLevel::Low);
    pub const LINEAR_HIGH: PropagatorCost =
        PropagatorCost::new(Complexity::Linear, CostLevel::High);
    pub const SUPERLINEAR_HIGH: PropagatorCost =
        PropagatorCost::new(Complexity::Superlinear, CostLevel::High);

    pub const fn new(complexity: Complexity, level: CostLevel) -> Self {
        PropagatorCost { complexity, level }
    }

    /// The index of the agenda this cost is scheduled in; lower classes run first.
    pub fn class(self) -> usize {
        self.complexity as usize * 3 + self.level as usize
    }
}

impl Default for PropagatorCost {
    fn default() -> Self {
        PropagatorCost::SUPERLINEAR_HIGH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_ordered_by_complexity_then_level() {
        assert_eq!(0, PropagatorCost::UNARY_LOW.class());
        assert!(PropagatorCost::BINARY_HIGH.class() < PropagatorCost::LINEAR_LOW.class());
        assert_eq!(
            PropagatorCost::NUM_CLASSES - 1,
            PropagatorCost::SUPERLINEAR_HIGH.class()
        );
    }
}
