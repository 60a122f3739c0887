use super::Direction;
use super::TieBreaker;

/// A tie-breaker which selects the first variable that it receives with the "best" value according
/// to the provided [`Direction`].
///
/// Since the selectors consider their variables in input order, ties go to the variable that was
/// given first.
#[derive(Debug, Clone)]
pub struct InOrderTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    direction: Direction,
}

impl<Var, Value> InOrderTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        Self {
            selected: None,
            direction,
        }
    }
}

impl<Var: Copy, Value: PartialOrd> TieBreaker<Var, Value> for InOrderTieBreaker<Var, Value> {
    fn consider(&mut self, variable: Var, value: Value) {
        let is_better = match &self.selected {
            None => true,
            Some((_, selected_value)) => match self.direction {
                Direction::Maximum => value > *selected_value,
                Direction::Minimum => value < *selected_value,
            },
        };

        if is_better {
            self.selected = Some((variable, value));
        }
    }

    fn select(&mut self) -> Option<Var> {
        self.selected.take().map(|(variable, _)| variable)
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::InOrderTieBreaker;
    use crate::branching::tie_breaking::Direction;
    use crate::branching::tie_breaking::TieBreaker;
    use crate::variables::DomainId;

    #[test]
    fn ties_go_to_the_first_variable() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);

        breaker.consider(DomainId::new(0), 10);
        breaker.consider(DomainId::new(1), 10);
        breaker.consider(DomainId::new(2), 10);

        assert_eq!(Some(DomainId::new(0)), breaker.select());
    }

    #[test]
    fn maximum_picks_the_largest_value() {
        let mut breaker = InOrderTieBreaker::new(Direction::Maximum);

        breaker.consider(DomainId::new(0), 10);
        breaker.consider(DomainId::new(1), 15);
        breaker.consider(DomainId::new(2), 15);

        assert_eq!(Some(DomainId::new(1)), breaker.select());
        assert_eq!(None, breaker.select());
    }
}
