use crate::predicates::Predicate;
use crate::sapling_assert_simple;

/// The alternatives of a node in the search tree.
///
/// Committing alternative `i` posts the `i`-th predicate. A [`Choice`] does not refer to the store
/// it was computed on, so it can be committed to any clone of that store; the search engines rely
/// on this to recompute nodes instead of storing them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Choice {
    alternatives: Vec<Predicate>,
}

impl Choice {
    /// # Panics
    /// If no alternatives are given.
    pub fn new(alternatives: Vec<Predicate>) -> Self {
        sapling_assert_simple!(
            !alternatives.is_empty(),
            "A choice needs at least one alternative"
        );
        Choice { alternatives }
    }

    /// The choice between `predicate` and its negation, in that order.
    pub fn binary(predicate: Predicate) -> Self {
        Choice::new(vec![predicate, !predicate])
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    pub fn alternative(&self, index: usize) -> Predicate {
        self.alternatives[index]
    }

    pub fn alternatives(&self) -> &[Predicate] {
        &self.alternatives
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, alternative) in self.alternatives.iter().enumerate() {
            if index > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{alternative}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;
    use crate::variables::DomainId;

    #[test]
    fn binary_choice_negates_the_predicate() {
        let x = DomainId::new(0);
        let choice = Choice::binary(predicate!(x <= 4));

        assert_eq!(2, choice.num_alternatives());
        assert_eq!(predicate!(x <= 4), choice.alternative(0));
        assert_eq!(predicate!(x >= 5), choice.alternative(1));
    }
}
