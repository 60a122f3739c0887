use crate::engine::variables::DomainId;

/// An atomic domain operation over a single [`DomainId`] (`[x >= v]`, `[x <= v]`, `[x == v]` or
/// `[x != v]`), or a constant.
///
/// Predicates carry no reference into a store, which makes them the unit of replay: the
/// alternatives of a [`crate::branching::Choice`] are predicates, and committing an alternative
/// posts it into any structurally equal store.
#[derive(Clone, PartialEq, Eq, Copy, Hash)]
pub enum Predicate {
    LowerBound {
        domain_id: DomainId,
        lower_bound: i32,
    },
    UpperBound {
        domain_id: DomainId,
        upper_bound: i32,
    },
    NotEqual {
        domain_id: DomainId,
        not_equal_constant: i32,
    },
    Equal {
        domain_id: DomainId,
        equality_constant: i32,
    },
    /// Holds in every store; posting it changes nothing.
    True,
    /// Holds in no store; posting it fails the store.
    False,
}

impl Predicate {
    /// Returns the [`DomainId`] the predicate is over, or [`None`] for [`Predicate::True`] and
    /// [`Predicate::False`].
    pub fn get_domain(&self) -> Option<DomainId> {
        match *self {
            Predicate::LowerBound { domain_id, .. }
            | Predicate::UpperBound { domain_id, .. }
            | Predicate::NotEqual { domain_id, .. }
            | Predicate::Equal { domain_id, .. } => Some(domain_id),
            Predicate::True | Predicate::False => None,
        }
    }

    pub fn is_equality_predicate(&self) -> bool {
        matches!(self, Predicate::Equal { .. })
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        match self {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => Predicate::UpperBound {
                domain_id,
                upper_bound: lower_bound - 1,
            },
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => Predicate::LowerBound {
                domain_id,
                lower_bound: upper_bound + 1,
            },
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => Predicate::Equal {
                domain_id,
                equality_constant: not_equal_constant,
            },
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => Predicate::NotEqual {
                domain_id,
                not_equal_constant: equality_constant,
            },
            Predicate::True => Predicate::False,
            Predicate::False => Predicate::True,
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => write!(f, "[{domain_id} >= {lower_bound}]"),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => write!(f, "[{domain_id} <= {upper_bound}]"),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => write!(f, "[{domain_id} != {not_equal_constant}]"),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => write!(f, "[{domain_id} == {equality_constant}]"),
            Predicate::True => write!(f, "[true]"),
            Predicate::False => write!(f, "[false]"),
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn macro_local_identifiers_are_matched() {
        let x = DomainId::new(0);

        assert_eq!(
            Predicate::LowerBound {
                domain_id: x,
                lower_bound: 2,
            },
            predicate![x >= 2]
        );
        assert_eq!(
            Predicate::UpperBound {
                domain_id: x,
                upper_bound: 3,
            },
            predicate![x <= 3]
        );
        assert_eq!(
            Predicate::Equal {
                domain_id: x,
                equality_constant: 5,
            },
            predicate![x == 5]
        );
        assert_eq!(
            Predicate::NotEqual {
                domain_id: x,
                not_equal_constant: 5,
            },
            predicate![x != 5]
        );
    }

    #[test]
    fn negating_a_bound_flips_it_around_the_value() {
        let x = DomainId::new(3);

        assert_eq!(predicate![x <= 4], !predicate![x >= 5]);
        assert_eq!(predicate![x >= 5], !predicate![x <= 4]);
        assert_eq!(predicate![x != 1], !predicate![x == 1]);
        assert_eq!(Predicate::False, !Predicate::True);
    }
}
