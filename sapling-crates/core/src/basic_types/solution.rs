use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;

/// A snapshot of the domains of a store in which the brancher found nothing left to branch on.
///
/// It owns a copy of the domains, so it stays valid after the search engine discards the store it
/// was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    assignments: Assignments,
}

impl Solution {
    pub(crate) fn new(assignments: &Assignments) -> Solution {
        Solution {
            assignments: assignments.clone(),
        }
    }

    /// Whether every domain of the store is fixed. A brancher which only covers part of the
    /// variables can produce solutions in which the other domains are not fixed.
    pub fn is_complete(&self) -> bool {
        self.assignments
            .domains()
            .all(|domain| self.assignments.is_domain_fixed(domain))
    }

    pub fn num_domains(&self) -> usize {
        self.assignments.num_domains()
    }

    /// The value of `variable` in this solution; for a domain which is not fixed this is the
    /// lower bound.
    pub fn get_integer_value<Var: IntegerVariable>(&self, variable: Var) -> i32 {
        variable.lower_bound(&self.assignments)
    }

    pub(crate) fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// The values of all domains, in the order in which they were declared.
    pub fn values(&self) -> Vec<i32> {
        self.assignments
            .domains()
            .map(|domain| self.assignments.get_lower_bound(domain))
            .collect()
    }
}
