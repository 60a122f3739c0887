use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;

use crate::sapling_assert_simple;

/// The source of randomness of the branching strategies.
///
/// Strategies only draw from it when they make a new choice, never while a choice is replayed
/// during recomputation; a search with a fixed seed therefore explores the same tree whatever
/// its copying distance.
pub trait Random: Debug {
    /// Draws a value from `[range.start, range.end)` with equal probability.
    ///
    /// # Panics
    /// If `range` is empty.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;
}

impl<R> Random for R
where
    R: Rng + Debug,
{
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        sapling_assert_simple!(!range.is_empty(), "cannot draw from the empty range {range:?}");
        self.gen_range(range)
    }
}
