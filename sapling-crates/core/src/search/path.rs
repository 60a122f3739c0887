use log::trace;

use crate::branching::Choice;
use crate::engine::State;
use crate::engine::StateStatus;
use crate::sapling_assert_moderate;
use crate::sapling_assert_simple;
use crate::search::SearchStatistics;

/// A node on the [`Path`] which was branched on.
#[derive(Debug)]
struct Edge {
    /// The state of the node before any of its alternatives was committed.
    clone: Option<State>,
    /// The estimated size of `clone` in bytes.
    clone_memory: usize,
    choice: Choice,
    /// The alternative which is currently being explored.
    alternative: usize,
}

impl Edge {
    fn is_rightmost(&self) -> bool {
        self.alternative + 1 >= self.choice.num_alternatives()
    }

    /// Commit the current alternative without propagating.
    fn replay(&self, state: &mut State) {
        let _ = state.post(self.choice.alternative(self.alternative));
    }
}

/// The edges from the root of the search tree to the node which is being explored.
///
/// Only some edges store a clone of their state. A node without one the search recomputes by
/// replaying the choices below the closest clone (see [`Path::recompute`]).
#[derive(Debug, Default)]
pub(crate) struct Path {
    edges: Vec<Edge>,
    memory: usize,
}

impl Path {
    pub(crate) fn depth(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The estimated number of bytes used by the clones on the path.
    pub(crate) fn memory_usage(&self) -> usize {
        self.memory
    }

    /// Add an edge for a node which was branched on with `choice`, the first alternative is the one
    /// being explored.
    pub(crate) fn push(&mut self, clone: Option<State>, choice: Choice) {
        let clone_memory = clone.as_ref().map_or(0, State::memory_usage);
        self.memory += clone_memory;
        self.edges.push(Edge {
            clone,
            clone_memory,
            choice,
            alternative: 0,
        });
    }

    /// Move to the next alternative of the deepest edge which has one left, removing the edges
    /// which are exhausted. Returns `false` if the whole tree has been explored.
    pub(crate) fn next(&mut self) -> bool {
        while let Some(edge) = self.edges.last_mut() {
            if edge.is_rightmost() {
                self.pop();
            } else {
                edge.alternative += 1;
                return true;
            }
        }
        false
    }

    fn pop(&mut self) {
        if let Some(edge) = self.edges.pop() {
            self.memory -= edge.clone_memory;
        }
    }

    fn take_clone(&mut self, index: usize) -> Option<State> {
        let edge = &mut self.edges[index];
        self.memory -= edge.clone_memory;
        edge.clone_memory = 0;
        edge.clone.take()
    }

    fn store_clone(&mut self, index: usize, clone: State) {
        let clone_memory = clone.memory_usage();
        self.memory += clone_memory;

        let edge = &mut self.edges[index];
        sapling_assert_moderate!(edge.clone.is_none());
        edge.clone_memory = clone_memory;
        edge.clone = Some(clone);
    }

    /// The index of the deepest edge which stores a clone.
    fn last_clone(&self) -> usize {
        let last_clone = self.edges.iter().rposition(|edge| edge.clone.is_some());
        sapling_assert_simple!(
            last_clone.is_some(),
            "The root of the path always stores a clone"
        );
        last_clone.unwrap_or_default()
    }

    /// Obtain the state of the node the path leads to; the choices have been committed but the
    /// result has not been stabilized.
    ///
    /// `distance` is set to the number of edges between the returned node and the closest clone
    /// above it. When a clone was created halfway, a failed halfway node ends the exploration of
    /// its subtree and [`None`] is returned.
    pub(crate) fn recompute(
        &mut self,
        distance: &mut u32,
        adaptive_distance: u32,
        statistics: &mut SearchStatistics,
    ) -> Option<State> {
        sapling_assert_simple!(!self.is_empty());
        let num_edges = self.edges.len();
        let top = num_edges - 1;

        // The last alternative does not need the clone anymore, so take it.
        if self.edges[top].clone.is_some() && self.edges[top].is_rightmost() {
            let mut state = self.take_clone(top)?;
            self.edges[top].replay(&mut state);
            statistics.recomputations += 1;
            *distance = 0;
            return Some(state);
        }

        let last_clone = self.last_clone();
        let mut state = self.edges[last_clone].clone.as_ref()?.clone_state(true);
        statistics.clones += 1;
        *distance = (num_edges - last_clone) as u32;

        if *distance < adaptive_distance {
            for edge in &self.edges[last_clone..] {
                edge.replay(&mut state);
            }
            statistics.recomputations += *distance as u64;
            return Some(state);
        }

        let middle = last_clone + (*distance / 2) as usize;
        let mut index = last_clone;
        while index < middle {
            self.edges[index].replay(&mut state);
            index += 1;
        }
        // A clone below the middle would only be used by a single alternative.
        while index < num_edges && self.edges[index].is_rightmost() {
            self.edges[index].replay(&mut state);
            index += 1;
        }
        statistics.recomputations += (index - last_clone) as u64;

        if index + 1 < num_edges {
            let propagations_before = state.propagation_count();
            let status = state.stabilize();
            statistics.propagations += state.propagation_count() - propagations_before;

            if status == StateStatus::Failed {
                trace!("recomputed node at depth {index} failed, discarding its subtree");
                statistics.failures += 1;
                self.unwind(index);
                return None;
            }

            self.store_clone(index, state.clone_state(true));
            statistics.clones += 1;
            *distance = (num_edges - index) as u32;
        }

        for edge in &self.edges[index..] {
            edge.replay(&mut state);
        }
        statistics.recomputations += (num_edges - index) as u64;

        Some(state)
    }

    /// Remove the edge at `index` and every edge below it.
    fn unwind(&mut self, index: usize) {
        while self.edges.len() > index {
            self.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;
    use crate::variables::DomainId;

    fn state_with_variables(num_variables: usize) -> (State, Vec<DomainId>) {
        let mut state = State::default();
        let variables = (0..num_variables)
            .map(|_| state.new_bounded_integer(0, 9))
            .collect();
        (state, variables)
    }

    #[test]
    fn the_last_alternative_reuses_the_clone() {
        let (state, variables) = state_with_variables(1);
        let mut path = Path::default();
        path.push(
            Some(state.clone_state(true)),
            Choice::binary(predicate!(variables[0] <= 4)),
        );

        assert!(path.next());
        let mut statistics = SearchStatistics::default();
        let mut distance = 5;
        let mut recomputed = path
            .recompute(&mut distance, 2, &mut statistics)
            .expect("nothing can fail");

        assert_eq!(0, distance);
        assert_eq!(0, statistics.clones);
        assert_eq!(0, path.memory_usage());
        let _ = recomputed.stabilize();
        assert_eq!(5, recomputed.lower_bound(variables[0]));
    }

    #[test]
    fn exhausted_edges_are_removed() {
        let (state, variables) = state_with_variables(2);
        let mut path = Path::default();
        path.push(
            Some(state.clone_state(true)),
            Choice::binary(predicate!(variables[0] == 0)),
        );
        path.push(None, Choice::binary(predicate!(variables[1] == 0)));

        assert!(path.next());
        assert_eq!(2, path.depth());
        assert!(path.next());
        assert_eq!(1, path.depth());
        assert!(!path.next());
        assert!(path.is_empty());
    }

    #[test]
    fn long_recomputations_insert_a_clone_halfway() {
        let (state, variables) = state_with_variables(6);
        let mut path = Path::default();
        path.push(
            Some(state.clone_state(true)),
            Choice::binary(predicate!(variables[0] >= 1)),
        );
        for variable in &variables[1..] {
            path.push(None, Choice::binary(predicate!(variable >= 1)));
        }

        assert!(path.next());
        let mut statistics = SearchStatistics::default();
        let mut distance = 0;
        let mut recomputed = path
            .recompute(&mut distance, 2, &mut statistics)
            .expect("nothing can fail");

        // A clone is stored at depth 3, the middle between the root clone and the node.
        assert!(path.edges[3].clone.is_some());
        assert_eq!(3, distance);
        assert_eq!(2, statistics.clones);

        let _ = recomputed.stabilize();
        for variable in &variables[..5] {
            assert_eq!(1, recomputed.lower_bound(*variable));
        }
        assert_eq!(0, recomputed.upper_bound(variables[5]));
    }

    #[test]
    fn short_recomputations_only_replay() {
        let (state, variables) = state_with_variables(2);
        let mut path = Path::default();
        path.push(
            Some(state.clone_state(true)),
            Choice::binary(predicate!(variables[0] >= 1)),
        );
        path.push(None, Choice::binary(predicate!(variables[1] >= 1)));

        assert!(path.next());
        let mut statistics = SearchStatistics::default();
        let mut distance = 0;
        let recomputed = path
            .recompute(&mut distance, 8, &mut statistics)
            .expect("nothing can fail");

        assert_eq!(2, distance);
        assert_eq!(2, statistics.recomputations);
        assert!(path.edges[1].clone.is_none());
        assert_eq!(0, recomputed.upper_bound(variables[1]));
    }
}
