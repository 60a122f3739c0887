use crate::create_statistics_struct;

create_statistics_struct!(
    /// Counters of the work performed by a search engine.
    SearchStatistics {
        /// The number of nodes which were stabilized.
        nodes: u64,
        /// The number of failed nodes.
        failures: u64,
        /// The number of propagator calls over all nodes.
        propagations: u64,
        solutions: u64,
        /// The largest number of edges on the path.
        peak_depth: usize,
        /// The estimated number of bytes used by the clones on the path.
        memory: usize,
        peak_memory: usize,
        /// The number of clones made of a state.
        clones: u64,
        /// The number of choices which were replayed to recompute a node.
        recomputations: u64,
        /// The number of times the exploration started over from the root.
        restarts: u64,
    }
);

impl SearchStatistics {
    pub(crate) fn record_memory(&mut self, memory: usize) {
        self.memory = memory;
        self.peak_memory = self.peak_memory.max(memory);
    }

    pub(crate) fn record_depth(&mut self, depth: usize) {
        self.peak_depth = self.peak_depth.max(depth);
    }
}
