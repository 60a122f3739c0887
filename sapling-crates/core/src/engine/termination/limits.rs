use super::TerminationCondition;
use crate::search::SearchStatistics;

/// Stops the search once it has explored `limit` nodes; a limit of zero explores nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeLimit {
    limit: u64,
}

impl NodeLimit {
    pub fn new(limit: u64) -> Self {
        NodeLimit { limit }
    }
}

impl TerminationCondition for NodeLimit {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.nodes >= self.limit
    }
}

/// Stops the search once more than `limit` failed nodes have been encountered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FailLimit {
    limit: u64,
}

impl FailLimit {
    pub fn new(limit: u64) -> Self {
        FailLimit { limit }
    }
}

impl TerminationCondition for FailLimit {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.failures > self.limit
    }
}

/// Stops the search once the states it keeps use more than `limit` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLimit {
    limit: usize,
}

impl MemoryLimit {
    pub fn new(limit: usize) -> Self {
        MemoryLimit { limit }
    }
}

impl TerminationCondition for MemoryLimit {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.memory > self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::Combinator;

    #[test]
    fn node_limit_of_zero_stops_immediately() {
        let mut limit = NodeLimit::new(0);

        assert!(limit.should_stop(&SearchStatistics::default()));
    }

    #[test]
    fn fail_limit_allows_exactly_the_limit() {
        let mut limit = FailLimit::new(2);
        let mut statistics = SearchStatistics {
            failures: 2,
            ..Default::default()
        };
        assert!(!limit.should_stop(&statistics));

        statistics.failures = 3;
        assert!(limit.should_stop(&statistics));
    }

    #[test]
    fn memory_limit_stops_once_exceeded() {
        let mut limit = MemoryLimit::new(1024);
        let mut statistics = SearchStatistics {
            memory: 1024,
            ..Default::default()
        };
        assert!(!limit.should_stop(&statistics));

        statistics.memory = 1025;
        assert!(limit.should_stop(&statistics));
    }

    #[test]
    fn combinator_stops_when_either_stops() {
        let statistics = SearchStatistics {
            nodes: 5,
            ..Default::default()
        };

        let mut neither = Combinator::new(NodeLimit::new(10), FailLimit::new(1));
        let mut one = Combinator::new(NodeLimit::new(5), FailLimit::new(1));

        assert!(!neither.should_stop(&statistics));
        assert!(one.should_stop(&statistics));
    }

    #[test]
    fn absent_condition_never_stops() {
        let mut condition: Option<NodeLimit> = None;

        assert!(!condition.should_stop(&SearchStatistics::default()));
    }
}
