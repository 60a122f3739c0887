use thiserror::Error;

use crate::basic_types::time::Duration;
use crate::termination::Combinator;
use crate::termination::FailLimit;
use crate::termination::NodeLimit;
use crate::termination::TimeBudget;

/// The limits derived from [`SearchOptions`].
pub(crate) type OptionLimits =
    Combinator<Option<NodeLimit>, Combinator<Option<FailLimit>, Option<TimeBudget>>>;

/// Options which determine how the search engines explore the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// A clone of the state is kept every `copying_distance` levels of the path; the levels in
    /// between are recomputed from their closest ancestor clone.
    pub copying_distance: u32,
    /// When a recomputation has to replay at least this many choices, an additional clone is
    /// kept halfway.
    pub adaptive_distance: u32,
    /// Stop after exploring this many nodes.
    pub node_limit: Option<u64>,
    /// Stop after encountering more than this many failed nodes.
    pub fail_limit: Option<u64>,
    /// Stop once the search has been running this long.
    pub time_limit: Option<Duration>,
    pub worker_count: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            copying_distance: 8,
            adaptive_distance: 2,
            node_limit: None,
            fail_limit: None,
            time_limit: None,
            worker_count: 1,
        }
    }
}

/// Describes why [`SearchOptions`] cannot be used.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchOptionsError {
    #[error("the copying distance should be at least 1")]
    ZeroCopyingDistance,
    #[error("the number of workers should be at least 1")]
    ZeroWorkers,
}

impl SearchOptions {
    pub fn validate(&self) -> Result<(), SearchOptionsError> {
        if self.copying_distance == 0 {
            return Err(SearchOptionsError::ZeroCopyingDistance);
        }
        if self.worker_count == 0 {
            return Err(SearchOptionsError::ZeroWorkers);
        }
        Ok(())
    }

    /// The limits of these options; the time limit starts counting at this call.
    pub(crate) fn limits(&self) -> OptionLimits {
        Combinator::new(
            self.node_limit.map(NodeLimit::new),
            Combinator::new(
                self.fail_limit.map(FailLimit::new),
                self.time_limit.map(TimeBudget::starting_now),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchStatistics;
    use crate::termination::TerminationCondition;

    #[test]
    fn default_options_are_valid() {
        assert_eq!(Ok(()), SearchOptions::default().validate());
    }

    #[test]
    fn zero_distances_and_workers_are_rejected() {
        let options = SearchOptions {
            copying_distance: 0,
            ..Default::default()
        };
        assert_eq!(Err(SearchOptionsError::ZeroCopyingDistance), options.validate());

        let options = SearchOptions {
            worker_count: 0,
            ..Default::default()
        };
        assert_eq!(Err(SearchOptionsError::ZeroWorkers), options.validate());
    }

    #[test]
    fn limits_stop_on_the_configured_counts() {
        let mut limits = SearchOptions {
            fail_limit: Some(1),
            ..Default::default()
        }
        .limits();

        let mut statistics = SearchStatistics {
            failures: 1,
            ..Default::default()
        };
        assert!(!limits.should_stop(&statistics));

        statistics.failures = 2;
        assert!(limits.should_stop(&statistics));
    }
}
