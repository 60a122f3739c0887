use std::fmt::Display;

use super::statistic_logging::log_statistic;
#[cfg(doc)]
use crate::propagation::Propagator;

/// Responsible for logging the statistics with the provided prefix; used when logging the
/// statistics of the store, the search engines and the [`Propagator`]s.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    /// The prefix which will be attached to the statistic name
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new(name_prefix: impl Display) -> Self {
        Self {
            name_prefix: name_prefix.to_string(),
        }
    }

    /// Attaches the provided `addition_to_prefix` to the stored internal prefix and returns a new
    /// [`StatisticLogger`] with these two prefixes.
    pub fn attach_to_prefix(&self, addition_to_prefix: impl Display) -> Self {
        if self.name_prefix.is_empty() {
            return Self::new(addition_to_prefix);
        }

        Self {
            name_prefix: format!("{}_{}", self.name_prefix, addition_to_prefix),
        }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.name_prefix, value);
    }
}

impl std::fmt::Write for StatisticLogger {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        log_statistic(&self.name_prefix, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_joined_with_underscores() {
        let logger = StatisticLogger::new("search")
            .attach_to_prefix("dfs")
            .attach_to_prefix("nodes");

        assert_eq!("search_dfs_nodes", logger.name_prefix);
    }

    #[test]
    fn attaching_to_an_empty_prefix_does_not_start_with_an_underscore() {
        let logger = StatisticLogger::default().attach_to_prefix("failures");

        assert_eq!("failures", logger.name_prefix);
    }
}
