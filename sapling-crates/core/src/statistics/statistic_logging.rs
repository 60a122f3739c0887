//! The process-wide destination of the statistics; nothing is written until
//! [`configure_statistic_logging`] has been called.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;

/// Where and how statistics are written; every statistic becomes a line `{prefix} {name}={value}`.
pub struct StatisticOptions {
    prefix: String,
    /// Written after a block of statistics by [`log_statistic_postfix`].
    block_end: Option<String>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send + Sync>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("block_end", &self.block_end)
            .field("casing", &self.casing)
            .field("writer", &"<Writer>")
            .finish()
    }
}

impl StatisticOptions {
    /// Statistics written to stdout without changing the casing of their names.
    pub fn new(prefix: impl Into<String>) -> Self {
        StatisticOptions {
            prefix: prefix.into(),
            block_end: None,
            casing: None,
            writer: Box::new(stdout()),
        }
    }

    pub fn with_block_end(mut self, line: impl Into<String>) -> Self {
        self.block_end = Some(line.into());
        self
    }

    /// Converts the (snake case) statistic names to `casing` before writing them.
    pub fn with_casing(mut self, casing: Case) -> Self {
        self.casing = Some(casing);
        self
    }

    pub fn with_writer(mut self, writer: impl Write + Send + Sync + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    fn write_statistic(&mut self, name: impl Display, value: impl Display) {
        let name = match self.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        let _ = writeln!(self.writer, "{} {name}={value}", self.prefix);
    }

    fn end_block(&mut self) {
        if let Some(block_end) = &self.block_end {
            let _ = writeln!(self.writer, "{block_end}");
        }
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Installs `options` as the destination of all statistics.
///
/// Only the first configuration is used; returns whether `options` was installed.
pub fn configure_statistic_logging(options: StatisticOptions) -> bool {
    let mut installed = false;
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        installed = true;
        RwLock::new(options)
    });
    installed
}

fn with_options(action: impl FnOnce(&mut StatisticOptions)) {
    if let Some(lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = lock.write() {
            action(&mut options);
        }
    }
}

/// Writes the statistic `name` with `value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    with_options(|options| options.write_statistic(name, value));
}

/// Marks the end of a block of statistics, if the configuration has a closing line.
pub fn log_statistic_postfix() {
    with_options(StatisticOptions::end_block);
}

/// Whether statistics are written anywhere.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
