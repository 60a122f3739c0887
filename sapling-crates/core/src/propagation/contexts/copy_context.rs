#[cfg(doc)]
use crate::propagation::Propagator;

/// Handed to [`Propagator::after_copy`] when a store is cloned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyContext {
    share: bool,
}

impl CopyContext {
    pub(crate) fn new(share: bool) -> Self {
        CopyContext { share }
    }

    /// Whether immutable data may be shared with the original.
    ///
    /// When this is `false` the clone is meant to be handed to another worker, and any data held
    /// behind a shared pointer should be duplicated.
    pub fn share(&self) -> bool {
        self.share
    }
}
