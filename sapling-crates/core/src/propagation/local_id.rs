/// The name a propagator gives to one of its subscriptions or advisors.
///
/// A propagator picks the ids itself when subscribing in
/// [`crate::propagation::PropagatorConstructor::create`], usually the position of the variable in
/// its own array. The store hands the id back to [`crate::propagation::Propagator::advise`] and
/// uses it to find the watchers to drop in
/// [`crate::propagation::PropagationContext::unregister`]. Ids only have to be unique per kind
/// of watcher within one propagator.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalId(u32);

impl LocalId {
    pub const fn from(value: u32) -> Self {
        LocalId(value)
    }

    pub fn unpack(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LocalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "local {}", self.0)
    }
}
