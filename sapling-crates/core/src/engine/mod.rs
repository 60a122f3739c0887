pub(crate) mod assignments;
mod failure_counts;
pub(crate) mod notifications;
pub(crate) mod predicates;
mod propagator_queue;
mod propagator_store;
mod state;
#[cfg(test)]
mod test_helpers;
pub mod termination;
pub(crate) mod variables;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub use assignments::MAX_DOMAIN_VALUE;
pub use assignments::MIN_DOMAIN_VALUE;
pub use propagator_queue::AgendaOrder;
pub(crate) use propagator_queue::PropagatorQueue;
pub use state::State;
pub use state::StateStatistics;
pub use state::StateStatus;
pub use state::SubscriptionError;
