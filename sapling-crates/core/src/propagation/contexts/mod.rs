mod advise_context;
mod copy_context;
mod propagation_context;

pub use advise_context::*;
pub use copy_context::*;
pub(crate) use propagation_context::cancel_subscriptions;
pub use propagation_context::PropagationContext;
