//! Describes how domain changes are classified and how they reach the propagators and advisors
//! that are subscribed to a domain.
mod delta;
mod domain_events;
mod watch_list;

pub use delta::*;
pub use domain_events::*;
pub use watch_list::Watchers;
pub(crate) use watch_list::*;
