//! A minimal domain store against which the resource propagators run.
//!
//! The store keeps the integer domains and records which kind of change happened to a domain, it
//! does not schedule propagators and it does not backtrack; both are the responsibility of the
//! solver which embeds the propagators.
mod assignments;
mod domain_events;
pub mod propagation;
mod test_solver;
pub mod variables;
mod watch_list;

pub use assignments::Assignments;
pub use assignments::DomainChange;
pub use assignments::EmptyDomain;
pub use domain_events::DomainEvents;
pub use domain_events::IntDomainEvent;
pub use test_solver::BoxedPropagator;
pub use test_solver::TestSolver;
pub use watch_list::WatchList;
pub use watch_list::Watchers;
