//! Contains the propagator implementations for resource constraints.
//!
//! See the [`crate::engine::propagation`] for info on propagators.

mod cumulative;
pub(crate) mod theta_trees;

pub use cumulative::ArgTask;
pub use cumulative::CumulativeOptions;
pub use cumulative::CumulativePropagationMethod;
pub use cumulative::CumulativePropagator;
pub use cumulative::CumulativePropagatorOptions;
