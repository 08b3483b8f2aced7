//! Defines the resource constraints which this crate provides out of the box.
//!
//! Each function validates the shape of its arguments and returns the propagator which enforces
//! the constraint; the propagator is then added to a store such as the [`TestSolver`], which
//! validates the arguments against the initial domains.
//!
//! # Example
//! ```
//! # use cumulus_core::constraints;
//! # use cumulus_core::TestSolver;
//! let mut solver = TestSolver::default();
//!
//! let a = solver.new_variable(0, 3);
//! let b = solver.new_variable(0, 3);
//!
//! let propagator = constraints::unary([a, b], [2, 2]).expect("valid arguments");
//! let _ = solver.new_propagator(propagator).expect("no conflict at the root");
//! ```
#[cfg(doc)]
use crate::engine::TestSolver;

mod cumulative;

pub use cumulative::*;
