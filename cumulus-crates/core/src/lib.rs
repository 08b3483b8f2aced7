//! Filtering algorithms for the cumulative and unary resource constraints of a finite-domain
//! constraint solver.
//!
//! The [`CumulativePropagator`] combines time-table reasoning with the edge-finding algorithms of
//! Vilím; it shrinks the domains of the start times, processing times, resource usages,
//! presences and capacity of a resource such that no removed value is part of a feasible
//! schedule. The propagators run against the domain store in [`engine`], where the
//! [`TestSolver`] can be used to set up the domains and to apply the propagators.
//!
//! # Example
//! ```
//! # use cumulus_core::constraints;
//! # use cumulus_core::TestSolver;
//! let mut solver = TestSolver::default();
//!
//! let start_0 = solver.new_variable(0, 0);
//! let start_1 = solver.new_variable(0, 6);
//!
//! let propagator = constraints::unary([start_0, start_1], [4, 2]).expect("valid arguments");
//! let _ = solver
//!     .new_propagator(propagator)
//!     .expect("the tasks can be scheduled");
//!
//! assert_eq!(solver.lower_bound(start_1), 4);
//! ```
pub(crate) mod basic_types;
pub mod containers;
pub mod engine;
pub(crate) mod math;
pub(crate) mod propagators;

#[doc(hidden)]
pub mod asserts;

pub mod constraints;
pub mod statistics;

pub use convert_case;

pub use crate::basic_types::ConflictReason;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::ConstructionError;
pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagationStatusCP;
pub use crate::basic_types::PropagatorConflict;
pub use crate::engine::variables;
pub use crate::engine::TestSolver;
pub use crate::propagators::ArgTask;
pub use crate::propagators::CumulativeOptions;
pub use crate::propagators::CumulativePropagationMethod;
pub use crate::propagators::CumulativePropagator;
pub use crate::propagators::CumulativePropagatorOptions;
