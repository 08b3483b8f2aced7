//! Contains the main building blocks for propagators.
//!
//! A propagator takes as input a set of variables and for each variable a corresponding domain;
//! it can then be seen as a function which maps `D ↦ D'` such that <code>D'<sub>i</sub> ⊆
//! D<sub>i</sub></code> for all variables (i.e. the domain of a variable either remains the same
//! after applying the propagator or it becomes a subset of the domain before applying the
//! propagator).
//!
//! A propagator is said to be at fix-point if applying it again does not change any domain. A
//! propagator is said to be "idempotent" if a single call to it will result in it being at
//! fix-point.
//!
//! Each concrete propagator is associated with one trait: [`Propagator`]. The main function to
//! implement for this trait is [`Propagator::propagate`], which performs the domain reduction.
//! The propagator communicates with the store only through the contexts which it is provided:
//! [`PropagatorInitialisationContext`] when it is added to the store (to validate its arguments
//! and to register for domain events), and [`PropagationContextMut`] when it propagates.
mod contexts;
mod local_id;
mod propagator;
mod propagator_id;

pub use contexts::*;
pub use local_id::LocalId;
pub use propagator::Propagator;
pub use propagator_id::PropagatorId;
pub use propagator_id::PropagatorVarId;
