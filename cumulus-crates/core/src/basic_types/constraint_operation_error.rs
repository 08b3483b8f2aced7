use thiserror::Error;

use super::ConstructionError;
use super::Inconsistency;
#[cfg(doc)]
use crate::engine::TestSolver;

/// Errors related to adding propagators to a store such as the [`TestSolver`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// The arguments of the constraint were malformed.
    #[error("Adding the constraint failed because its arguments are invalid: {0}")]
    InvalidArguments(#[from] ConstructionError),
    /// Error which indicate that adding a propagator led to infeasibility at the root.
    #[error("Adding the constraint failed because it is infeasible at the root")]
    InfeasiblePropagator(Inconsistency),
}
