mod constraint_operation_error;
mod construction_error;
mod propagation_status_cp;

pub use constraint_operation_error::ConstraintOperationError;
pub use construction_error::ConstructionError;
pub use propagation_status_cp::*;
