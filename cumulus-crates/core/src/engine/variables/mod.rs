//! Variables which the propagators operate on.
mod constant;
mod domain_id;
mod integer_variable;

pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
