//! Energetic reasoning which is applied after the time-table has reached a fixpoint.
mod capacitated;
mod unary;

pub(crate) use capacitated::capacitated_edge_finding;
pub(crate) use unary::unary_edge_finding;
