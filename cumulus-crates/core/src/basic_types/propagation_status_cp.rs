use std::fmt::Display;
use std::fmt::Formatter;

use crate::engine::propagation::PropagatorId;
use crate::engine::EmptyDomain;

/// The result of invoking a propagator. The propagation can either succeed or identify that the
/// current domains admit no solution of the constraint.
pub type PropagationStatusCP = Result<(), Inconsistency>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A domain update performed by the propagator emptied a domain.
    EmptyDomain,
    /// The propagator found the current domains to be infeasible without emptying a domain.
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator. A propagator that identifies a conflict that is _not_ an
/// empty domain, describes that conflict with this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    /// The propagator which identified the conflict.
    pub propagator: PropagatorId,
    /// The argument with which the conflict was derived.
    pub reason: ConflictReason,
}

/// The argument with which a resource propagator proved infeasibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictReason {
    /// The mandatory parts overlapping `time` use more than the maximum capacity.
    ResourceOverload { time: i32, usage: i64, capacity: i64 },
    /// A set of tasks needs more energy than the resource can provide between the earliest start
    /// and the latest completion of the set.
    EnergyOverload,
    /// A set of tasks which cannot overlap cannot all be processed between the earliest start and
    /// the latest completion of the set.
    UnaryOverload,
}

impl Display for ConflictReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictReason::ResourceOverload {
                time,
                usage,
                capacity,
            } => write!(f, "usage {usage} exceeds capacity {capacity} at time {time}"),
            ConflictReason::EnergyOverload => write!(f, "energy overload"),
            ConflictReason::UnaryOverload => write!(f, "unary overload"),
        }
    }
}
