use super::LocalId;
use crate::containers::StorageKey;

/// An identifier of a propagator in the store, handed out by the store when the propagator is
/// added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropagatorId(pub u32);

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

impl std::fmt::Display for PropagatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A variable as seen by a particular propagator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropagatorVarId {
    pub propagator: PropagatorId,
    pub variable: LocalId,
}
