use enumset::EnumSet;

use crate::containers::StorageKey;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::IntDomainEvent;
use crate::engine::Watchers;

/// A structure which represents the most basic [`IntegerVariable`]; it is simply the id which links
/// to a domain (hence the name).
#[derive(Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct DomainId {
    pub id: u32,
}

impl DomainId {
    pub fn new(id: u32) -> Self {
        DomainId { id }
    }
}

impl IntegerVariable for DomainId {
    fn lower_bound(&self, assignment: &Assignments) -> i32 {
        assignment.get_lower_bound(*self)
    }

    fn upper_bound(&self, assignment: &Assignments) -> i32 {
        assignment.get_upper_bound(*self)
    }

    fn contains(&self, assignment: &Assignments, value: i32) -> bool {
        assignment.is_value_in_domain(*self, value)
    }

    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32> {
        assignment.get_domain_iterator(*self)
    }

    fn domain_intervals(&self, assignment: &Assignments) -> Vec<(i32, i32)> {
        assignment.get_domain_intervals(*self)
    }

    fn remove(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        assignment.remove_value_from_domain(*self, value)
    }

    fn remove_interval(
        &self,
        assignment: &mut Assignments,
        from: i32,
        to: i32,
    ) -> Result<(), EmptyDomain> {
        assignment.remove_interval_from_domain(*self, from, to)
    }

    fn set_lower_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        assignment.tighten_lower_bound(*self, value)
    }

    fn set_upper_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        assignment.tighten_upper_bound(*self, value)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>) {
        watchers.watch_all(*self, events);
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
