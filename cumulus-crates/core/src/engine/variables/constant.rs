use enumset::EnumSet;

use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::IntDomainEvent;
use crate::engine::Watchers;

/// A constant is a variable with a singleton domain; any update which would remove its value
/// results in an [`EmptyDomain`].
impl IntegerVariable for i32 {
    fn lower_bound(&self, _assignment: &Assignments) -> i32 {
        *self
    }

    fn upper_bound(&self, _assignment: &Assignments) -> i32 {
        *self
    }

    fn contains(&self, _assignment: &Assignments, value: i32) -> bool {
        value == *self
    }

    fn iterate_domain(&self, _assignment: &Assignments) -> impl Iterator<Item = i32> {
        std::iter::once(*self)
    }

    fn domain_intervals(&self, _assignment: &Assignments) -> Vec<(i32, i32)> {
        vec![(*self, *self)]
    }

    fn remove(&self, _assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        if value == *self {
            return Err(EmptyDomain);
        }
        Ok(())
    }

    fn remove_interval(
        &self,
        _assignment: &mut Assignments,
        from: i32,
        to: i32,
    ) -> Result<(), EmptyDomain> {
        if from <= *self && *self <= to {
            return Err(EmptyDomain);
        }
        Ok(())
    }

    fn set_lower_bound(&self, _assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        if value > *self {
            return Err(EmptyDomain);
        }
        Ok(())
    }

    fn set_upper_bound(&self, _assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        if value < *self {
            return Err(EmptyDomain);
        }
        Ok(())
    }

    fn watch_all(&self, _watchers: &mut Watchers<'_>, _events: EnumSet<IntDomainEvent>) {}
}
