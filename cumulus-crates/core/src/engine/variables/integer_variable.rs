use std::fmt::Debug;

use enumset::EnumSet;

use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::IntDomainEvent;
use crate::engine::Watchers;

/// A trait specifying the required behaviour of an integer variable such as retrieving a
/// lower-bound ([`IntegerVariable::lower_bound`]) or adjusting the bounds
/// ([`IntegerVariable::set_lower_bound`]).
pub trait IntegerVariable: Clone + Debug + 'static {
    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignment: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignment: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignment: &Assignments, value: i32) -> bool;

    /// Iterate over the values of the domain.
    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32>;

    /// The maximal runs of consecutive values of the domain as inclusive `(from, to)` pairs, in
    /// increasing order.
    fn domain_intervals(&self, assignment: &Assignments) -> Vec<(i32, i32)>;

    /// Remove a value from the domain of this variable.
    fn remove(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Remove the inclusive interval `[from, to]` from the domain of this variable.
    fn remove_interval(
        &self,
        assignment: &mut Assignments,
        from: i32,
        to: i32,
    ) -> Result<(), EmptyDomain>;

    /// Tighten the lower bound of the domain of this variable.
    fn set_lower_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Tighten the upper bound of the domain of this variable.
    fn set_upper_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>);
}
