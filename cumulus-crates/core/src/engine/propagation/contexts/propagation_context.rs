use crate::engine::propagation::PropagatorId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;

/// [`PropagationContext`] is passed to propagators to retrieve information about the current
/// variable domains, such as the lower-bound of a particular variable.
#[derive(Clone, Copy, Debug)]
pub struct PropagationContext<'a> {
    pub assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// [`PropagationContextMut`] is passed to propagators during propagation. It may be queried to
/// retrieve information about the current variable domains, or used to apply changes to the
/// domain of a variable e.g. set `[x >= 5]`.
///
/// Note that the [`PropagationContextMut`] is the only point of communication between the
/// propagator and the store during propagation.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    pub(crate) assignments: &'a mut Assignments,
    pub(crate) propagator_id: PropagatorId,
}

impl<'a> PropagationContextMut<'a> {
    pub fn new(assignments: &'a mut Assignments, propagator_id: PropagatorId) -> Self {
        PropagationContextMut {
            assignments,
            propagator_id,
        }
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    /// The number of domain changes applied to the store so far; see
    /// [`Assignments::num_domain_changes`].
    pub fn num_domain_changes(&self) -> usize {
        self.assignments.num_domain_changes()
    }
}

/// A trait which defines common methods for retrieving the [`Assignments`] from the structure
/// which implements this trait.
pub trait HasAssignments {
    /// Returns the stored [`Assignments`].
    fn assignments(&self) -> &Assignments;
}

mod private {
    use super::*;

    impl HasAssignments for PropagationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for PropagationContextMut<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }
}

pub trait ReadDomains: HasAssignments {
    /// Returns `true` if the domain of the given variable is singleton.
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn iterate_domain<Var: IntegerVariable>(&self, var: &Var) -> impl Iterator<Item = i32> {
        var.iterate_domain(self.assignments())
    }

    fn domain_intervals<Var: IntegerVariable>(&self, var: &Var) -> Vec<(i32, i32)> {
        var.domain_intervals(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}

impl PropagationContextMut<'_> {
    pub fn remove<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> Result<(), EmptyDomain> {
        if var.contains(self.assignments, value) {
            return var.remove(self.assignments, value);
        }
        Ok(())
    }

    /// Removes the inclusive interval `[from, to]` from the domain of `var`.
    pub fn remove_interval<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        from: i32,
        to: i32,
    ) -> Result<(), EmptyDomain> {
        if from <= to {
            return var.remove_interval(self.assignments, from, to);
        }
        Ok(())
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound < var.upper_bound(self.assignments) {
            return var.set_upper_bound(self.assignments, bound);
        }
        Ok(())
    }

    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound > var.lower_bound(self.assignments) {
            return var.set_lower_bound(self.assignments, bound);
        }
        Ok(())
    }
}
