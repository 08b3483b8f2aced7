//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows
//! setting up specific scenarios under which to test the various operations of a propagator.
use std::fmt::Debug;
use std::fmt::Formatter;

use log::debug;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Inconsistency;
use crate::containers::KeyGenerator;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::PropagatorVarId;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::IntDomainEvent;
use crate::engine::WatchList;

/// A container for variables, which can be used to test propagators.
///
/// The solver owns the identifiers it hands out to propagators; there is no global counter.
#[derive(Debug, Default)]
pub struct TestSolver {
    pub assignments: Assignments,
    watch_list: WatchList,
    propagator_ids: KeyGenerator<PropagatorId>,
}

/// A propagator which has been added to a [`TestSolver`].
pub struct BoxedPropagator {
    id: PropagatorId,
    propagator: Box<dyn Propagator>,
}

impl Debug for BoxedPropagator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "test_helper::Propagator({})", self.propagator)
    }
}

impl BoxedPropagator {
    pub fn id(&self) -> PropagatorId {
        self.id
    }

    pub fn inner(&self) -> &dyn Propagator {
        self.propagator.as_ref()
    }
}

impl TestSolver {
    pub fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.assignments.grow(lb, ub)
    }

    /// Creates a variable with the provided (sparse) domain.
    pub fn new_sparse_variable(&mut self, mut values: Vec<i32>) -> DomainId {
        values.sort_unstable();
        values.dedup();
        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];

        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        for window in values.windows(2) {
            if window[1] > window[0] + 1 {
                self.assignments
                    .remove_interval_from_domain(domain_id, window[0] + 1, window[1] - 1)
                    .expect("the domain contains at least the provided values");
            }
        }
        self.clear_domain_events();

        domain_id
    }

    /// Adds the propagator to the solver, initialises it and applies a first propagation.
    pub fn new_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<BoxedPropagator, ConstraintOperationError> {
        let id = self.propagator_ids.next_key();

        let mut propagator = BoxedPropagator {
            id,
            propagator: Box::new(propagator),
        };
        propagator
            .propagator
            .initialise_at_root(&mut PropagatorInitialisationContext::new(
                &mut self.watch_list,
                id,
                &self.assignments,
            ))?;
        self.propagate(&mut propagator)
            .map_err(ConstraintOperationError::InfeasiblePropagator)?;

        Ok(propagator)
    }

    pub fn propagate(&mut self, propagator: &mut BoxedPropagator) -> Result<(), Inconsistency> {
        let context = PropagationContextMut::new(&mut self.assignments, propagator.id);
        let result = propagator.propagator.propagate(context);
        if let Err(inconsistency) = &result {
            debug!("{} failed: {inconsistency:?}", propagator.propagator);
        }
        self.clear_domain_events();
        result
    }

    /// Runs [`Propagator::debug_propagate_from_scratch`] of the provided propagator.
    pub fn propagate_from_scratch(
        &mut self,
        propagator: &BoxedPropagator,
    ) -> Result<(), Inconsistency> {
        let context = PropagationContextMut::new(&mut self.assignments, propagator.id);
        let result = propagator.propagator.debug_propagate_from_scratch(context);
        self.clear_domain_events();
        result
    }

    /// The harness does not schedule propagators, so the recorded changes are discarded once a
    /// propagator has run.
    fn clear_domain_events(&mut self) {
        let _ = self.assignments.drain_domain_events().count();
    }

    pub fn get_propagation_context(&self) -> PropagationContext<'_> {
        PropagationContext::new(&self.assignments)
    }

    pub fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        var.contains(&self.assignments, value)
    }

    pub fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_lower_bound(var)
    }

    pub fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_upper_bound(var)
    }

    pub fn domain_intervals(&self, var: DomainId) -> Vec<(i32, i32)> {
        self.assignments.get_domain_intervals(var)
    }

    pub fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments.tighten_lower_bound(var, bound)
    }

    pub fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments.tighten_upper_bound(var, bound)
    }

    pub fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.remove_value_from_domain(var, value)
    }

    pub fn num_domain_changes(&self) -> usize {
        self.assignments.num_domain_changes()
    }

    /// Whether the propagator is woken up upon `event` on `var` under the given [`LocalId`].
    pub fn is_registered(
        &self,
        propagator: &BoxedPropagator,
        var: DomainId,
        event: IntDomainEvent,
        local_id: LocalId,
    ) -> bool {
        self.watch_list
            .get_affected_propagators(var, event)
            .any(|propagator_var| {
                propagator_var
                    == PropagatorVarId {
                        propagator: propagator.id,
                        variable: local_id,
                    }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    #[test]
    fn domain_events_are_cleared_after_propagation() {
        let mut solver = TestSolver::default();
        let start_0 = solver.new_variable(0, 0);
        let start_1 = solver.new_variable(0, 6);

        let mut propagator = solver
            .new_propagator(constraints::unary([start_0, start_1], [4, 2]).expect("valid"))
            .expect("No conflict");
        assert_eq!(solver.lower_bound(start_1), 4);
        assert_eq!(solver.assignments.drain_domain_events().count(), 0);

        solver.set_upper_bound(start_1, 5).expect("non-empty domain");
        solver.propagate(&mut propagator).expect("No conflict");
        assert_eq!(solver.assignments.drain_domain_events().count(), 0);
    }
}
