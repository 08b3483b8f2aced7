use super::HasAssignments;
use super::PropagationContext;
use crate::engine::propagation::LocalId;
#[cfg(doc)]
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorVarId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::DomainEvents;
use crate::engine::WatchList;
use crate::engine::Watchers;

/// [`PropagatorInitialisationContext`] is used when [`Propagator`]s are initialised after creation.
///
/// Propagators use the [`PropagatorInitialisationContext`] to register to domain changes
/// of variables and to retrieve the current bounds of variables.
#[derive(Debug)]
pub struct PropagatorInitialisationContext<'a> {
    watch_list: &'a mut WatchList,
    propagator_id: PropagatorId,
    next_local_id: LocalId,

    context: PropagationContext<'a>,
}

impl<'a> PropagatorInitialisationContext<'a> {
    pub fn new(
        watch_list: &'a mut WatchList,
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
    ) -> PropagatorInitialisationContext<'a> {
        PropagatorInitialisationContext {
            watch_list,
            propagator_id,
            next_local_id: LocalId::from(0),

            context: PropagationContext::new(assignments),
        }
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        self.context
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    /// Subscribes the propagator to the given [`DomainEvents`].
    ///
    /// The [`LocalId`] is internal information related to the propagator which identifies the
    /// variable; each registered variable *must* have a unique [`LocalId`]. Most often this
    /// would be the index of the variable in the internal array of variables.
    pub fn register<Var: IntegerVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        self.next_local_id = self.next_local_id.max(LocalId::from(local_id.unpack() + 1));

        let mut watchers = Watchers::new(propagator_var, self.watch_list);
        var.watch_all(&mut watchers, domain_events.get_int_events());

        var
    }

    /// The smallest [`LocalId`] which has not been used to register a variable.
    pub fn next_local_id(&self) -> LocalId {
        self.next_local_id
    }
}

impl HasAssignments for PropagatorInitialisationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.context.assignments
    }
}
