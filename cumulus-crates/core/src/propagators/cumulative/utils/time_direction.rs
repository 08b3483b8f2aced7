//! The two views on the time axis from which the edge-finding rules are applied.
//!
//! The rules are only formulated for the earliest start times (or, symmetrically, the latest
//! completion times) of tasks; applying them to the [`Reversed`] view, in which time `t` is mapped
//! to `-t`, yields the pruning for the other side.
use super::Task;
use super::TaskBounds;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::EmptyDomain;

/// A projection of the time axis.
///
/// The bounds of a task are read through [`TimeDirection::bounds`] and every update derived in
/// the projected time is translated back to the start variable of the task.
pub(crate) trait TimeDirection {
    /// Used in debug output.
    const NAME: &'static str;

    /// Returns the bounds of the task at index `task` in this view.
    fn bounds<Var, PVar, RVar>(
        task_index: usize,
        task: &Task<Var, PVar, RVar>,
        context: PropagationContext,
    ) -> TaskBounds
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static;

    /// Ensures that the task does not start before `bound` in this view.
    fn update_earliest_start<Var, PVar, RVar>(
        task: &Task<Var, PVar, RVar>,
        bound: i64,
        context: &mut PropagationContextMut,
    ) -> Result<(), EmptyDomain>
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static;

    /// Ensures that the task does not complete after `bound` in this view.
    fn update_latest_completion<Var, PVar, RVar>(
        task: &Task<Var, PVar, RVar>,
        bound: i64,
        context: &mut PropagationContextMut,
    ) -> Result<(), EmptyDomain>
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static;
}

/// The time axis as it is given.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Forward;

/// The time axis in which every time point `t` is mapped to `-t`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reversed;

impl TimeDirection for Forward {
    const NAME: &'static str = "forward";

    fn bounds<Var, PVar, RVar>(
        task_index: usize,
        task: &Task<Var, PVar, RVar>,
        context: PropagationContext,
    ) -> TaskBounds
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
    {
        TaskBounds {
            task: task_index,
            est: task.est(&context),
            lst: task.lst(&context),
            ect: task.ect(&context),
            lct: task.lct(&context),
            duration: context.lower_bound(&task.processing_time),
            resource_usage: context.lower_bound(&task.resource_usage),
            energy: task.energy(&context),
        }
    }

    fn update_earliest_start<Var, PVar, RVar>(
        task: &Task<Var, PVar, RVar>,
        bound: i64,
        context: &mut PropagationContextMut,
    ) -> Result<(), EmptyDomain>
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
    {
        tighten_lower_bound(context, &task.start_variable, bound)
    }

    fn update_latest_completion<Var, PVar, RVar>(
        task: &Task<Var, PVar, RVar>,
        bound: i64,
        context: &mut PropagationContextMut,
    ) -> Result<(), EmptyDomain>
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
    {
        let duration = context.lower_bound(&task.processing_time) as i64;
        tighten_upper_bound(context, &task.start_variable, bound - duration)
    }
}

impl TimeDirection for Reversed {
    const NAME: &'static str = "reversed";

    fn bounds<Var, PVar, RVar>(
        task_index: usize,
        task: &Task<Var, PVar, RVar>,
        context: PropagationContext,
    ) -> TaskBounds
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
    {
        TaskBounds {
            task: task_index,
            est: -task.lct(&context),
            lst: -task.ect(&context),
            ect: -task.lst(&context),
            lct: -task.est(&context),
            duration: context.lower_bound(&task.processing_time),
            resource_usage: context.lower_bound(&task.resource_usage),
            energy: task.energy(&context),
        }
    }

    fn update_earliest_start<Var, PVar, RVar>(
        task: &Task<Var, PVar, RVar>,
        bound: i64,
        context: &mut PropagationContextMut,
    ) -> Result<(), EmptyDomain>
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
    {
        // The mirrored task starts at -(s + p), so -(s + p) >= bound.
        let duration = context.lower_bound(&task.processing_time) as i64;
        tighten_upper_bound(context, &task.start_variable, -bound - duration)
    }

    fn update_latest_completion<Var, PVar, RVar>(
        task: &Task<Var, PVar, RVar>,
        bound: i64,
        context: &mut PropagationContextMut,
    ) -> Result<(), EmptyDomain>
    where
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
    {
        tighten_lower_bound(context, &task.start_variable, -bound)
    }
}

/// Applies `[var >= bound]`; a bound which does not fit in an `i32` is either trivially satisfied
/// or empties the domain.
fn tighten_lower_bound<Var: IntegerVariable>(
    context: &mut PropagationContextMut,
    var: &Var,
    bound: i64,
) -> Result<(), EmptyDomain> {
    match i32::try_from(bound) {
        Ok(bound) => context.set_lower_bound(var, bound),
        Err(_) if bound < 0 => Ok(()),
        Err(_) => Err(EmptyDomain),
    }
}

/// Applies `[var <= bound]`; see [`tighten_lower_bound`].
fn tighten_upper_bound<Var: IntegerVariable>(
    context: &mut PropagationContextMut,
    var: &Var,
    bound: i64,
) -> Result<(), EmptyDomain> {
    match i32::try_from(bound) {
        Ok(bound) => context.set_upper_bound(var, bound),
        Err(_) if bound > 0 => Ok(()),
        Err(_) => Err(EmptyDomain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::propagation::LocalId;
    use crate::engine::propagation::PropagatorId;
    use crate::engine::variables::DomainId;
    use crate::engine::TestSolver;

    fn task(
        solver: &mut TestSolver,
        start: (i32, i32),
        duration: i32,
    ) -> Task<DomainId, DomainId, DomainId> {
        Task {
            start_variable: solver.new_variable(start.0, start.1),
            processing_time: solver.new_variable(duration, duration),
            resource_usage: solver.new_variable(1, 1),
            presence: None,
            id: LocalId::from(0),
        }
    }

    #[test]
    fn reversed_bounds_mirror_the_time_axis() {
        let mut solver = TestSolver::default();
        let task = task(&mut solver, (2, 6), 3);

        let forward = Forward::bounds(0, &task, solver.get_propagation_context());
        let reversed = Reversed::bounds(0, &task, solver.get_propagation_context());

        assert_eq!(
            (forward.est, forward.lst, forward.ect, forward.lct),
            (2, 6, 5, 9)
        );
        assert_eq!(
            (reversed.est, reversed.lst, reversed.ect, reversed.lct),
            (-9, -5, -6, -2)
        );
        assert_eq!(reversed.energy, forward.energy);
    }

    #[test]
    fn reversed_updates_tighten_the_opposite_bound() {
        let mut solver = TestSolver::default();
        let task = task(&mut solver, (2, 6), 3);

        let mut context = PropagationContextMut::new(&mut solver.assignments, PropagatorId(0));
        // The mirrored task may start no earlier than -8, so the task completes by 8.
        Reversed::update_earliest_start(&task, -8, &mut context).expect("non-empty domain");
        // The mirrored task completes no later than -3, so the task starts at 3 or later.
        Reversed::update_latest_completion(&task, -3, &mut context).expect("non-empty domain");

        assert_eq!(solver.lower_bound(task.start_variable), 3);
        assert_eq!(solver.upper_bound(task.start_variable), 5);
    }

    #[test]
    fn out_of_range_bounds_are_trivial_or_empty() {
        let mut solver = TestSolver::default();
        let task = task(&mut solver, (2, 6), 3);

        let mut context = PropagationContextMut::new(&mut solver.assignments, PropagatorId(0));
        assert_eq!(
            Forward::update_earliest_start(&task, i64::from(i32::MIN) - 5, &mut context),
            Ok(())
        );
        assert_eq!(
            Forward::update_earliest_start(&task, i64::from(i32::MAX) + 5, &mut context),
            Err(EmptyDomain)
        );
        assert_eq!(solver.lower_bound(task.start_variable), 2);
    }
}
