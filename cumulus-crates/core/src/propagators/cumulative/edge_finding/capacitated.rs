use std::cmp::Reverse;

use fnv::FnvHashMap;
use log::trace;

use crate::basic_types::ConflictReason;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::cumulus_assert_moderate;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::math::num_ext::NumExt;
use crate::propagators::cumulative::CumulativeParameters;
use crate::propagators::cumulative::TaskBounds;
use crate::propagators::cumulative::TimeDirection;
use crate::propagators::theta_trees::ThetaLambdaTree;
use crate::propagators::theta_trees::ThetaTree;
use crate::propagators::theta_trees::NEG_INF;

/// Applies the capacitated edge-finding rule of \[1\] in the provided [`TimeDirection`].
///
/// The rule detects that a task `i` has to end after all tasks of a set `Θ` (written `Θ ⋖ i`)
/// when scheduling `i` together with `Θ` would require more energy than the resource can provide
/// between the earliest start and the latest completion time of `Θ ∪ {i}`. The earliest start time
/// of `i` is then raised such that `i` starts after the energy of `Θ` which cannot be processed in
/// parallel with `i` has been processed.
///
/// Only the tasks which are present and which use the resource for a non-zero amount of time take
/// part in the reasoning.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Edge finding filtering algorithm for discrete cumulative resources in O(kn log
/// n)’, in Principles and Practice of Constraint Programming-CP 2009: 15th International
/// Conference, CP 2009 Lisbon, Portugal, September 20-24, 2009 Proceedings 15, 2009, pp. 802–816.
pub(crate) fn capacitated_edge_finding<
    Direction: TimeDirection,
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
) -> PropagationStatusCP {
    let capacity = context.upper_bound(&parameters.capacity) as i64;
    let tasks = parameters
        .tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.is_present(context) && task.exists(context))
        .map(|(index, task)| Direction::bounds(index, task, context.as_readonly()))
        .collect::<Vec<_>>();
    if tasks.is_empty() {
        return Ok(());
    }

    // The tasks in non-decreasing order of latest completion time
    let mut sorted_by_lct = (0..tasks.len()).collect::<Vec<_>>();
    sorted_by_lct.sort_by_key(|&task| (tasks[task].lct, task));

    let precedences = match detect_order(&tasks, &sorted_by_lct, capacity) {
        Ok(precedences) => precedences,
        Err(reason) => {
            return Err(Inconsistency::Conflict(PropagatorConflict {
                propagator: context.propagator_id(),
                reason,
            }))
        }
    };

    adjust_bounds::<Direction, _, _, _, _>(
        context,
        parameters,
        &tasks,
        &sorted_by_lct,
        &precedences,
        capacity,
    )
}

/// Detects the precedences `Θ ⋖ i` (see \[1\], Algorithm 1).
///
/// The tasks are visited in non-increasing order of latest completion time `lct_j`; at that point
/// Θ contains the tasks with a latest completion time of at most `lct_j` and Λ contains the tasks
/// which have already been visited. While adding a task of Λ to Θ overloads the resource before
/// `lct_j`, that task has to end after all tasks in Θ.
///
/// Returns, for every task `i`, the latest completion time of the largest set Θ for which `Θ ⋖ i`
/// was detected (if any).
fn detect_order(
    tasks: &[TaskBounds],
    sorted_by_lct: &[usize],
    capacity: i64,
) -> Result<Vec<Option<i32>>, ConflictReason> {
    let mut theta_lambda_tree = ThetaLambdaTree::new(tasks, capacity);
    let mut precedences = vec![None; tasks.len()];

    for &j in sorted_by_lct.iter().rev() {
        let lct_j = tasks[j].lct;
        let energy_bound = capacity * lct_j as i64;

        if theta_lambda_tree.envelope() > energy_bound {
            return Err(ConflictReason::EnergyOverload);
        }

        while theta_lambda_tree.envelope_lambda() > energy_bound {
            let Some(i) = theta_lambda_tree.responsible_envelope_lambda() else {
                break;
            };
            cumulus_assert_moderate!(tasks[i].lct > lct_j);

            precedences[i] = precedences[i].max(Some(lct_j));
            theta_lambda_tree.remove_from_lambda(i);
        }

        theta_lambda_tree.move_to_lambda(j);
    }

    Ok(precedences)
}

/// Computes the updates of the earliest start times for the detected precedences (see \[1\],
/// Algorithm 3).
///
/// For every resource usage `c` of a task with a detected precedence, the tasks are added to a
/// [`ThetaTree`] in non-decreasing order of latest completion time `lct_j`. The update for a task
/// `i` with resource usage `c` and `Θ ⋖ i` is the largest value of
/// `⌈(Env(j, c) - (C - c) * lct_j) / c⌉` over the tasks `j` with `lct_j ≤ lct_Θ`.
fn adjust_bounds<
    Direction: TimeDirection,
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
    tasks: &[TaskBounds],
    sorted_by_lct: &[usize],
    precedences: &[Option<i32>],
    capacity: i64,
) -> PropagationStatusCP {
    let mut updates: FnvHashMap<i32, Vec<i64>> = FnvHashMap::default();
    for (i, precedence) in precedences.iter().enumerate() {
        if precedence.is_some() {
            let resource_usage = tasks[i].resource_usage;
            let _ = updates
                .entry(resource_usage)
                .or_insert_with(|| compute_updates(tasks, sorted_by_lct, capacity, resource_usage));
        }
    }

    let mut with_precedence = precedences
        .iter()
        .enumerate()
        .filter_map(|(i, precedence)| precedence.map(|lct| (i, lct)))
        .collect::<Vec<_>>();
    with_precedence.sort_by_key(|&(i, lct)| (Reverse(lct), i));

    for (i, precedence) in with_precedence {
        let bounds = &tasks[i];
        cumulus_assert_moderate!(bounds.resource_usage > 0);

        // The last position (in the order of latest completion times) which is part of Θ
        let position = sorted_by_lct.partition_point(|&j| tasks[j].lct <= precedence);
        cumulus_assert_moderate!(position > 0);
        let update = updates[&bounds.resource_usage][position - 1];

        if update > bounds.est as i64 {
            trace!(
                "Edge-finding ({}) raises the earliest start of task {} to {update}",
                Direction::NAME,
                bounds.task
            );
            Direction::update_earliest_start(&parameters.tasks[bounds.task], update, context)?;
        }
    }

    Ok(())
}

/// Returns, for every position in `sorted_by_lct`, the largest update for resource usage
/// `resource_usage` up to that position; [`NEG_INF`] indicates that there is no update.
fn compute_updates(
    tasks: &[TaskBounds],
    sorted_by_lct: &[usize],
    capacity: i64,
    resource_usage: i32,
) -> Vec<i64> {
    let resource_usage = resource_usage as i64;
    let mut theta_tree = ThetaTree::new(tasks, capacity);
    let mut update = NEG_INF;

    sorted_by_lct
        .iter()
        .map(|&j| {
            theta_tree.enable(j, resource_usage);

            let bound = (capacity - resource_usage) * tasks[j].lct as i64;
            let envelope = theta_tree.calc_envlc(bound);
            if envelope != NEG_INF {
                let difference = <i64 as NumExt>::div_ceil(envelope - bound, resource_usage);
                update = update.max(difference);
            }

            update
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::propagation::PropagatorId;
    use crate::engine::variables::DomainId;
    use crate::engine::TestSolver;
    use crate::propagators::cumulative::ArgTask;
    use crate::propagators::cumulative::Forward;
    use crate::propagators::cumulative::Reversed;
    use crate::propagators::CumulativePropagatorOptions;

    fn parameters(
        solver: &mut TestSolver,
        tasks: &[((i32, i32), i32, i32)],
        capacity: i32,
    ) -> CumulativeParameters<DomainId, DomainId, DomainId, DomainId> {
        let arg_tasks = tasks
            .iter()
            .map(|&((est, lst), duration, resource_usage)| ArgTask {
                start_time: solver.new_variable(est, lst),
                processing_time: solver.new_variable(duration, duration),
                resource_usage: solver.new_variable(resource_usage, resource_usage),
                presence: None,
            })
            .collect::<Vec<_>>();
        let capacity = solver.new_variable(capacity, capacity);
        CumulativeParameters::new(&arg_tasks, capacity, CumulativePropagatorOptions::default())
    }

    #[test]
    fn energy_overload_is_detected() {
        let mut solver = TestSolver::default();
        let parameters = parameters(
            &mut solver,
            &[((0, 2), 2, 2), ((0, 2), 2, 2), ((0, 2), 2, 1)],
            2,
        );

        let mut context = PropagationContextMut::new(&mut solver.assignments, PropagatorId(0));
        let result = capacitated_edge_finding::<Forward, _, _, _, _>(&mut context, &parameters);

        assert_eq!(
            result,
            Err(Inconsistency::Conflict(PropagatorConflict {
                propagator: PropagatorId(0),
                reason: ConflictReason::EnergyOverload,
            }))
        );
    }

    #[test]
    fn task_is_pushed_after_saturating_tasks() {
        let mut solver = TestSolver::default();
        let parameters = parameters(
            &mut solver,
            &[((0, 2), 2, 2), ((0, 2), 2, 2), ((0, 10), 2, 1)],
            2,
        );

        let mut context = PropagationContextMut::new(&mut solver.assignments, PropagatorId(0));
        capacitated_edge_finding::<Forward, _, _, _, _>(&mut context, &parameters)
            .expect("No conflict");
        capacitated_edge_finding::<Reversed, _, _, _, _>(&mut context, &parameters)
            .expect("No conflict");

        let start = parameters.tasks[2].start_variable;
        assert_eq!(solver.lower_bound(start), 4);
        assert_eq!(solver.upper_bound(start), 10);
    }

    #[test]
    fn reversed_direction_tightens_latest_start() {
        let mut solver = TestSolver::default();
        // The mirror image of `task_is_pushed_after_saturating_tasks` around time 7
        let parameters = parameters(
            &mut solver,
            &[((3, 5), 2, 2), ((3, 5), 2, 2), ((-5, 5), 2, 1)],
            2,
        );

        let mut context = PropagationContextMut::new(&mut solver.assignments, PropagatorId(0));
        capacitated_edge_finding::<Reversed, _, _, _, _>(&mut context, &parameters)
            .expect("No conflict");

        let start = parameters.tasks[2].start_variable;
        assert_eq!(solver.lower_bound(start), -5);
        assert_eq!(solver.upper_bound(start), 1);
    }

    #[test]
    fn tasks_without_energy_are_ignored() {
        let mut solver = TestSolver::default();
        let parameters = parameters(
            &mut solver,
            &[((0, 2), 2, 2), ((0, 2), 2, 2), ((0, 10), 0, 1), ((0, 10), 2, 0)],
            2,
        );

        let mut context = PropagationContextMut::new(&mut solver.assignments, PropagatorId(0));
        capacitated_edge_finding::<Forward, _, _, _, _>(&mut context, &parameters)
            .expect("No conflict");

        assert_eq!(solver.lower_bound(parameters.tasks[2].start_variable), 0);
        assert_eq!(solver.lower_bound(parameters.tasks[3].start_variable), 0);
    }
}
