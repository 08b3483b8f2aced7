use std::collections::VecDeque;

use log::trace;

use crate::basic_types::ConflictReason;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::propagators::cumulative::CumulativeParameters;
use crate::propagators::cumulative::Forward;
use crate::propagators::cumulative::Reversed;
use crate::propagators::cumulative::TaskBounds;
use crate::propagators::cumulative::TimeDirection;
use crate::propagators::theta_trees::ThetaLambdaUnaryTree;
use crate::propagators::theta_trees::NEG_INF;

/// Applies the filtering rules for unary resources of \[1\] to the tasks of the cumulative
/// constraint which cannot overlap with each other, i.e. the present tasks with a non-zero
/// processing time whose minimal resource usage is larger than half of the capacity.
///
/// The rules (overload checking, detectable precedences, not-last and edge-finding) are applied
/// in both directions until none of them changes a domain; in the [`Reversed`] direction the
/// not-last rule is the not-first rule.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
/// Sciences, vol. 18, no. 2, pp. 159–202, 2008.
pub(crate) fn unary_edge_finding<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
) -> PropagationStatusCP {
    loop {
        let num_domain_changes = context.num_domain_changes();

        apply_unary_rules::<Forward, _, _, _, _>(context, parameters)?;
        apply_unary_rules::<Reversed, _, _, _, _>(context, parameters)?;

        if context.num_domain_changes() == num_domain_changes {
            return Ok(());
        }
    }
}

fn apply_unary_rules<
    Direction: TimeDirection,
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
) -> PropagationStatusCP {
    let tasks = unary_tasks::<Direction, _, _, _, _>(context, parameters);
    overload_check(context, &tasks)?;

    let tasks = unary_tasks::<Direction, _, _, _, _>(context, parameters);
    detectable_precedences::<Direction, _, _, _, _>(context, parameters, &tasks)?;

    let tasks = unary_tasks::<Direction, _, _, _, _>(context, parameters);
    not_last::<Direction, _, _, _, _>(context, parameters, &tasks)?;

    let tasks = unary_tasks::<Direction, _, _, _, _>(context, parameters);
    edge_finding::<Direction, _, _, _, _>(context, parameters, &tasks)
}

/// Returns the bounds of the tasks which pairwise cannot overlap.
fn unary_tasks<
    Direction: TimeDirection,
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
) -> Vec<TaskBounds> {
    let capacity = context.upper_bound(&parameters.capacity) as i64;
    parameters
        .tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| {
            task.is_present(context)
                && task.exists(context)
                && 2 * context.lower_bound(&task.resource_usage) as i64 > capacity
        })
        .map(|(index, task)| Direction::bounds(index, task, context.as_readonly()))
        .collect()
}

fn unary_conflict(context: &PropagationContextMut) -> Inconsistency {
    Inconsistency::Conflict(PropagatorConflict {
        propagator: context.propagator_id(),
        reason: ConflictReason::UnaryOverload,
    })
}

/// Returns the indices of the tasks sorted (in non-decreasing order) by the provided key.
fn sorted_by<Key: Ord>(tasks: &[TaskBounds], key: impl Fn(&TaskBounds) -> Key) -> Vec<usize> {
    let mut sorted = (0..tasks.len()).collect::<Vec<_>>();
    sorted.sort_by_key(|&task| (key(&tasks[task]), task));
    sorted
}

/// Checks whether the tasks which have to complete by `lct_j` can be processed before `lct_j`,
/// for every task `j`.
fn overload_check(context: &PropagationContextMut, tasks: &[TaskBounds]) -> PropagationStatusCP {
    let mut tree = ThetaLambdaUnaryTree::new(tasks);

    for j in sorted_by(tasks, |task| task.lct) {
        tree.add_to_theta(j);
        if tree.ect() > tasks[j].lct as i64 {
            return Err(unary_conflict(context));
        }
    }

    Ok(())
}

/// Applies the detectable precedences rule: if `ect_i > lst_j` then `j` has to be processed
/// before `i`, and `i` cannot start before the earliest completion time of all of its detectable
/// predecessors.
fn detectable_precedences<
    Direction: TimeDirection,
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
    tasks: &[TaskBounds],
) -> PropagationStatusCP {
    let mut tree = ThetaLambdaUnaryTree::new(tasks);
    let mut in_theta = vec![false; tasks.len()];
    let mut queue: VecDeque<usize> = sorted_by(tasks, |task| task.lst).into();
    let mut updates = Vec::new();

    for i in sorted_by(tasks, |task| task.ect) {
        while let Some(&j) = queue.front() {
            if tasks[i].ect <= tasks[j].lst {
                break;
            }
            tree.add_to_theta(j);
            in_theta[j] = true;
            let _ = queue.pop_front();
        }

        // The predecessors of i are the tasks in Θ \ {i}
        if in_theta[i] {
            tree.remove_from_theta(i);
        }
        let ect = tree.ect();
        if in_theta[i] {
            tree.add_to_theta(i);
        }

        if ect != NEG_INF && ect > tasks[i].est as i64 {
            updates.push((i, ect));
        }
    }

    for (i, bound) in updates {
        trace!(
            "Detectable precedences ({}) raise the earliest start of task {} to {bound}",
            Direction::NAME,
            tasks[i].task
        );
        Direction::update_earliest_start(&parameters.tasks[tasks[i].task], bound, context)?;
    }

    Ok(())
}

/// Applies the not-last rule: if the tasks `Θ` which have to start before `lct_i` cannot be
/// completed before `lst_i` then `i` cannot be the last task of `Θ ∪ {i}`, and thus it has to
/// complete before the latest start time of one of the tasks in `Θ`.
fn not_last<
    Direction: TimeDirection,
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
    tasks: &[TaskBounds],
) -> PropagationStatusCP {
    let mut tree = ThetaLambdaUnaryTree::new(tasks);
    let mut in_theta = vec![false; tasks.len()];
    let mut queue: VecDeque<usize> = sorted_by(tasks, |task| task.lst).into();
    let mut last_added: Option<usize> = None;
    let mut updates = Vec::new();

    for i in sorted_by(tasks, |task| task.lct) {
        while let Some(&j) = queue.front() {
            if tasks[i].lct <= tasks[j].lst {
                break;
            }
            tree.add_to_theta(j);
            in_theta[j] = true;
            last_added = Some(j);
            let _ = queue.pop_front();
        }

        if in_theta[i] {
            tree.remove_from_theta(i);
        }
        let ect = tree.ect();
        if in_theta[i] {
            tree.add_to_theta(i);
        }

        // Θ \ {i} is non-empty if its ect is finite, so a task has been added
        if let Some(j) = last_added {
            if ect > tasks[i].lst as i64 && tasks[j].lst < tasks[i].lct {
                updates.push((i, tasks[j].lst));
            }
        }
    }

    for (i, bound) in updates {
        trace!(
            "Not-last ({}) lowers the latest completion of task {} to {bound}",
            Direction::NAME,
            tasks[i].task
        );
        Direction::update_latest_completion(
            &parameters.tasks[tasks[i].task],
            bound as i64,
            context,
        )?;
    }

    Ok(())
}

/// Applies the edge-finding rule: if `Θ ∪ {i}` cannot be completed before the latest completion
/// time of `Θ` then `i` has to start after all tasks in `Θ` have completed.
fn edge_finding<
    Direction: TimeDirection,
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
    tasks: &[TaskBounds],
) -> PropagationStatusCP {
    if tasks.is_empty() {
        return Ok(());
    }

    // First we create our Theta-Lambda tree and add all of the tasks to Theta (Lambda is empty at
    // this point)
    let mut theta_lambda_tree = ThetaLambdaUnaryTree::new(tasks);
    for task in 0..tasks.len() {
        theta_lambda_tree.add_to_theta(task);
    }

    // Then sort in non-increasing order of latest completion time
    let mut sorted_tasks = sorted_by(tasks, |task| task.lct);
    sorted_tasks.reverse();

    for (index, &j) in sorted_tasks.iter().enumerate() {
        // `j` is the task in Theta with the largest lct; if Theta cannot complete before that
        // time then the resource is overloaded
        if theta_lambda_tree.ect() > tasks[j].lct as i64 {
            return Err(unary_conflict(context));
        }

        theta_lambda_tree.move_to_lambda(j);

        let Some(&next) = sorted_tasks.get(index + 1) else {
            break;
        };
        let lct_theta = tasks[next].lct as i64;

        // Find the tasks in Lambda for which `ECT(Θ ∪ {i}) > lct_Θ`
        while theta_lambda_tree.ect_bar() > lct_theta {
            let Some(i) = theta_lambda_tree.responsible_ect_bar() else {
                break;
            };

            let bound = theta_lambda_tree.ect();
            if bound > tasks[i].est as i64 {
                trace!(
                    "Edge-finding ({}) raises the earliest start of task {} to {bound}",
                    Direction::NAME,
                    tasks[i].task
                );
                Direction::update_earliest_start(&parameters.tasks[tasks[i].task], bound, context)?;
            }

            theta_lambda_tree.remove_from_lambda(i);
        }
    }

    Ok(())
}
