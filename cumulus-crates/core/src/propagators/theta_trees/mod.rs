//! Balanced binary trees over tasks sorted by earliest start time, which are used to compute
//! (capacitated) envelopes and earliest completion times of sets of tasks in logarithmic time.
//!
//! All trees are flat arrays in which the children of node `i` are stored at `2i + 1` and
//! `2i + 2`. The leaves occupy the last slots of the array and are bound to the tasks in order of
//! their earliest start time. A tree is built from scratch for every round of propagation and is
//! only mutated within that round.
//!
//! # Bibliography
//! \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
//! Sciences, vol. 18, no. 2, pp. 159–202, 2008.
//!
//! \[2\] P. Vilím, ‘Edge finding filtering algorithm for discrete cumulative resources in O(kn log
//! n)’, in Principles and Practice of Constraint Programming-CP 2009: 15th International
//! Conference, CP 2009 Lisbon, Portugal, September 20-24, 2009 Proceedings 15, 2009, pp. 802–816.
mod implicit_tree;
mod theta_lambda_tree;
mod theta_lambda_unary_tree;
mod theta_tree;

pub(crate) use implicit_tree::add_absorbing;
pub(crate) use implicit_tree::NEG_INF;
pub(crate) use theta_lambda_tree::ThetaLambdaTree;
pub(crate) use theta_lambda_unary_tree::ThetaLambdaUnaryTree;
pub(crate) use theta_tree::ThetaTree;

use crate::propagators::cumulative::TaskBounds;

/// Sorts the provided tasks by earliest start time and returns, for every leaf, the index of its
/// task in `tasks` together with, for every task, the index of its leaf.
fn sort_into_leaves(tasks: &[TaskBounds]) -> (Vec<usize>, Vec<usize>) {
    let mut task_of_leaf = (0..tasks.len()).collect::<Vec<_>>();
    task_of_leaf.sort_by_key(|&task| (tasks[task].est, task));

    let mut leaf_of_task = vec![0; tasks.len()];
    for (leaf, &task) in task_of_leaf.iter().enumerate() {
        leaf_of_task[task] = leaf;
    }

    (task_of_leaf, leaf_of_task)
}

/// Returns the candidate with the largest value, preferring candidates which borrow a leaf from
/// Lambda on ties.
fn select_responsible<const N: usize>(candidates: [(i64, Option<usize>); N]) -> (i64, Option<usize>) {
    let mut best = candidates[0];
    for candidate in candidates.into_iter().skip(1) {
        if candidate.0 > best.0 || (candidate.0 == best.0 && best.1.is_none()) {
            best = candidate;
        }
    }
    best
}
