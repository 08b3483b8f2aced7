use super::add_absorbing;
use super::implicit_tree::Aggregate;
use super::implicit_tree::ImplicitTree;
use super::select_responsible;
use super::sort_into_leaves;
use super::NEG_INF;
use crate::propagators::cumulative::TaskBounds;

/// The aggregate of a node in the [`ThetaLambdaTree`].
///
/// The `responsible` fields contain the leaf (from Lambda) which is used to obtain the
/// corresponding Lambda value, or [`None`] if the value does not depend on a leaf from Lambda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct EnergyNode {
    energy: i64,
    envelope: i64,
    energy_lambda: i64,
    envelope_lambda: i64,
    responsible_energy_lambda: Option<usize>,
    responsible_envelope_lambda: Option<usize>,
}

impl Aggregate for EnergyNode {
    const EMPTY: Self = EnergyNode {
        energy: 0,
        envelope: NEG_INF,
        energy_lambda: 0,
        envelope_lambda: NEG_INF,
        responsible_energy_lambda: None,
        responsible_envelope_lambda: None,
    };

    fn combine(left: &Self, right: &Self) -> Self {
        let (energy_lambda, responsible_energy_lambda) = select_responsible([
            (
                left.energy_lambda + right.energy,
                left.responsible_energy_lambda,
            ),
            (
                left.energy + right.energy_lambda,
                right.responsible_energy_lambda,
            ),
        ]);
        let (envelope_lambda, responsible_envelope_lambda) = select_responsible([
            (right.envelope_lambda, right.responsible_envelope_lambda),
            (
                add_absorbing(left.envelope, right.energy_lambda),
                right.responsible_energy_lambda,
            ),
            (
                add_absorbing(left.envelope_lambda, right.energy),
                left.responsible_envelope_lambda,
            ),
        ]);

        EnergyNode {
            energy: left.energy + right.energy,
            envelope: add_absorbing(left.envelope, right.energy).max(right.envelope),
            energy_lambda,
            envelope_lambda,
            responsible_energy_lambda,
            responsible_envelope_lambda,
        }
    }
}

/// A Theta-Lambda tree for cumulative resources (see \[2\], Section 5).
///
/// Every task is either in Theta, in Lambda or in neither of the two sets. The root provides the
/// envelope of Theta and the largest envelope which can be obtained by adding at most one task
/// from Lambda to Theta, together with that task.
#[derive(Debug, Clone)]
pub(crate) struct ThetaLambdaTree {
    tree: ImplicitTree<EnergyNode>,
    capacity: i64,
    tasks: Vec<TaskBounds>,
    leaf_of_task: Vec<usize>,
    task_of_leaf: Vec<usize>,
}

impl ThetaLambdaTree {
    /// Creates a tree over the provided tasks of a resource with the given capacity in which all
    /// tasks are in Theta.
    pub(crate) fn new(tasks: &[TaskBounds], capacity: i64) -> Self {
        let (task_of_leaf, leaf_of_task) = sort_into_leaves(tasks);

        let mut theta_lambda_tree = ThetaLambdaTree {
            tree: ImplicitTree::new(tasks.len()),
            capacity,
            tasks: tasks.to_vec(),
            leaf_of_task,
            task_of_leaf,
        };

        let leaves = theta_lambda_tree
            .task_of_leaf
            .iter()
            .map(|&task| theta_lambda_tree.theta_leaf(task))
            .collect::<Vec<_>>();
        theta_lambda_tree.tree.set_leaves(leaves);

        theta_lambda_tree
    }

    fn theta_leaf(&self, task: usize) -> EnergyNode {
        let bounds = &self.tasks[task];
        let envelope = self.capacity * bounds.est as i64 + bounds.energy;
        EnergyNode {
            energy: bounds.energy,
            envelope,
            energy_lambda: bounds.energy,
            envelope_lambda: envelope,
            responsible_energy_lambda: None,
            responsible_envelope_lambda: None,
        }
    }

    /// Moves the task at index `task` from Theta to Lambda.
    pub(crate) fn move_to_lambda(&mut self, task: usize) {
        let bounds = &self.tasks[task];
        let leaf = self.leaf_of_task[task];
        let node = EnergyNode {
            energy: 0,
            envelope: NEG_INF,
            energy_lambda: bounds.energy,
            envelope_lambda: self.capacity * bounds.est as i64 + bounds.energy,
            responsible_energy_lambda: Some(leaf),
            responsible_envelope_lambda: Some(leaf),
        };
        self.tree.set_leaf(leaf, node);
    }

    /// Removes the task at index `task` from Lambda (or Theta).
    pub(crate) fn remove_from_lambda(&mut self, task: usize) {
        self.tree.set_leaf(self.leaf_of_task[task], EnergyNode::EMPTY);
    }

    pub(crate) fn envelope(&self) -> i64 {
        self.tree.root().envelope
    }

    pub(crate) fn envelope_lambda(&self) -> i64 {
        self.tree.root().envelope_lambda
    }

    /// The index of the task from Lambda which is responsible for
    /// [`ThetaLambdaTree::envelope_lambda`], if there is such a task.
    pub(crate) fn responsible_envelope_lambda(&self) -> Option<usize> {
        self.tree
            .root()
            .responsible_envelope_lambda
            .map(|leaf| self.task_of_leaf[leaf])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(task: usize, est: i32, duration: i32, resource_usage: i32) -> TaskBounds {
        TaskBounds {
            task,
            est,
            lst: est,
            ect: est + duration,
            lct: est + duration,
            duration,
            resource_usage,
            energy: duration as i64 * resource_usage as i64,
        }
    }

    fn envelope(tasks: &[TaskBounds], set: &[usize], capacity: i64) -> i64 {
        set.iter()
            .map(|&k| {
                let energy: i64 = set
                    .iter()
                    .filter(|&&l| tasks[l].est >= tasks[k].est)
                    .map(|&l| tasks[l].energy)
                    .sum();
                capacity * tasks[k].est as i64 + energy
            })
            .max()
            .unwrap_or(NEG_INF)
    }

    fn brute_force_envelope_lambda(
        tasks: &[TaskBounds],
        theta: &[usize],
        lambda: &[usize],
        capacity: i64,
    ) -> i64 {
        lambda
            .iter()
            .map(|&i| {
                let mut set = theta.to_vec();
                set.push(i);
                envelope(tasks, &set, capacity)
            })
            .chain(std::iter::once(envelope(tasks, theta, capacity)))
            .max()
            .unwrap_or(NEG_INF)
    }

    fn tasks() -> Vec<TaskBounds> {
        vec![
            task(0, 4, 3, 2),
            task(1, 0, 5, 1),
            task(2, 1, 2, 3),
            task(3, 7, 4, 1),
            task(4, 3, 1, 2),
            task(5, 2, 2, 2),
        ]
    }

    #[test]
    fn initial_tree_contains_all_tasks_in_theta() {
        let tasks = tasks();
        let capacity = 3;
        let tree = ThetaLambdaTree::new(&tasks, capacity);

        let all = (0..tasks.len()).collect::<Vec<_>>();
        assert_eq!(tree.envelope(), envelope(&tasks, &all, capacity));
        assert_eq!(tree.envelope_lambda(), tree.envelope());
        assert_eq!(tree.responsible_envelope_lambda(), None);
    }

    #[test]
    fn envelope_lambda_matches_brute_force() {
        let tasks = tasks();
        let capacity = 3;
        let mut tree = ThetaLambdaTree::new(&tasks, capacity);

        let mut theta = (0..tasks.len()).collect::<Vec<_>>();
        let mut lambda = vec![];

        for index in [3, 0, 4] {
            tree.move_to_lambda(index);
            theta.retain(|&t| t != index);
            lambda.push(index);

            assert_eq!(tree.envelope(), envelope(&tasks, &theta, capacity));
            assert_eq!(
                tree.envelope_lambda(),
                brute_force_envelope_lambda(&tasks, &theta, &lambda, capacity)
            );
        }

        tree.remove_from_lambda(0);
        lambda.retain(|&t| t != 0);
        assert_eq!(
            tree.envelope_lambda(),
            brute_force_envelope_lambda(&tasks, &theta, &lambda, capacity)
        );
    }

    #[test]
    fn responsible_task_attains_envelope_lambda() {
        let tasks = tasks();
        let capacity = 3;
        let mut tree = ThetaLambdaTree::new(&tasks, capacity);

        let mut theta = (0..tasks.len()).collect::<Vec<_>>();
        for index in [3, 1, 5] {
            tree.move_to_lambda(index);
            theta.retain(|&t| t != index);

            if tree.envelope_lambda() > tree.envelope() {
                let responsible = tree
                    .responsible_envelope_lambda()
                    .expect("a task from Lambda increases the envelope");
                let mut set = theta.clone();
                set.push(responsible);
                assert_eq!(
                    envelope(&tasks, &set, capacity),
                    tree.envelope_lambda()
                );
            }
        }
    }
}
