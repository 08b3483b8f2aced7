use super::add_absorbing;
use super::implicit_tree::Aggregate;
use super::implicit_tree::ImplicitTree;
use super::select_responsible;
use super::sort_into_leaves;
use super::NEG_INF;
use crate::propagators::cumulative::TaskBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Node {
    sum_of_processing_times: i64,
    ect: i64,
    sum_of_processing_times_bar: i64,
    ect_bar: i64,
    responsible_processing_time_bar: Option<usize>,
    responsible_ect_bar: Option<usize>,
}

impl Aggregate for Node {
    const EMPTY: Self = Node {
        sum_of_processing_times: 0,
        ect: NEG_INF,
        sum_of_processing_times_bar: 0,
        ect_bar: NEG_INF,
        responsible_processing_time_bar: None,
        responsible_ect_bar: None,
    };

    fn combine(left: &Self, right: &Self) -> Self {
        let (sum_of_processing_times_bar, responsible_processing_time_bar) =
            select_responsible([
                (
                    left.sum_of_processing_times_bar + right.sum_of_processing_times,
                    left.responsible_processing_time_bar,
                ),
                (
                    left.sum_of_processing_times + right.sum_of_processing_times_bar,
                    right.responsible_processing_time_bar,
                ),
            ]);
        let (ect_bar, responsible_ect_bar) = select_responsible([
            (right.ect_bar, right.responsible_ect_bar),
            (
                add_absorbing(left.ect, right.sum_of_processing_times_bar),
                right.responsible_processing_time_bar,
            ),
            (
                add_absorbing(left.ect_bar, right.sum_of_processing_times),
                left.responsible_ect_bar,
            ),
        ]);

        Node {
            sum_of_processing_times: left.sum_of_processing_times + right.sum_of_processing_times,
            ect: add_absorbing(left.ect, right.sum_of_processing_times).max(right.ect),
            sum_of_processing_times_bar,
            ect_bar,
            responsible_processing_time_bar,
            responsible_ect_bar,
        }
    }
}

/// A Theta-Lambda tree for unary resources, as described in \[1\], Section 2.3.
///
/// Tasks start outside of both sets; the tree supports the operations of the overload checking,
/// detectable precedences, not-last and edge-finding rules, which all require both adding tasks
/// to and removing tasks from Theta.
#[derive(Debug, Clone)]
pub(crate) struct ThetaLambdaUnaryTree {
    tree: ImplicitTree<Node>,
    tasks: Vec<TaskBounds>,
    leaf_of_task: Vec<usize>,
    task_of_leaf: Vec<usize>,
}

impl ThetaLambdaUnaryTree {
    /// Creates an empty tree over the provided tasks.
    pub(crate) fn new(tasks: &[TaskBounds]) -> Self {
        let (task_of_leaf, leaf_of_task) = sort_into_leaves(tasks);

        ThetaLambdaUnaryTree {
            tree: ImplicitTree::new(tasks.len()),
            tasks: tasks.to_vec(),
            leaf_of_task,
            task_of_leaf,
        }
    }

    /// Adds the task at index `task` to Theta.
    pub(crate) fn add_to_theta(&mut self, task: usize) {
        let bounds = &self.tasks[task];
        let processing_time = bounds.duration as i64;
        let ect = bounds.est as i64 + processing_time;
        let node = Node {
            sum_of_processing_times: processing_time,
            ect,
            sum_of_processing_times_bar: processing_time,
            ect_bar: ect,
            responsible_processing_time_bar: None,
            responsible_ect_bar: None,
        };
        self.tree.set_leaf(self.leaf_of_task[task], node);
    }

    /// Removes the task at index `task` from Theta.
    pub(crate) fn remove_from_theta(&mut self, task: usize) {
        self.tree.set_leaf(self.leaf_of_task[task], Node::EMPTY);
    }

    /// Moves the task at index `task` from Theta to Lambda.
    pub(crate) fn move_to_lambda(&mut self, task: usize) {
        let bounds = &self.tasks[task];
        let leaf = self.leaf_of_task[task];
        let processing_time = bounds.duration as i64;
        let node = Node {
            sum_of_processing_times: 0,
            ect: NEG_INF,
            sum_of_processing_times_bar: processing_time,
            ect_bar: bounds.est as i64 + processing_time,
            responsible_processing_time_bar: Some(leaf),
            responsible_ect_bar: Some(leaf),
        };
        self.tree.set_leaf(leaf, node);
    }

    /// Removes the task at index `task` from Lambda.
    pub(crate) fn remove_from_lambda(&mut self, task: usize) {
        self.tree.set_leaf(self.leaf_of_task[task], Node::EMPTY);
    }

    /// The earliest completion time of the tasks in Theta.
    pub(crate) fn ect(&self) -> i64 {
        self.tree.root().ect
    }

    /// The largest earliest completion time of Theta extended with at most one task of Lambda.
    pub(crate) fn ect_bar(&self) -> i64 {
        self.tree.root().ect_bar
    }

    /// The index of the task from Lambda which is responsible for
    /// [`ThetaLambdaUnaryTree::ect_bar`], if there is such a task.
    pub(crate) fn responsible_ect_bar(&self) -> Option<usize> {
        self.tree
            .root()
            .responsible_ect_bar
            .map(|leaf| self.task_of_leaf[leaf])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(task: usize, est: i32, duration: i32) -> TaskBounds {
        TaskBounds {
            task,
            est,
            lst: est,
            ect: est + duration,
            lct: est + duration,
            duration,
            resource_usage: 1,
            energy: duration as i64,
        }
    }

    fn brute_force_ect(tasks: &[TaskBounds], set: &[usize]) -> i64 {
        set.iter()
            .map(|&k| {
                let processing_time: i64 = set
                    .iter()
                    .filter(|&&l| tasks[l].est >= tasks[k].est)
                    .map(|&l| tasks[l].duration as i64)
                    .sum();
                tasks[k].est as i64 + processing_time
            })
            .max()
            .unwrap_or(NEG_INF)
    }

    #[test]
    fn ect_of_empty_theta_is_negative_infinity() {
        let tasks = vec![task(0, 0, 5), task(1, 25, 9)];
        let tree = ThetaLambdaUnaryTree::new(&tasks);

        assert_eq!(tree.ect(), NEG_INF);
        assert_eq!(tree.ect_bar(), NEG_INF);
    }

    #[test]
    fn tree_built_correctly() {
        let tasks = vec![
            task(0, 0, 5),
            task(1, 25, 9),
            task(2, 30, 5),
            task(3, 32, 10),
        ];
        let mut tree = ThetaLambdaUnaryTree::new(&tasks);
        for index in 0..tasks.len() {
            tree.add_to_theta(index);
        }

        assert_eq!(tree.ect(), 49);

        tree.move_to_lambda(3);
        assert_eq!(tree.ect(), 39);
        assert_eq!(tree.ect_bar(), 49);
        assert_eq!(tree.responsible_ect_bar(), Some(3));
    }

    #[test]
    fn ect_bar_matches_brute_force() {
        let tasks = vec![
            task(0, 3, 4),
            task(1, 0, 2),
            task(2, 9, 1),
            task(3, 2, 6),
            task(4, 12, 3),
        ];
        let mut tree = ThetaLambdaUnaryTree::new(&tasks);
        let mut theta = vec![];
        for index in 0..tasks.len() {
            tree.add_to_theta(index);
            theta.push(index);
            assert_eq!(tree.ect(), brute_force_ect(&tasks, &theta));
        }

        let mut lambda = vec![];
        for index in [1, 4] {
            tree.move_to_lambda(index);
            theta.retain(|&t| t != index);
            lambda.push(index);
        }
        tree.remove_from_theta(2);
        theta.retain(|&t| t != 2);

        let expected = lambda
            .iter()
            .map(|&i| {
                let mut set = theta.clone();
                set.push(i);
                (brute_force_ect(&tasks, &set), i)
            })
            .max()
            .expect("lambda is not empty");

        assert_eq!(tree.ect(), brute_force_ect(&tasks, &theta));
        assert_eq!(tree.ect_bar(), expected.0);
        if expected.0 > tree.ect() {
            let responsible = tree.responsible_ect_bar().expect("lambda increases ect");
            let mut set = theta.clone();
            set.push(responsible);
            assert_eq!(brute_force_ect(&tasks, &set), expected.0);
        }
    }
}
