use super::add_absorbing;
use super::implicit_tree::Aggregate;
use super::implicit_tree::ImplicitTree;
use super::implicit_tree::TreeLayout;
use super::sort_into_leaves;
use super::NEG_INF;
use crate::propagators::cumulative::TaskBounds;

/// The aggregate of a node in the [`ThetaTree`]; it describes the set of enabled tasks in the
/// subtree of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct EnvelopeNode {
    /// The sum of the energies of the enabled tasks.
    energy: i64,
    /// The largest `C * est_Ω + e_Ω` over the subsets `Ω` of the enabled tasks.
    envelope: i64,
    /// The largest `(C - c) * est_Ω + e_Ω` over the subsets `Ω` of the enabled tasks.
    envelope_c: i64,
}

impl Aggregate for EnvelopeNode {
    const EMPTY: Self = EnvelopeNode {
        energy: 0,
        envelope: NEG_INF,
        envelope_c: NEG_INF,
    };

    fn combine(left: &Self, right: &Self) -> Self {
        EnvelopeNode {
            energy: left.energy + right.energy,
            envelope: add_absorbing(left.envelope, right.energy).max(right.envelope),
            envelope_c: add_absorbing(left.envelope_c, right.energy).max(right.envelope_c),
        }
    }
}

/// A Theta-tree for cumulative resources (see \[2\], Section 3.2) which additionally keeps track
/// of the envelopes for a reduced capacity `C - c`; used to compute the update values of the
/// capacitated edge-finding rule for a single resource usage `c`.
#[derive(Debug, Clone)]
pub(crate) struct ThetaTree {
    tree: ImplicitTree<EnvelopeNode>,
    capacity: i64,
    tasks: Vec<TaskBounds>,
    leaf_of_task: Vec<usize>,
}

impl ThetaTree {
    /// Creates a tree over the provided tasks of a resource with the given capacity in which no
    /// task is enabled.
    pub(crate) fn new(tasks: &[TaskBounds], capacity: i64) -> Self {
        let (_, leaf_of_task) = sort_into_leaves(tasks);

        ThetaTree {
            tree: ImplicitTree::new(tasks.len()),
            capacity,
            tasks: tasks.to_vec(),
            leaf_of_task,
        }
    }

    /// Adds the task at index `task` to the set of enabled tasks, where `resource_usage` is the
    /// amount `c` by which the capacity is reduced for the `c`-envelope.
    pub(crate) fn enable(&mut self, task: usize, resource_usage: i64) {
        let bounds = &self.tasks[task];
        let est = bounds.est as i64;
        let leaf = EnvelopeNode {
            energy: bounds.energy,
            envelope: self.capacity * est + bounds.energy,
            envelope_c: (self.capacity - resource_usage) * est + bounds.energy,
        };
        self.tree.set_leaf(self.leaf_of_task[task], leaf);
    }

    #[cfg(test)]
    pub(crate) fn disable(&mut self, task: usize) {
        self.tree
            .set_leaf(self.leaf_of_task[task], EnvelopeNode::EMPTY);
    }

    #[cfg(test)]
    pub(crate) fn energy(&self) -> i64 {
        self.tree.root().energy
    }

    #[cfg(test)]
    pub(crate) fn envelope(&self) -> i64 {
        self.tree.root().envelope
    }

    /// Computes the envelope of the enabled tasks with respect to the `bound` of the reduced
    /// capacity, as described in \[2\], Algorithm 2.
    ///
    /// The `bound` is `(C - c) * lct_j`. The method first descends to the leaf `m` at which the
    /// enabled tasks split into `α = {l ≤ m}` and `β = {l > m}` such that the `c`-envelope of `α`
    /// exceeds the `bound`, and returns `Env(α) + e_β`. If no enabled task has a `c`-envelope
    /// exceeding the `bound` then [`NEG_INF`] is returned.
    pub(crate) fn calc_envlc(&self, bound: i64) -> i64 {
        if self.tree.root().envelope_c <= bound {
            return NEG_INF;
        }

        let layout = self.tree.layout();
        let mut remaining = bound;
        let mut position = 0;
        while !layout.is_leaf(position) {
            let right = self.tree.node(TreeLayout::right_child(position));
            if right.envelope_c > remaining {
                position = TreeLayout::right_child(position);
            } else {
                remaining -= right.energy;
                position = TreeLayout::left_child(position);
            }
        }

        let leaf = self.tree.node(position);
        let mut alpha_envelope = leaf.envelope;
        let mut alpha_energy = leaf.energy;
        let mut beta_energy = 0;

        while position != 0 {
            let parent = TreeLayout::parent(position);
            if position == TreeLayout::right_child(parent) {
                let left = self.tree.node(TreeLayout::left_child(parent));
                alpha_envelope = add_absorbing(left.envelope, alpha_energy).max(alpha_envelope);
                alpha_energy += left.energy;
            } else {
                beta_energy += self.tree.node(TreeLayout::right_child(parent)).energy;
            }
            position = parent;
        }

        add_absorbing(alpha_envelope, beta_energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::cumulative::TaskBounds;

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

    /// The largest `capacity * est_Ω + e_Ω` over all non-empty subsets `Ω`; only subsets of the
    /// form `{l : est_l >= est_k}` need to be considered.
    fn brute_force_envelope(tasks: &[TaskBounds], enabled: &[usize], capacity: i64) -> i64 {
        enabled
            .iter()
            .map(|&k| {
                let energy: i64 = enabled
                    .iter()
                    .filter(|&&l| tasks[l].est >= tasks[k].est)
                    .map(|&l| tasks[l].energy)
                    .sum();
                capacity * tasks[k].est as i64 + energy
            })
            .max()
            .unwrap_or(NEG_INF)
    }

    #[test]
    fn envelope_of_empty_tree_is_negative_infinity() {
        let tasks = vec![task(0, 0, 2, 1), task(1, 3, 2, 1)];
        let tree = ThetaTree::new(&tasks, 2);

        assert_eq!(tree.envelope(), NEG_INF);
        assert_eq!(tree.energy(), 0);
    }

    #[test]
    fn envelope_follows_enabled_tasks() {
        let tasks = vec![
            task(0, 5, 3, 2),
            task(1, 0, 4, 1),
            task(2, 2, 2, 3),
            task(3, 9, 1, 2),
            task(4, 1, 6, 1),
        ];
        let capacity = 3;
        let mut tree = ThetaTree::new(&tasks, capacity);

        let mut enabled = vec![];
        for index in [3, 0, 4, 1, 2] {
            tree.enable(index, 1);
            enabled.push(index);
            assert_eq!(
                tree.envelope(),
                brute_force_envelope(&tasks, &enabled, capacity)
            );
        }

        tree.disable(4);
        enabled.retain(|&index| index != 4);
        assert_eq!(
            tree.envelope(),
            brute_force_envelope(&tasks, &enabled, capacity)
        );
        assert_eq!(
            tree.energy(),
            enabled.iter().map(|&i| tasks[i].energy).sum::<i64>()
        );
    }

    #[test]
    fn calc_envlc_splits_at_the_responsible_leaf() {
        // Leaves in est order: est 0 (e 4), est 2 (e 6), est 5 (e 6).
        let tasks = vec![task(0, 0, 4, 1), task(1, 2, 3, 2), task(2, 5, 3, 2)];
        let capacity = 2;
        let resource_usage = 1;
        let mut tree = ThetaTree::new(&tasks, capacity);
        for index in 0..3 {
            tree.enable(index, resource_usage);
        }

        // The c-envelopes of the suffixes are 16, 14 and 11; with bound 13 the split is after the
        // second leaf, so Env(alpha) = 10 and e_beta = 6.
        assert_eq!(tree.calc_envlc(13), 16);
        // With bound 15 the split is after the first leaf.
        assert_eq!(tree.calc_envlc(15), 4 + 12);
        // No c-envelope exceeds 16.
        assert_eq!(tree.calc_envlc(16), NEG_INF);
    }
}
