use std::fmt::Debug;

use crate::cumulus_assert_simple;

/// The value representing minus infinity in the aggregates of the trees; it absorbs through
/// addition (see [`add_absorbing`]).
pub(crate) const NEG_INF: i64 = i64::MIN;

/// Addition in which [`NEG_INF`] is absorbing, i.e. `NEG_INF + x = NEG_INF`.
pub(crate) fn add_absorbing(lhs: i64, rhs: i64) -> i64 {
    if lhs == NEG_INF || rhs == NEG_INF {
        NEG_INF
    } else {
        lhs + rhs
    }
}

/// The aggregate which is stored in every node of an [`ImplicitTree`].
pub(super) trait Aggregate: Copy + Debug {
    /// The neutral aggregate; used for padding and for leaves which do not contribute.
    const EMPTY: Self;

    /// Computes the aggregate of a node from the aggregates of its children, the leaves of
    /// `left` precede those of `right` in time.
    fn combine(left: &Self, right: &Self) -> Self;
}

/// The index arithmetic of a tree with `n` leaves stored in `nextPow2(n) + n - 1` slots.
///
/// The first `nextPow2(n) - 1` slots are the internal nodes, the remaining `n` slots are the
/// leaves. Children which fall outside of the array are treated as [`Aggregate::EMPTY`].
#[derive(Debug, Clone, Copy)]
pub(super) struct TreeLayout {
    number_of_internal_nodes: usize,
    number_of_leaves: usize,
}

impl TreeLayout {
    pub(super) fn new(number_of_leaves: usize) -> Self {
        TreeLayout {
            number_of_internal_nodes: number_of_leaves.max(1).next_power_of_two() - 1,
            number_of_leaves,
        }
    }

    pub(super) fn size(&self) -> usize {
        self.number_of_internal_nodes + self.number_of_leaves
    }

    pub(super) fn leaf_position(&self, leaf: usize) -> usize {
        cumulus_assert_simple!(leaf < self.number_of_leaves);
        self.number_of_internal_nodes + leaf
    }

    #[cfg(test)]
    pub(super) fn leaf_of_position(&self, position: usize) -> usize {
        cumulus_assert_simple!(self.is_leaf(position) && position < self.size());
        position - self.number_of_internal_nodes
    }

    pub(super) fn is_leaf(&self, position: usize) -> bool {
        position >= self.number_of_internal_nodes
    }

    pub(super) fn left_child(position: usize) -> usize {
        2 * position + 1
    }

    pub(super) fn right_child(position: usize) -> usize {
        2 * position + 2
    }

    pub(super) fn parent(position: usize) -> usize {
        cumulus_assert_simple!(position > 0);
        (position - 1) / 2
    }
}

/// A flat, array-backed binary tree in which every internal node stores the [`Aggregate`] of its
/// children.
#[derive(Debug, Clone)]
pub(super) struct ImplicitTree<Node> {
    layout: TreeLayout,
    nodes: Vec<Node>,
}

impl<Node: Aggregate> ImplicitTree<Node> {
    /// Creates a tree in which every leaf is [`Aggregate::EMPTY`].
    pub(super) fn new(number_of_leaves: usize) -> Self {
        let layout = TreeLayout::new(number_of_leaves);
        ImplicitTree {
            layout,
            nodes: vec![Node::EMPTY; layout.size()],
        }
    }

    pub(super) fn layout(&self) -> TreeLayout {
        self.layout
    }

    pub(super) fn root(&self) -> Node {
        self.node(0)
    }

    /// Returns the aggregate at the provided position, positions outside of the array are empty.
    pub(super) fn node(&self, position: usize) -> Node {
        self.nodes.get(position).copied().unwrap_or(Node::EMPTY)
    }

    #[cfg(test)]
    pub(super) fn leaf(&self, leaf: usize) -> Node {
        self.nodes[self.layout.leaf_position(leaf)]
    }

    /// Sets the value of a single leaf and recomputes its ancestors in O(log n).
    pub(super) fn set_leaf(&mut self, leaf: usize, value: Node) {
        let mut position = self.layout.leaf_position(leaf);
        self.nodes[position] = value;

        while position != 0 {
            position = TreeLayout::parent(position);
            self.recompute(position);
        }
    }

    /// Sets the values of all leaves (in leaf order) and then computes the internal nodes
    /// bottom-up in O(n).
    pub(super) fn set_leaves(&mut self, values: impl IntoIterator<Item = Node>) {
        for (leaf, value) in values.into_iter().enumerate() {
            let position = self.layout.leaf_position(leaf);
            self.nodes[position] = value;
        }

        for position in (0..self.layout.number_of_internal_nodes).rev() {
            self.recompute(position);
        }
    }

    fn recompute(&mut self, position: usize) {
        let left = self.node(TreeLayout::left_child(position));
        let right = self.node(TreeLayout::right_child(position));
        self.nodes[position] = Node::combine(&left, &right);
    }
}
