//! Per-search working state.

use crate::float_types::Real;
use std::cmp::Ordering;

/// A discovered node in the search arena.
///
/// The parent is an index into the same arena. It only ever points at a node
/// that was already closed when the link was made, so following parents always
/// ends at the root.
#[derive(Debug, Clone)]
pub struct SearchNode<K, T> {
    key: K,
    pub(crate) parent: Option<usize>,
    pub(crate) transition: Option<T>,
    pub(crate) weight_from_parent: Real,
    pub(crate) heuristic_weight: Real,
    /// accumulated weight from the root, kept in sync with the parent chain
    pub(crate) weight: Real,
    pub(crate) closed: bool,
}

impl<K: Copy, T: Copy> SearchNode<K, T> {
    pub(crate) const fn root(key: K, heuristic_weight: Real) -> Self {
        SearchNode {
            key,
            parent: None,
            transition: None,
            weight_from_parent: 0.0,
            heuristic_weight,
            weight: 0.0,
            closed: false,
        }
    }

    pub(crate) const fn discovered(
        key: K,
        parent: usize,
        transition: T,
        weight_from_parent: Real,
        parent_weight: Real,
        heuristic_weight: Real,
    ) -> Self {
        SearchNode {
            key,
            parent: Some(parent),
            transition: Some(transition),
            weight_from_parent,
            heuristic_weight,
            weight: parent_weight + weight_from_parent,
            closed: false,
        }
    }

    /// Re-parent onto a cheaper route
    pub(crate) fn relink(&mut self, parent: usize, transition: T, weight_from_parent: Real, parent_weight: Real) {
        self.parent = Some(parent);
        self.transition = Some(transition);
        self.weight_from_parent = weight_from_parent;
        self.weight = parent_weight + weight_from_parent;
    }

    pub const fn key(&self) -> K {
        self.key
    }

    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// How the edge from the parent was traversed; `None` at the root
    pub const fn transition(&self) -> Option<T> {
        self.transition
    }

    pub const fn weight_from_parent(&self) -> Real {
        self.weight_from_parent
    }

    pub const fn heuristic_weight(&self) -> Real {
        self.heuristic_weight
    }

    /// Accumulated weight from the root
    pub const fn weight(&self) -> Real {
        self.weight
    }

    /// Accumulated weight plus heuristic: the frontier priority
    pub fn estimated_combined_weight(&self) -> Real {
        self.weight + self.heuristic_weight
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Frontier entry. A node may be pushed more than once; entries whose weight
/// no longer matches the node are skipped when popped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub priority: Real,
    pub heuristic: Real,
    pub seq: u64,
    pub index: usize,
    pub weight: Real,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    /// Reversed for `BinaryHeap`: lowest priority first, then lowest
    /// heuristic (closest to the goal), then first pushed.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.heuristic.total_cmp(&self.heuristic))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn entry(priority: Real, heuristic: Real, seq: u64) -> FrontierEntry {
        FrontierEntry {
            priority,
            heuristic,
            seq,
            index: seq as usize,
            weight: priority - heuristic,
        }
    }

    #[test]
    fn frontier_pops_lowest_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(3.0, 1.0, 0));
        heap.push(entry(2.0, 1.0, 1));
        heap.push(entry(2.0, 1.0, 2));
        heap.push(entry(2.0, 0.5, 3));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.seq)).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn weight_accumulates_along_chain() {
        let root: SearchNode<u32, ()> = SearchNode::root(0, 4.0);
        let child = SearchNode::discovered(1, 0, (), 1.5, root.weight(), 2.0);
        let grandchild = SearchNode::discovered(2, 1, (), 0.5, child.weight(), 0.0);
        assert_eq!(root.weight(), 0.0);
        assert_eq!(child.weight(), 1.5);
        assert_eq!(grandchild.weight(), 2.0);
        assert_eq!(child.estimated_combined_weight(), 3.5);
    }
}
