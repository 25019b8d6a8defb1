use crate::float_types::Real;

/// One node of a found path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep<K, T> {
    pub key: K,
    /// How this node was entered from the previous one; `None` for the first step
    pub transition: Option<T>,
    /// Edge weight from the previous step (0 for the first)
    pub cost: Real,
}

/// An ordered route from start to goal
#[derive(Debug, Clone, PartialEq)]
pub struct Path<K, T> {
    steps: Vec<PathStep<K, T>>,
    cost: Real,
    expanded: usize,
}

impl<K: Copy, T: Copy> Path<K, T> {
    pub(crate) fn new(steps: Vec<PathStep<K, T>>, expanded: usize) -> Self {
        let cost = steps.iter().map(|s| s.cost).sum();
        Path {
            steps,
            cost,
            expanded,
        }
    }

    /// The path consisting of `key` alone
    pub(crate) fn single(key: K) -> Self {
        Path::new(
            vec![PathStep {
                key,
                transition: None,
                cost: 0.0,
            }],
            0,
        )
    }

    pub fn steps(&self) -> &[PathStep<K, T>] {
        &self.steps
    }

    /// Node keys from start to goal
    pub fn nodes(&self) -> Vec<K> {
        self.steps.iter().map(|s| s.key).collect()
    }

    pub fn first(&self) -> Option<K> {
        self.steps.first().map(|s| s.key)
    }

    pub fn last(&self) -> Option<K> {
        self.steps.last().map(|s| s.key)
    }

    /// Total weight of all edges
    pub const fn cost(&self) -> Real {
        self.cost
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of edges
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Nodes closed by the search that produced this path
    pub const fn expanded(&self) -> usize {
        self.expanded
    }
}
