//! Weighted best-first (A*) search.
//!
//! Works over anything implementing [`SearchSpace`]: the triangle graph of a
//! [`NavMesh`](crate::mesh::NavMesh), any [`NavGraph`], or a
//! [`BlockGrid`](crate::block::BlockGrid).
//!
//! ## Algorithm
//! 1. The frontier is ordered by *estimated combined weight*
//!    (accumulated weight + heuristic).
//! 2. Pop the lowest entry; if it is the goal, follow parent indices back to
//!    the root and reverse.
//! 3. Otherwise relax every successor that is not closed: a new node, or one
//!    reached more cheaply, gets the popped node as its parent and is pushed.
//! 4. Close the popped node. An empty frontier means there is no path.
//!
//! Equal priorities are broken by the lower heuristic, then by push order,
//! so a fixed input always yields the same path.
//!
//! The heuristic must not overestimate the remaining weight for the result
//! to be a least-cost path.

pub mod limits;
pub mod node;
pub mod path;

pub use limits::{CancelToken, SearchLimits};
pub use node::SearchNode;
pub use path::{Path, PathStep};

use crate::errors::NavError;
use crate::float_types::Real;
use crate::graph::NavGraph;
use hashbrown::HashMap;
use node::FrontierEntry;
use std::collections::BinaryHeap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A move out of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Successor<K, T> {
    pub key: K,
    pub transition: T,
    pub cost: Real,
}

/// Something that can be searched: a set of keyed nodes with weighted moves
pub trait SearchSpace {
    type Key: Copy + Eq + Hash + Debug;
    type Transition: Copy + Debug;

    fn contains(&self, key: Self::Key) -> bool;

    /// Append the moves out of `key` to `out`
    fn successors(&self, key: Self::Key, out: &mut Vec<Successor<Self::Key, Self::Transition>>);
}

impl<K> SearchSpace for NavGraph<K>
where
    K: Copy + Ord + Hash + Display + Debug,
{
    type Key = K;
    type Transition = ();

    fn contains(&self, key: K) -> bool {
        NavGraph::contains(self, key)
    }

    fn successors(&self, key: K, out: &mut Vec<Successor<K, ()>>) {
        out.extend(self.neighbors(key).map(|(k, w)| Successor {
            key: k,
            transition: (),
            cost: w,
        }));
    }
}

/// Heuristic that always estimates 0, turning the search into Dijkstra
pub fn zero<K>(_: K, _: K) -> Real {
    0.0
}

/// Straight-line distance between graph node positions
pub fn straight_line<K>(graph: &NavGraph<K>) -> impl Fn(K, K) -> Real + '_
where
    K: Copy + Ord + Display,
{
    move |a, b| graph.straight_line_distance(a, b)
}

/// Find a least-weight path from `start` to `goal`
pub fn find_path<S, H>(
    space: &S,
    start: S::Key,
    goal: S::Key,
    heuristic: H,
) -> Result<Path<S::Key, S::Transition>, NavError>
where
    S: SearchSpace,
    H: FnMut(S::Key, S::Key) -> Real,
{
    find_path_with(space, start, goal, heuristic, &SearchLimits::default())
}

/// [`find_path`] with limits on expansions, wall time, and cancellation
pub fn find_path_with<S, H>(
    space: &S,
    start: S::Key,
    goal: S::Key,
    mut heuristic: H,
    limits: &SearchLimits,
) -> Result<Path<S::Key, S::Transition>, NavError>
where
    S: SearchSpace,
    H: FnMut(S::Key, S::Key) -> Real,
{
    if !space.contains(start) || !space.contains(goal) {
        return Err(NavError::NoPath);
    }
    if start == goal {
        return Ok(Path::single(start));
    }

    let mut search = Search::new();
    let root = search.insert(SearchNode::root(start, heuristic(start, goal).max(0.0)));
    search.push(root);

    let mut successors = Vec::new();
    while let Some(entry) = search.frontier.pop() {
        let current = entry.index;
        let node = &search.arena[current];
        if node.closed || entry.weight > node.weight {
            continue;
        }
        if node.key() == goal {
            return Ok(search.reconstruct(current));
        }
        if let Some(reason) = limits.check(search.expanded) {
            log::warn!(
                "search {start:?} -> {goal:?} aborted ({reason}) after {} expansions",
                search.expanded
            );
            return Err(NavError::SearchAborted {
                reason,
                expanded: search.expanded,
            });
        }

        let current_key = node.key();
        let current_weight = node.weight;
        search.arena[current].closed = true;
        search.expanded += 1;
        log::trace!(
            "expand {current_key:?} weight={current_weight} estimate={}",
            entry.priority
        );

        successors.clear();
        space.successors(current_key, &mut successors);
        for s in successors.drain(..) {
            if !(s.cost.is_finite() && s.cost >= 0.0) {
                continue;
            }
            let tentative = current_weight + s.cost;
            match search.index.get(&s.key).copied() {
                Some(i) => {
                    let known = &mut search.arena[i];
                    if known.closed || tentative >= known.weight {
                        continue;
                    }
                    known.relink(current, s.transition, s.cost, current_weight);
                    search.push(i);
                },
                None => {
                    let h = heuristic(s.key, goal).max(0.0);
                    let i = search.insert(SearchNode::discovered(
                        s.key,
                        current,
                        s.transition,
                        s.cost,
                        current_weight,
                        h,
                    ));
                    search.push(i);
                },
            }
        }
    }

    log::debug!(
        "search {start:?} -> {goal:?}: frontier exhausted after {} expansions",
        search.expanded
    );
    Err(NavError::NoPath)
}

/// Arena, key index and frontier of one search call
struct Search<K, T> {
    arena: Vec<SearchNode<K, T>>,
    index: HashMap<K, usize>,
    frontier: BinaryHeap<FrontierEntry>,
    seq: u64,
    expanded: usize,
}

impl<K: Copy + Eq + Hash, T: Copy> Search<K, T> {
    fn new() -> Self {
        Search {
            arena: Vec::new(),
            index: HashMap::new(),
            frontier: BinaryHeap::new(),
            seq: 0,
            expanded: 0,
        }
    }

    fn insert(&mut self, node: SearchNode<K, T>) -> usize {
        let i = self.arena.len();
        self.index.insert(node.key(), i);
        self.arena.push(node);
        i
    }

    fn push(&mut self, index: usize) {
        let node = &self.arena[index];
        self.frontier.push(FrontierEntry {
            priority: node.estimated_combined_weight(),
            heuristic: node.heuristic_weight(),
            seq: self.seq,
            index,
            weight: node.weight(),
        });
        self.seq += 1;
    }

    fn reconstruct(&self, goal: usize) -> Path<K, T> {
        let mut steps = Vec::new();
        let mut cursor = Some(goal);
        while let Some(i) = cursor {
            let node = &self.arena[i];
            steps.push(PathStep {
                key: node.key(),
                transition: node.transition(),
                cost: node.weight_from_parent(),
            });
            cursor = node.parent();
        }
        steps.reverse();
        Path::new(steps, self.expanded)
    }
}
