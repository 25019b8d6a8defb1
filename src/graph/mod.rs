//! Weighted undirected graph consumed by the search.
//!
//! The graph knows nothing about triangles or portals; [`builder`] is the only
//! place where mesh geometry is turned into nodes and edges.

pub mod builder;

use crate::errors::{EntityKind, NavError};
use crate::float_types::Real;
use nalgebra::Point3;
use std::collections::BTreeMap;
use std::fmt::Display;

pub use builder::build_nav_graph;

/// A graph node: a position plus its weighted adjacency list
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode<K> {
    key: K,
    pub position: Point3<Real>,
    edges: Vec<(K, Real)>,
}

impl<K: Copy + Ord> GraphNode<K> {
    pub const fn new(key: K, position: Point3<Real>) -> Self {
        GraphNode {
            key,
            position,
            edges: Vec::new(),
        }
    }

    #[inline]
    pub const fn key(&self) -> K {
        self.key
    }

    /// `(neighbour, weight)` pairs in insertion order
    pub fn edges(&self) -> &[(K, Real)] {
        &self.edges
    }

    pub fn is_connected(&self, other: K) -> bool {
        self.edges.iter().any(|(k, _)| *k == other)
    }

    pub fn weight_to(&self, other: K) -> Option<Real> {
        self.edges.iter().find(|(k, _)| *k == other).map(|(_, w)| *w)
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// Weighted undirected adjacency structure keyed by `K`
#[derive(Debug, Clone, PartialEq)]
pub struct NavGraph<K> {
    id: String,
    nodes: BTreeMap<K, GraphNode<K>>,
    edge_count: usize,
}

impl<K: Copy + Ord + Display> NavGraph<K> {
    pub fn new(id: impl Into<String>) -> Self {
        NavGraph {
            id: id.into(),
            nodes: BTreeMap::new(),
            edge_count: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Insert a node, replacing the position of an existing one with the same key
    pub fn add_node(&mut self, key: K, position: Point3<Real>) {
        self.nodes
            .entry(key)
            .and_modify(|n| n.position = position)
            .or_insert_with(|| GraphNode::new(key, position));
    }

    /// Connect two nodes in both directions.
    ///
    /// Returns `Ok(false)` if they were already connected (the existing weight is kept).
    pub fn add_edge(&mut self, a: K, b: K, weight: Real) -> Result<bool, NavError> {
        if a == b {
            return Err(NavError::InvalidEdge(format!("self-loop on node '{a}'")));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(NavError::InvalidEdge(format!(
                "weight {weight} between '{a}' and '{b}' is not a non-negative number"
            )));
        }
        for key in [a, b] {
            if !self.nodes.contains_key(&key) {
                return Err(NavError::not_found(EntityKind::Node, key));
            }
        }
        if self.nodes[&a].is_connected(b) {
            return Ok(false);
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.edges.push((b, weight));
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.edges.push((a, weight));
        }
        self.edge_count += 1;
        Ok(true)
    }

    pub fn node(&self, key: K) -> Option<&GraphNode<K>> {
        self.nodes.get(&key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Nodes in key order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode<K>> + '_ {
        self.nodes.values()
    }

    /// Node keys in ascending order
    pub fn node_keys(&self) -> Vec<K> {
        self.nodes.keys().copied().collect()
    }

    pub fn neighbors(&self, key: K) -> impl Iterator<Item = (K, Real)> + '_ {
        self.nodes
            .get(&key)
            .into_iter()
            .flat_map(|n| n.edges.iter().copied())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every undirected edge once, as `(smaller, larger, weight)`, sorted.
    /// Useful for order-independent comparison of two graphs.
    pub fn edges(&self) -> Vec<(K, K, Real)> {
        let mut edges: Vec<(K, K, Real)> = self
            .nodes
            .values()
            .flat_map(|n| {
                n.edges
                    .iter()
                    .filter(move |(other, _)| n.key < *other)
                    .map(move |(other, w)| (n.key, *other, *w))
            })
            .collect();
        edges.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
        edges
    }

    /// Straight-line distance between two node positions, 0 if either is missing
    pub fn straight_line_distance(&self, a: K, b: K) -> Real {
        match (self.nodes.get(&a), self.nodes.get(&b)) {
            (Some(a), Some(b)) => (a.position - b.position).norm(),
            _ => 0.0,
        }
    }
}
