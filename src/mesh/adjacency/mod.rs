//! Portal detection between triangles.
//!
//! Two triangles are neighbours iff they share exactly two points. A full
//! build compares every unordered pair (O(n²)) and runs on load; edits patch
//! the adjacency of the one triangle they touch.

pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use traits::AdjacencyOps;

pub use serial::SerialAdjacency;

#[cfg(feature = "parallel")]
pub use parallel::ParallelAdjacency;

/// The adjacency builder selected by the enabled features
#[cfg(not(feature = "parallel"))]
pub type DefaultAdjacency = SerialAdjacency;
/// The adjacency builder selected by the enabled features
#[cfg(feature = "parallel")]
pub type DefaultAdjacency = ParallelAdjacency;

use crate::geometry::{NavTriangle, Portal};
use crate::mesh::keys::MeshKey;
use std::collections::BTreeMap;

/// The portal between two triangles, if they share exactly two points
pub fn portal_between(a: &NavTriangle, b: &NavTriangle) -> Option<Portal> {
    if a.key() == b.key() {
        return None;
    }
    match a.common_points(b).as_slice() {
        [p, q] => Some(Portal::new(a.key(), b.key(), *p, *q)),
        _ => None,
    }
}

/// Record `portal` on both triangles it connects
pub fn link(triangles: &mut BTreeMap<MeshKey, NavTriangle>, portal: Portal) {
    let [a, b] = portal.triangles();
    if !(triangles.contains_key(&a) && triangles.contains_key(&b)) {
        return;
    }
    if let Some(t) = triangles.get_mut(&a) {
        t.neighbors.insert(b, portal);
    }
    if let Some(t) = triangles.get_mut(&b) {
        t.neighbors.insert(a, portal);
    }
}

/// Remove every neighbour entry pointing at `key`
pub fn unlink(triangles: &mut BTreeMap<MeshKey, NavTriangle>, key: MeshKey) {
    let neighbors: Vec<MeshKey> = triangles
        .get(&key)
        .map(|t| t.neighbor_keys().collect())
        .unwrap_or_default();
    for n in neighbors {
        if let Some(t) = triangles.get_mut(&n) {
            t.neighbors.remove(&key);
        }
    }
    if let Some(t) = triangles.get_mut(&key) {
        t.neighbors.clear();
    }
}

/// Drop all neighbour maps
pub fn clear(triangles: &mut BTreeMap<MeshKey, NavTriangle>) {
    for t in triangles.values_mut() {
        t.neighbors.clear();
    }
}

/// Number of unordered neighbour pairs
pub fn portal_count(triangles: &BTreeMap<MeshKey, NavTriangle>) -> usize {
    triangles
        .values()
        .map(NavTriangle::neighbor_count)
        .sum::<usize>()
        / 2
}
