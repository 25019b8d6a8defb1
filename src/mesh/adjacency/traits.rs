//! Traits for adjacency construction.

use crate::geometry::{NavTriangle, Portal};
use crate::mesh::keys::MeshKey;
use std::collections::BTreeMap;

/// Trait for computing the portals of a triangle set.
pub trait AdjacencyOps {
    /// Every portal between every unordered pair, sorted by triangle keys.
    fn compute_portals(&self, triangles: &BTreeMap<MeshKey, NavTriangle>) -> Vec<Portal>;

    /// Portals between `triangle` and the other members of `triangles`.
    fn portals_for(
        &self,
        triangle: &NavTriangle,
        triangles: &BTreeMap<MeshKey, NavTriangle>,
    ) -> Vec<Portal>;
}
