//! Serial implementation of adjacency construction.

use super::portal_between;
use super::traits::AdjacencyOps;
use crate::geometry::{NavTriangle, Portal};
use crate::mesh::keys::MeshKey;
use std::collections::BTreeMap;

/// Serial implementation of `AdjacencyOps`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialAdjacency;

impl SerialAdjacency {
    pub const fn new() -> Self {
        Self
    }
}

impl AdjacencyOps for SerialAdjacency {
    fn compute_portals(&self, triangles: &BTreeMap<MeshKey, NavTriangle>) -> Vec<Portal> {
        let ordered: Vec<&NavTriangle> = triangles.values().collect();
        let mut portals = Vec::new();
        for (i, a) in ordered.iter().enumerate() {
            for b in &ordered[i + 1..] {
                if let Some(portal) = portal_between(a, b) {
                    portals.push(portal);
                }
            }
        }
        portals
    }

    fn portals_for(
        &self,
        triangle: &NavTriangle,
        triangles: &BTreeMap<MeshKey, NavTriangle>,
    ) -> Vec<Portal> {
        triangles
            .values()
            .filter_map(|other| portal_between(triangle, other))
            .collect()
    }
}
