//! Parallel implementation of adjacency construction.

use super::portal_between;
use super::traits::AdjacencyOps;
use crate::geometry::{NavTriangle, Portal};
use crate::mesh::keys::MeshKey;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Parallel implementation of `AdjacencyOps`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParallelAdjacency;

impl ParallelAdjacency {
    pub const fn new() -> Self {
        Self
    }
}

impl AdjacencyOps for ParallelAdjacency {
    fn compute_portals(&self, triangles: &BTreeMap<MeshKey, NavTriangle>) -> Vec<Portal> {
        let ordered: Vec<&NavTriangle> = triangles.values().collect();
        let mut portals: Vec<Portal> = (0..ordered.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let a = ordered[i];
                ordered[i + 1..]
                    .iter()
                    .filter_map(move |b| portal_between(a, b))
            })
            .collect();
        // match the serial output order
        portals.sort_unstable_by_key(Portal::triangles);
        portals
    }

    fn portals_for(
        &self,
        triangle: &NavTriangle,
        triangles: &BTreeMap<MeshKey, NavTriangle>,
    ) -> Vec<Portal> {
        let ordered: Vec<&NavTriangle> = triangles.values().collect();
        ordered
            .par_iter()
            .filter_map(|other| portal_between(triangle, other))
            .collect()
    }
}
