//! Projection of a navigation mesh onto a [`NavGraph`].

use super::NavGraph;
use crate::float_types::Real;
use crate::geometry::MeshKey;
use crate::mesh::NavMesh;

/// Weight of every triangle-to-triangle edge. The mesh graph encodes
/// connectivity only; terrain cost lives in the block variant.
pub const MESH_EDGE_WEIGHT: Real = 1.0;

/// Build a fresh graph with one node per triangle (at its centroid) and one
/// unit edge per neighbour pair.
///
/// The result depends only on the mesh's triangles and their adjacency, so
/// building twice from an unchanged mesh gives equal graphs.
pub fn build_nav_graph(mesh: &NavMesh) -> NavGraph<MeshKey> {
    let mut graph = NavGraph::new(format!("{}_navmesh", mesh.id()));

    for triangle in mesh.triangles() {
        if let Some(centroid) = mesh.centroid_of(triangle.key()) {
            graph.add_node(triangle.key(), centroid);
        }
    }

    for triangle in mesh.triangles() {
        for neighbor in triangle.neighbor_keys() {
            // each pair is visited from both sides; add_edge keeps the first
            if let Err(err) = graph.add_edge(triangle.key(), neighbor, MESH_EDGE_WEIGHT) {
                log::warn!(
                    "mesh '{}': skipping edge {} -> {}: {err}",
                    mesh.id(),
                    triangle.key(),
                    neighbor
                );
            }
        }
    }

    graph
}
