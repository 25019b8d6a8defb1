mod support;

use nalgebra::Point3;
use navmesh::errors::{EntityKind, NavError};
use navmesh::float_types::Real;
use navmesh::graph::{NavGraph, build_nav_graph};
use support::{approx_eq, grid};

#[test]
fn graph_mirrors_triangles_and_portals() {
    let g = grid("mirror", 3);
    let graph = g.mesh.graph();

    assert_eq!(graph.id(), "mirror_navmesh");
    assert_eq!(graph.node_count(), g.mesh.triangle_count());
    assert_eq!(graph.edge_count(), g.mesh.portal_count());

    for t in g.mesh.triangles() {
        let node = graph.node(t.key()).expect("one node per triangle");
        let centroid = g.mesh.centroid_of(t.key()).unwrap();
        assert!(approx_eq((node.position - centroid).norm(), 0.0, 1e-6));
        assert_eq!(node.degree(), t.neighbor_count());
        for n in t.neighbor_keys() {
            assert_eq!(node.weight_to(n), Some(1.0));
        }
    }
}

#[test]
fn rebuilding_an_unchanged_mesh_is_idempotent() {
    let mut g = grid("idem", 3);
    let before = g.mesh.graph().clone();

    g.mesh.rebuild_graph();
    let after = g.mesh.graph();
    assert_eq!(before.node_keys(), after.node_keys());
    assert_eq!(before.edges(), after.edges());

    let fresh = build_nav_graph(&g.mesh);
    assert_eq!(fresh.edges(), after.edges());
    for node in fresh.nodes() {
        assert_eq!(after.node(node.key()).unwrap().position, node.position);
    }
}

#[test]
fn edits_are_reflected_immediately() {
    let mut g = grid("live", 2);
    let edges = g.mesh.graph().edge_count();

    let victim = g.upper[0][0];
    let degree = g.mesh.triangle(victim).unwrap().neighbor_count();
    g.mesh.delete_triangle(victim);

    assert!(!g.mesh.graph().contains(victim));
    assert_eq!(g.mesh.graph().edge_count(), edges - degree);
    for node in g.mesh.graph().nodes() {
        assert!(!node.is_connected(victim));
    }
}

#[test]
fn add_edge_validates_its_input() {
    let mut graph: NavGraph<u32> = NavGraph::new("checks");
    graph.add_node(1, Point3::origin());
    graph.add_node(2, Point3::new(3.0, 4.0, 0.0));

    assert!(matches!(graph.add_edge(1, 1, 1.0), Err(NavError::InvalidEdge(_))));
    assert!(matches!(graph.add_edge(1, 2, -1.0), Err(NavError::InvalidEdge(_))));
    assert!(matches!(
        graph.add_edge(1, 2, Real::INFINITY),
        Err(NavError::InvalidEdge(_))
    ));
    assert!(matches!(
        graph.add_edge(1, 3, 1.0),
        Err(NavError::NotFound {
            kind: EntityKind::Node,
            ..
        })
    ));

    assert_eq!(graph.add_edge(1, 2, 2.0), Ok(true));
    assert_eq!(graph.add_edge(2, 1, 9.0), Ok(false));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.node(2).unwrap().weight_to(1), Some(2.0));
    assert!(approx_eq(graph.straight_line_distance(1, 2), 5.0, 1e-6));
    assert_eq!(graph.straight_line_distance(1, 7), 0.0);
}
