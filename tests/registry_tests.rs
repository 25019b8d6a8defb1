mod support;

use nalgebra::Point3;
use navmesh::errors::{EntityKind, NavError};
use navmesh::mesh::NavMesh;
use navmesh::registry::NavMeshRegistry;
use navmesh::world::Location;
use support::{WORLD, approx_eq, at, grid};

#[test]
fn first_inserted_mesh_wins_overlaps() {
    let mut registry = NavMeshRegistry::new();
    registry.insert(NavMesh::new("a", WORLD, Point3::origin(), 20.0));
    registry.insert(NavMesh::new("b", WORLD, Point3::new(5.0, 0.0, 0.0), 20.0));

    assert_eq!(registry.mesh_at(&at(3.0, 0.0, 0.0)).map(NavMesh::id), Some("a"));
    assert_eq!(registry.mesh_at(&at(22.0, 0.0, 0.0)).map(NavMesh::id), Some("b"));
    assert!(registry.mesh_at(&at(100.0, 0.0, 0.0)).is_none());
    assert!(registry.mesh_at(&Location::new("nether", 0.0, 0.0, 0.0)).is_none());

    // replacing keeps the slot, so "a" still wins
    let old = registry.insert(NavMesh::new("a", WORLD, Point3::origin(), 30.0));
    assert_eq!(old.map(|m| m.range()), Some(20.0));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.mesh_at(&at(3.0, 0.0, 0.0)).map(NavMesh::id), Some("a"));

    registry.remove("a").unwrap();
    assert_eq!(registry.mesh_at(&at(3.0, 0.0, 0.0)).map(NavMesh::id), Some("b"));
    assert_eq!(
        registry.remove("a").unwrap_err(),
        NavError::NotFound {
            kind: EntityKind::Mesh,
            key: "a".to_string()
        }
    );
}

#[test]
fn uncovered_endpoints_are_no_coverage() {
    let mut registry = NavMeshRegistry::new();
    registry.insert(grid("small", 2).mesh);

    assert_eq!(
        registry.find_path(&at(500.0, 0.0, 0.0), &at(1.0, 0.0, 1.0)),
        Err(NavError::NoCoverage)
    );
    assert_eq!(
        registry.find_path(&at(1.0, 0.0, 1.0), &at(500.0, 0.0, 0.0)),
        Err(NavError::NoCoverage)
    );
}

#[test]
fn waypoints_run_through_portal_midpoints() {
    let mut registry = NavMeshRegistry::new();
    registry.insert(grid("walk", 2).mesh);

    let from = at(0.8, 0.0, 0.1);
    let to = at(1.2, 0.0, 1.9);
    let waypoints = registry.find_path(&from, &to).unwrap();

    // three portals between the far corner triangles
    assert_eq!(waypoints.len(), 5);
    assert_eq!(waypoints.first(), Some(&from.position));
    assert_eq!(waypoints.last(), Some(&to.position));
    for w in &waypoints[1..4] {
        assert!(approx_eq(w.y, 0.0, 1e-6));
        // midpoints of unit grid edges and diagonals have half-integer coordinates
        assert!(approx_eq((w.x * 2.0).fract(), 0.0, 1e-6));
        assert!(approx_eq((w.z * 2.0).fract(), 0.0, 1e-6));
    }
}

#[test]
fn endpoints_off_the_surface_use_the_nearest_triangle() {
    let mut registry = NavMeshRegistry::new();
    registry.insert(grid("hover", 2).mesh);

    let from = at(0.8, 6.0, 0.1);
    let to = at(0.9, 6.0, 0.2);
    let waypoints = registry.find_path(&from, &to).unwrap();
    assert_eq!(waypoints, vec![from.position, to.position]);
}

#[test]
fn empty_mesh_has_no_path() {
    let mut registry = NavMeshRegistry::new();
    registry.insert(NavMesh::new("bare", WORLD, Point3::origin(), 10.0));
    assert_eq!(
        registry.find_path(&at(0.0, 0.0, 0.0), &at(1.0, 0.0, 1.0)),
        Err(NavError::NoPath)
    );
}
