//! Test support library
//! Builders for small meshes and a few float helpers.
#![allow(dead_code)]

use navmesh::float_types::Real;
use navmesh::mesh::NavMesh;
use navmesh::mesh::keys::MeshKey;
use navmesh::world::Location;
use nalgebra::Point3;

pub const WORLD: &str = "overworld";

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn at(x: Real, y: Real, z: Real) -> Location {
    Location::new(WORLD, x, y, z)
}

/// A flat square grid of `n` x `n` unit cells at y = 0, corner at the origin.
///
/// Each cell `(i, j)` is split along its diagonal into two triangles:
/// `lower` = (i,j) (i+1,j) (i+1,j+1) and `upper` = (i,j) (i+1,j+1) (i,j+1).
pub struct Grid {
    pub mesh: NavMesh,
    /// `points[i][j]` is the point at x = i, z = j
    pub points: Vec<Vec<MeshKey>>,
    /// `lower[i][j]` and `upper[i][j]` are the triangles of cell (i, j)
    pub lower: Vec<Vec<MeshKey>>,
    pub upper: Vec<Vec<MeshKey>>,
}

/// Route `log` output through the test harness; set `RUST_LOG=navmesh=debug` to see it
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn grid(id: &str, n: usize) -> Grid {
    init_logging();
    let extent = n as Real;
    let mut mesh = NavMesh::new(
        id,
        WORLD,
        Point3::new(extent / 2.0, 0.0, extent / 2.0),
        extent * 4.0 + 8.0,
    );

    let points: Vec<Vec<MeshKey>> = (0..=n)
        .map(|i| {
            (0..=n)
                .map(|j| mesh.create_point(i as Real, 0.0, j as Real))
                .collect()
        })
        .collect();

    let mut lower = vec![Vec::with_capacity(n); n];
    let mut upper = vec![Vec::with_capacity(n); n];
    for i in 0..n {
        for j in 0..n {
            let p = |a: usize, b: usize| points[a][b];
            lower[i].push(
                mesh.create_triangle(p(i, j), p(i + 1, j), p(i + 1, j + 1))
                    .expect("lower triangle"),
            );
            upper[i].push(
                mesh.create_triangle(p(i, j), p(i + 1, j + 1), p(i, j + 1))
                    .expect("upper triangle"),
            );
        }
    }

    Grid {
        mesh,
        points,
        lower,
        upper,
    }
}

/// Single triangle with corners at (0,0,0), (4,0,0), (0,0,4)
pub fn single_triangle(id: &str) -> (NavMesh, MeshKey) {
    let mut mesh = NavMesh::new(id, WORLD, Point3::origin(), 32.0);
    let a = mesh.create_point(0.0, 0.0, 0.0);
    let b = mesh.create_point(4.0, 0.0, 0.0);
    let c = mesh.create_point(0.0, 0.0, 4.0);
    let t = mesh.create_triangle(a, b, c).expect("triangle");
    (mesh, t)
}
