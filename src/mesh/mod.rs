//! `NavMesh`: the point/triangle store of one bounded navigable region.
//!
//! Points and triangles live in key-ordered arenas; triangles reference
//! points by [`MeshKey`]. Every structural edit keeps adjacency consistent and
//! rebuilds the derived [`NavGraph`] before returning, so a search never sees
//! a graph older than the triangles it was built from.

pub mod adjacency;
pub mod keys;

use crate::errors::{EntityKind, NavError};
use crate::float_types::Real;
use crate::geometry::{NavPoint, NavTriangle, TriangleShape};
use crate::graph::{NavGraph, build_nav_graph};
use crate::search::{Path, SearchLimits, find_path_with};
use crate::world::{Location, WorldId};
use adjacency::{AdjacencyOps, DefaultAdjacency};
use hashbrown::HashMap;
use keys::{KeyGenerator, MeshKey};
use nalgebra::Point3;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

/// How far above or below a triangle's surface a point may be and still be "on" it
pub const VERTICAL_TOLERANCE: Real = 2.0;

/// Durations of the last adjacency and graph builds.
///
/// Plain numbers for the caller to report however it likes; the same values
/// are also logged at `debug` level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildTimings {
    /// Last full or incremental adjacency computation
    pub adjacency: Duration,
    /// Last graph rebuild
    pub graph: Duration,
}

/// Navigation mesh for one region of one world
#[derive(Debug, Clone)]
pub struct NavMesh {
    id: String,
    world: WorldId,
    range_center: Point3<Real>,
    range: Real,

    points: BTreeMap<MeshKey, NavPoint>,
    triangles: BTreeMap<MeshKey, NavTriangle>,

    graph: NavGraph<MeshKey>,
    heuristic_centers: HashMap<MeshKey, Point3<Real>>,
    /// Longest heuristic-center distance across any portal
    heuristic_span: Real,

    keys: KeyGenerator,
    timings: BuildTimings,
}

impl NavMesh {
    /// An empty mesh authoritative for the sphere `range` around `range_center`
    pub fn new(
        id: impl Into<String>,
        world: impl Into<WorldId>,
        range_center: Point3<Real>,
        range: Real,
    ) -> Self {
        let id = id.into();
        NavMesh {
            keys: KeyGenerator::for_mesh(&id),
            graph: NavGraph::new(format!("{id}_navmesh")),
            id,
            world: world.into(),
            range_center,
            range: range.abs(),
            points: BTreeMap::new(),
            triangles: BTreeMap::new(),
            heuristic_centers: HashMap::new(),
            heuristic_span: 0.0,
            timings: BuildTimings::default(),
        }
    }

    /// Assemble a mesh from existing points and `(key, [point keys])` triangles.
    ///
    /// Fails without producing a partial mesh if a key is reused, a triangle
    /// references a missing point, or a triangle repeats a point.
    pub fn from_parts(
        id: impl Into<String>,
        world: impl Into<WorldId>,
        range_center: Point3<Real>,
        range: Real,
        points: impl IntoIterator<Item = NavPoint>,
        triangles: impl IntoIterator<Item = (MeshKey, [MeshKey; 3])>,
    ) -> Result<Self, NavError> {
        let mut mesh = NavMesh::new(id, world, range_center, range);

        for point in points {
            if mesh.points.insert(point.key(), point).is_some() {
                return Err(NavError::DuplicateKey(point.key().to_string()));
            }
        }
        for (key, corners) in triangles {
            if mesh.points.contains_key(&key) || mesh.triangles.contains_key(&key) {
                return Err(NavError::DuplicateKey(key.to_string()));
            }
            mesh.validate_corners(corners)?;
            mesh.triangles.insert(key, NavTriangle::new(key, corners));
        }

        mesh.rebuild_adjacency();
        Ok(mesh)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn world(&self) -> &WorldId {
        &self.world
    }

    pub const fn range_center(&self) -> Point3<Real> {
        self.range_center
    }

    pub const fn range(&self) -> Real {
        self.range
    }

    /// The graph derived from the current triangles
    pub const fn graph(&self) -> &NavGraph<MeshKey> {
        &self.graph
    }

    pub const fn timings(&self) -> BuildTimings {
        self.timings
    }

    /// Whether `location` is in this mesh's world and strictly inside its range
    pub fn is_in_range(&self, location: &Location) -> bool {
        location.world == self.world
            && location.distance_squared_to(&self.range_center) < self.range * self.range
    }

    pub fn point(&self, key: MeshKey) -> Option<&NavPoint> {
        self.points.get(&key)
    }

    pub fn points(&self) -> impl Iterator<Item = &NavPoint> + '_ {
        self.points.values()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn position_of(&self, point: MeshKey) -> Option<Point3<Real>> {
        self.points.get(&point).map(|p| p.position)
    }

    pub fn triangle(&self, key: MeshKey) -> Option<&NavTriangle> {
        self.triangles.get(&key)
    }

    pub fn triangles(&self) -> impl Iterator<Item = &NavTriangle> + '_ {
        self.triangles.values()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of neighbour pairs
    pub fn portal_count(&self) -> usize {
        adjacency::portal_count(&self.triangles)
    }

    pub fn triangles_using_point(&self, point: MeshKey) -> Vec<MeshKey> {
        self.triangles
            .values()
            .filter(|t| t.uses_point(point))
            .map(NavTriangle::key)
            .collect()
    }

    /// Resolved corner positions of a triangle
    pub fn shape_of(&self, triangle: MeshKey) -> Option<TriangleShape> {
        let [a, b, c] = self.triangles.get(&triangle)?.points();
        Some(TriangleShape::new(
            self.position_of(a)?,
            self.position_of(b)?,
            self.position_of(c)?,
        ))
    }

    pub fn centroid_of(&self, triangle: MeshKey) -> Option<Point3<Real>> {
        self.shape_of(triangle).map(|s| s.centroid())
    }

    /// The point used for heuristic estimates: the override if set, else the centroid
    pub fn heuristic_center_of(&self, triangle: MeshKey) -> Option<Point3<Real>> {
        let t = self.triangles.get(&triangle)?;
        t.heuristic_center_override()
            .or_else(|| self.centroid_of(triangle))
    }

    /// Lower bound on the portal crossings between two triangles: the distance
    /// between their heuristic centers over the longest single-portal span.
    ///
    /// Each crossing moves the center by at most that span, so the estimate
    /// never exceeds the remaining unit-weight cost.
    pub fn heuristic(&self, from: MeshKey, to: MeshKey) -> Real {
        if self.heuristic_span <= 0.0 {
            return 0.0;
        }
        match (self.heuristic_centers.get(&from), self.heuristic_centers.get(&to)) {
            (Some(a), Some(b)) => (a - b).norm() / self.heuristic_span,
            _ => 0.0,
        }
    }

    /// The first triangle (in key order) whose surface is under or over `point`
    /// within [`VERTICAL_TOLERANCE`]
    pub fn triangle_at(&self, point: &Point3<Real>) -> Option<MeshKey> {
        self.triangles
            .keys()
            .copied()
            .find(|&k| {
                self.shape_of(k)
                    .is_some_and(|s| s.contains(point, VERTICAL_TOLERANCE))
            })
    }

    /// The triangle whose centroid is closest to `point`
    pub fn nearest_triangle(&self, point: &Point3<Real>) -> Option<MeshKey> {
        self.triangles
            .keys()
            .filter_map(|&k| Some((k, (self.centroid_of(k)? - point).norm_squared())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k)
    }

    /// The point closest to `position`, if it is within `max_distance`
    pub fn nearest_point(&self, position: &Point3<Real>, max_distance: Real) -> Option<MeshKey> {
        self.points
            .values()
            .map(|p| (p.key(), p.distance_squared_to(position)))
            .filter(|(_, d)| *d <= max_distance * max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k)
    }

    /// Add a point. Coincident points are allowed.
    pub fn create_point(&mut self, x: Real, y: Real, z: Real) -> MeshKey {
        let key = self.unused_key();
        self.points.insert(key, NavPoint::new(key, x, y, z));
        key
    }

    /// Delete a point and every triangle using it. Returns `false` if it was absent.
    pub fn remove_point(&mut self, point: MeshKey) -> bool {
        if !self.points.contains_key(&point) {
            return false;
        }
        for triangle in self.triangles_using_point(point) {
            self.detach_triangle(triangle);
        }
        self.points.remove(&point);
        self.rebuild_graph();
        true
    }

    /// Move a point. Adjacency is topological and unaffected; graph positions are refreshed.
    pub fn move_point(&mut self, point: MeshKey, position: Point3<Real>) -> Result<(), NavError> {
        let p = self
            .points
            .get_mut(&point)
            .ok_or_else(|| NavError::not_found(EntityKind::Point, point))?;
        *p = NavPoint::new(point, position.x, position.y, position.z);
        self.rebuild_graph();
        Ok(())
    }

    /// Add a triangle and connect it to every existing triangle it shares an edge with
    pub fn create_triangle(
        &mut self,
        a: MeshKey,
        b: MeshKey,
        c: MeshKey,
    ) -> Result<MeshKey, NavError> {
        self.validate_corners([a, b, c])?;

        let key = self.unused_key();
        let triangle = NavTriangle::new(key, [a, b, c]);

        let start = Instant::now();
        let portals = DefaultAdjacency::new().portals_for(&triangle, &self.triangles);
        self.triangles.insert(key, triangle);
        for portal in portals {
            adjacency::link(&mut self.triangles, portal);
        }
        self.record_adjacency_time(start.elapsed());

        self.rebuild_graph();
        Ok(key)
    }

    /// Remove a triangle and its entries in its neighbours' maps. Returns `false` if absent.
    pub fn delete_triangle(&mut self, triangle: MeshKey) -> bool {
        if !self.detach_triangle(triangle) {
            return false;
        }
        self.rebuild_graph();
        true
    }

    /// Override (or with `None`, reset) the heuristic center of a triangle
    pub fn set_heuristic_center(
        &mut self,
        triangle: MeshKey,
        center: Option<Point3<Real>>,
    ) -> Result<(), NavError> {
        self.triangles
            .get_mut(&triangle)
            .ok_or_else(|| NavError::not_found(EntityKind::Triangle, triangle))?
            .set_heuristic_center(center);
        self.refresh_heuristic_centers();
        Ok(())
    }

    /// Recompute every portal from scratch, then rebuild the graph
    pub fn rebuild_adjacency(&mut self) {
        let start = Instant::now();
        adjacency::clear(&mut self.triangles);
        let portals = DefaultAdjacency::new().compute_portals(&self.triangles);
        for portal in portals {
            adjacency::link(&mut self.triangles, portal);
        }
        self.record_adjacency_time(start.elapsed());
        self.rebuild_graph();
    }

    /// Replace the graph (and heuristic-center table) with one built from the current triangles
    pub fn rebuild_graph(&mut self) {
        let start = Instant::now();
        self.graph = build_nav_graph(self);
        self.refresh_heuristic_centers();

        self.timings.graph = start.elapsed();
        log::debug!(
            "mesh '{}': graph rebuilt with {} nodes / {} edges in {}µs",
            self.id,
            self.graph.node_count(),
            self.graph.edge_count(),
            self.timings.graph.as_micros()
        );
    }

    /// Search the mesh graph between two triangles
    pub fn find_path(&self, start: MeshKey, goal: MeshKey) -> Result<Path<MeshKey, ()>, NavError> {
        self.find_path_with(start, goal, &SearchLimits::default())
    }

    /// Like [`find_path`](Self::find_path), bounded by `limits`
    pub fn find_path_with(
        &self,
        start: MeshKey,
        goal: MeshKey,
        limits: &SearchLimits,
    ) -> Result<Path<MeshKey, ()>, NavError> {
        find_path_with(&self.graph, start, goal, |a, b| self.heuristic(a, b), limits)
    }

    fn refresh_heuristic_centers(&mut self) {
        let centers: HashMap<MeshKey, Point3<Real>> = self
            .triangles
            .keys()
            .filter_map(|&k| Some((k, self.heuristic_center_of(k)?)))
            .collect();
        self.heuristic_span = self
            .graph
            .edges()
            .into_iter()
            .filter_map(|(a, b, _)| Some((centers.get(&a)? - centers.get(&b)?).norm()))
            .filter(|d| d.is_finite())
            .fold(0.0, Real::max);
        self.heuristic_centers = centers;
    }

    fn unused_key(&mut self) -> MeshKey {
        let (points, triangles) = (&self.points, &self.triangles);
        self.keys
            .unused(|k| points.contains_key(&k) || triangles.contains_key(&k))
    }

    fn validate_corners(&self, corners: [MeshKey; 3]) -> Result<(), NavError> {
        for corner in corners {
            if !self.points.contains_key(&corner) {
                return Err(NavError::not_found(EntityKind::Point, corner));
            }
        }
        let distinct: BTreeSet<MeshKey> = corners.into_iter().collect();
        if distinct.len() != 3 {
            let [a, b, c] = corners;
            let repeated = if a == b || a == c { a } else { b };
            return Err(NavError::DegenerateTriangle(repeated.to_string()));
        }
        Ok(())
    }

    /// Unlink and remove a triangle without rebuilding the graph
    fn detach_triangle(&mut self, triangle: MeshKey) -> bool {
        if !self.triangles.contains_key(&triangle) {
            return false;
        }
        adjacency::unlink(&mut self.triangles, triangle);
        self.triangles.remove(&triangle);
        true
    }

    fn record_adjacency_time(&mut self, elapsed: Duration) {
        self.timings.adjacency = elapsed;
        log::debug!(
            "mesh '{}': adjacency computed for {} triangles in {}µs",
            self.id,
            self.triangles.len(),
            elapsed.as_micros()
        );
    }
}
