//! Coordinate spaces and locations inside them.
//!
//! The host environment owns the actual world; meshes only need to know which
//! space they belong to so that a query in another space is never matched.

use crate::float_types::Real;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Name of the coordinate space a mesh belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(String);

impl WorldId {
    pub fn new(name: impl Into<String>) -> Self {
        WorldId(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for WorldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorldId {
    fn from(name: &str) -> Self {
        WorldId::new(name)
    }
}

/// A position inside a specific world
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: WorldId,
    pub position: Point3<Real>,
}

impl Location {
    pub fn new(world: impl Into<WorldId>, x: Real, y: Real, z: Real) -> Self {
        Location {
            world: world.into(),
            position: Point3::new(x, y, z),
        }
    }

    pub const fn at(world: WorldId, position: Point3<Real>) -> Self {
        Location { world, position }
    }

    /// Squared distance to another point, ignoring the world
    #[inline]
    pub fn distance_squared_to(&self, other: &Point3<Real>) -> Real {
        (self.position - other).norm_squared()
    }
}
