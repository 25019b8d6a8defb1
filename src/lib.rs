//! **Navigation meshes** for game agents: points and triangles over walkable
//! surfaces, portals between triangles that share an edge, and weighted
//! [A*](search) over the resulting graph or over a plain [block grid](block).
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **json-io**: load and save meshes as JSON documents
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for full adjacency rebuilds

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod block;
pub mod edit;
pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod graph;
pub mod io;
pub mod mesh;
pub mod registry;
pub mod search;
pub mod world;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::NavError;
pub use mesh::NavMesh;
pub use mesh::keys::MeshKey;
pub use registry::NavMeshRegistry;
pub use search::{SearchLimits, find_path};
pub use world::{Location, WorldId};
