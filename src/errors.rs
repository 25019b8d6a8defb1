//! Mesh, graph and search errors

use std::fmt::Display;

/// The kind of entity a failed lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Point,
    Triangle,
    Mesh,
    Node,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Point => write!(f, "point"),
            EntityKind::Triangle => write!(f, "triangle"),
            EntityKind::Mesh => write!(f, "mesh"),
            EntityKind::Node => write!(f, "graph node"),
        }
    }
}

/// Why a search stopped before reaching its goal or exhausting its frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The caller's [`CancelToken`](crate::search::CancelToken) was triggered
    Cancelled,
    /// The deadline in [`SearchLimits`](crate::search::SearchLimits) passed
    DeadlineExceeded,
    /// More nodes were closed than [`SearchLimits::max_expansions`](crate::search::SearchLimits) allows
    ExpansionLimit,
}

impl Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::Cancelled => write!(f, "cancelled"),
            AbortReason::DeadlineExceeded => write!(f, "deadline exceeded"),
            AbortReason::ExpansionLimit => write!(f, "expansion limit reached"),
        }
    }
}

/// All the failures the mesh store, graph builder and search report
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    /// (NotFound) A referenced point, triangle, mesh or node does not exist
    #[error("(NotFound) No {kind} with key '{key}'")]
    NotFound { kind: EntityKind, key: String },
    /// (NoCoverage) The location lies outside every known mesh
    #[error("(NoCoverage) No navigation mesh covers this area")]
    NoCoverage,
    /// (NoPath) The endpoints are unresolvable or not connected
    #[error("(NoPath) No path found between start and goal")]
    NoPath,
    /// (DegenerateTriangle) A triangle references the same point twice
    #[error("(DegenerateTriangle) Triangle references point '{0}' more than once")]
    DegenerateTriangle(String),
    /// (DuplicateKey) A key is used by more than one point or triangle
    #[error("(DuplicateKey) Key '{0}' is used more than once")]
    DuplicateKey(String),
    /// (InvalidEdge) Self-loop or a weight that is negative or not finite
    #[error("(InvalidEdge) {0}")]
    InvalidEdge(String),
    /// (SearchAborted) A search limit stopped the search early
    #[error("(SearchAborted) Search {reason} after expanding {expanded} nodes")]
    SearchAborted { reason: AbortReason, expanded: usize },
}

impl NavError {
    pub(crate) fn not_found(kind: EntityKind, key: impl Display) -> Self {
        NavError::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}
