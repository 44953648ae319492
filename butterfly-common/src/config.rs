//! Tunable knobs for graph construction and contraction-hierarchy preprocessing.

use serde::{Deserialize, Serialize};

/// Which backend services nearest-segment queries during stop snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialBackend {
    /// Linear scan over all segments of the route polyline. No index build
    /// cost, O(segments) per stop. Used for tests and as a correctness
    /// reference for the `spatial` backend.
    Default,
    /// R-tree backed window queries. The production backend for real route
    /// polylines, where a route may carry thousands of segments.
    Spatial,
}

impl Default for SpatialBackend {
    fn default() -> Self {
        SpatialBackend::Spatial
    }
}

/// Which contraction-order heuristic builds the Contraction Hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChHeuristic {
    /// Priority queue keyed by edge difference, recomputed lazily on pop.
    /// Recommended default; gives the best query-time speedup per unit of
    /// preprocessing time.
    Lazy,
    /// Contract the best `periodic_batch` nodes by their last-known edge
    /// difference, then recompute the rest in one pass. Cheaper to compute
    /// than lazy ED, at the cost of a slightly worse order.
    Periodic,
    /// Shuffle nodes and contract in that order. No edge-difference
    /// computation at all; useful only as a baseline to measure the other
    /// two heuristics against.
    Random,
}

impl Default for ChHeuristic {
    fn default() -> Self {
        ChHeuristic::Lazy
    }
}

/// Engine-wide configuration: spatial index selection for `GraphBuilder`,
/// and contraction behaviour for `ContractionHierarchies`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Nearest-segment query backend used while snapping stops to polylines.
    pub spatial_backend: SpatialBackend,
    /// Half-width in metres of the query rectangle centred on a stop when
    /// looking up candidate segments (§4.3).
    pub box_size: f64,
    /// Step limit for the witness-search Dijkstra run during shortcut
    /// computation (§4.9.1). Larger values find more witnesses (fewer
    /// shortcuts) at higher preprocessing cost.
    pub local_steps: u32,
    /// Which contraction-order heuristic `ContractionHierarchies` uses.
    pub ch_heuristic: ChHeuristic,
    /// Batch size for the periodic edge-difference heuristic (§4.9.3).
    pub periodic_batch: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spatial_backend: SpatialBackend::default(),
            box_size: 150.0,
            local_steps: 50,
            ch_heuristic: ChHeuristic::default(),
            periodic_batch: 100,
        }
    }
}
