//! Point-to-segment projection, spatial indexing and stop-to-polyline
//! snapping for the butterfly-osm transit routing engine.
//!
//! This crate has no notion of a graph: it turns a polyline and a list of
//! stop coordinates into nearest-segment assignments. `butterfly-plan`'s
//! `GraphBuilder` consumes those assignments together with
//! `butterfly-routing`'s `Network` to emit travel-time edges.

pub mod geometry;
pub mod snapping;
pub mod spatial_index;

pub use geometry::{point_to_segment_dist, project};
pub use snapping::{build_segment_index, nearest_segment};
pub use spatial_index::{LinearIndex, RTreeIndex, Rect, SpatialIndex};
