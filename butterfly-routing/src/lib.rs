//! Generic weighted directed multigraph plus the shortest-path algorithm
//! family that runs over it: Dijkstra and its terminating variants,
//! bidirectional Dijkstra, spatial A*, Contraction Hierarchies, and
//! betweenness-centrality analysis.
//!
//! This crate knows nothing about stops, routes or polylines beyond the
//! `StopId`/`Coordinate` vocabulary in `butterfly-common`; `butterfly-plan`'s
//! `GraphBuilder` is the only thing that turns transit geometry into the
//! `Network` these algorithms consume.

pub mod astar;
pub mod betweenness;
pub mod bidirectional;
pub mod ch;
pub mod dijkstra;
pub mod edge;
pub mod graph;
pub mod network;
pub mod removable_network;

pub use astar::SpatialAStar;
pub use betweenness::{BetweennessAlgorithm, BetweennessAnalysis};
pub use bidirectional::BidirectionalDijkstra;
pub use ch::ContractionHierarchies;
pub use dijkstra::{
    DescendantsCount, Dijkstra, LocalDistance, LocalSteps, NoTermination, SingleDestination, Termination,
};
pub use edge::{AtomicEdge, Edge, ShortcutEdge};
pub use graph::Graph;
pub use network::Network;
pub use removable_network::RemovableNetwork;
