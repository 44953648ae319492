//! Unified `path(src, dest) -> (distance, edges)` entry point (component Q,
//! §2), dispatching to whichever algorithm the caller selected instead of
//! making every caller know the Dijkstra/BidirectionalDijkstra/A*/CH API
//! surface directly.

use std::sync::Arc;

use butterfly_common::{Coordinate, StopId};
use butterfly_routing::{BidirectionalDijkstra, ContractionHierarchies, Dijkstra, Edge, Graph, SpatialAStar};

/// Which algorithm `Query::path` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Dijkstra,
    Bidirectional,
    AStar,
}

/// A point-to-point shortest path: scalar distance plus the edges
/// realising it, in order from `src` to `dest`. Empty and infinite when
/// unreachable (§7: unreachable is a normal result, never an error).
#[derive(Debug, Clone)]
pub struct PathResult {
    pub dist: f64,
    pub path: Vec<Arc<Edge>>,
}

/// Runs one of the non-CH algorithms over a `Graph` on demand. Holds no
/// state between queries; each call builds and discards its own search
/// engine (§5: algorithm objects are not safe for concurrent mutation, so
/// nothing here is held across calls for a caller to misuse).
pub struct Query<'g, G: Graph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: Graph + ?Sized> Query<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    pub fn path(&self, src: StopId, dest: StopId, alg: Algorithm) -> PathResult {
        match alg {
            Algorithm::Dijkstra => {
                let engine = Dijkstra::run_single_destination(self.graph, src, dest);
                PathResult { dist: engine.dist(dest), path: engine.path_to(dest) }
            }
            Algorithm::Bidirectional => {
                let engine = BidirectionalDijkstra::run(self.graph, src, dest);
                PathResult { dist: engine.dist(), path: engine.path() }
            }
            Algorithm::AStar => {
                let engine = SpatialAStar::run(self.graph, src, dest);
                PathResult { dist: engine.dist(), path: engine.path() }
            }
        }
    }
}

/// As `Query`, but backed by a preprocessed Contraction Hierarchy instead of
/// running a fresh search per call — the production path for repeated
/// queries against a static network (§4.9.4).
pub struct ChQuery<'ch> {
    ch: &'ch ContractionHierarchies,
}

impl<'ch> ChQuery<'ch> {
    pub fn new(ch: &'ch ContractionHierarchies) -> Self {
        Self { ch }
    }

    /// The shortest path fully unpacked into atomic edges.
    pub fn path(&self, src: StopId, dest: StopId) -> (f64, Vec<Arc<butterfly_routing::AtomicEdge>>) {
        self.ch.path(src, dest)
    }

    pub fn dist(&self, src: StopId, dest: StopId) -> f64 {
        self.ch.dist(src, dest)
    }
}

/// Nearest stop to `point` by Euclidean distance over every node in
/// `graph`. Used to resolve raw coordinates (e.g. from an HTTP request)
/// into the stop ids every query API above actually takes.
pub fn nearest_stop<G: Graph + ?Sized>(graph: &G, point: Coordinate) -> Option<StopId> {
    graph
        .node_ids()
        .filter_map(|id| graph.coord(id).map(|c| (id, c.distance(&point))))
        .min_by(|(_, d1), (_, d2)| d1.partial_cmp(d2).unwrap())
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use butterfly_common::{Config, Stop};
    use butterfly_routing::{AtomicEdge, Network};

    fn stop(id: StopId, x: f64) -> Stop {
        Stop::new(id, Coordinate::new(x, 0.0))
    }

    fn edge(src: StopId, dest: StopId, w: f64) -> Arc<Edge> {
        Arc::new(Edge::Atomic(AtomicEdge { src, dest, weight: w, length: w, real_path: vec![], route_ids: vec![] }))
    }

    fn linear_network() -> Network {
        let mut net = Network::from_stops((0..4).map(|i| stop(i, i as f64 * 10.0)));
        for i in 0..3 {
            net.add_edge(edge(i, i + 1, 10.0));
        }
        net
    }

    #[test]
    fn all_three_algorithms_agree_on_distance() {
        let net = linear_network();
        let query = Query::new(&net);
        let dijkstra = query.path(0, 3, Algorithm::Dijkstra);
        let bidir = query.path(0, 3, Algorithm::Bidirectional);
        let astar = query.path(0, 3, Algorithm::AStar);
        assert_eq!(dijkstra.dist, 30.0);
        assert_eq!(bidir.dist, 30.0);
        assert_eq!(astar.dist, 30.0);
    }

    #[test]
    fn ch_query_matches_dijkstra() {
        let net = linear_network();
        let ch = ContractionHierarchies::build(&net, &Config::default());
        let ch_query = ChQuery::new(&ch);
        let (dist, path) = ch_query.path(0, 3);
        assert_eq!(dist, 30.0);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn nearest_stop_finds_closest_node() {
        let net = linear_network();
        assert_eq!(nearest_stop(&net, Coordinate::new(22.0, 0.0)), Some(2));
    }
}
