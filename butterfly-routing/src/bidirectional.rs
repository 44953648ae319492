//! Bidirectional Dijkstra: alternates a forward search from `src` over
//! `adjacent` and a backward search from `dest` over `adjacent_rev`,
//! stopping once the two frontiers can no longer improve on the best
//! complete path found so far (§4.7).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use butterfly_common::StopId;
use ordered_float::OrderedFloat;

use crate::edge::Edge;
use crate::graph::Graph;

#[derive(Debug, Clone, Default)]
struct Side {
    dists: HashMap<StopId, f64>,
    pars: HashMap<StopId, Arc<Edge>>,
    heap: BinaryHeap<Reverse<(OrderedFloat<f64>, StopId)>>,
}

impl Side {
    fn seeded(root: StopId) -> Self {
        let mut side = Self::default();
        side.dists.insert(root, 0.0);
        side.heap.push(Reverse((OrderedFloat(0.0), root)));
        side
    }

    fn top_dist(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse((d, _))| d.0)
    }

    /// Pops the next non-stale `(dist, node)` entry, or `None` if exhausted.
    fn pop_fresh(&mut self) -> Option<(f64, StopId)> {
        loop {
            let Reverse((OrderedFloat(dist_u), u)) = self.heap.pop()?;
            if self.dists.get(&u).copied() == Some(dist_u) {
                return Some((dist_u, u));
            }
        }
    }

    fn relax(&mut self, dist_u: f64, v: StopId, edge: Arc<Edge>) {
        let candidate = dist_u + edge.weight();
        if self.dists.get(&v).is_none_or(|&cur| candidate < cur) {
            self.dists.insert(v, candidate);
            self.pars.insert(v, edge);
            self.heap.push(Reverse((OrderedFloat(candidate), v)));
        }
    }
}

/// A completed bidirectional search between a single `src`/`dest` pair.
#[derive(Debug, Clone)]
pub struct BidirectionalDijkstra {
    src: StopId,
    dest: StopId,
    fwd: Side,
    bwd: Side,
    best_dist: f64,
    meeting_node: Option<StopId>,
}

impl BidirectionalDijkstra {
    pub fn run<G: Graph + ?Sized>(graph: &G, src: StopId, dest: StopId) -> Self {
        if src == dest {
            let fwd = Side::seeded(src);
            let bwd = Side::seeded(dest);
            return Self { src, dest, fwd, bwd, best_dist: 0.0, meeting_node: Some(src) };
        }

        let mut fwd = Side::seeded(src);
        let mut bwd = Side::seeded(dest);
        let mut best_dist = f64::INFINITY;
        let mut meeting_node = None;

        loop {
            let fwd_top = fwd.top_dist();
            let bwd_top = bwd.top_dist();

            match (fwd_top, bwd_top) {
                (Some(f), Some(b)) if f + b >= best_dist => break,
                (None, _) | (_, None) => break,
                _ => {}
            }

            // Step the side with the currently smaller frontier minimum.
            let advance_forward = fwd_top.unwrap() <= bwd_top.unwrap();

            if advance_forward {
                let Some((dist_u, u)) = fwd.pop_fresh() else { break };
                for edge in graph.adjacent(u) {
                    fwd.relax(dist_u, edge.dest(), Arc::clone(edge));
                }
                if let Some(&bd) = bwd.dists.get(&u) {
                    let total = dist_u + bd;
                    if total < best_dist {
                        best_dist = total;
                        meeting_node = Some(u);
                    }
                }
            } else {
                let Some((dist_u, u)) = bwd.pop_fresh() else { break };
                for edge in graph.adjacent_rev(u) {
                    bwd.relax(dist_u, edge.src(), Arc::clone(edge));
                }
                if let Some(&fd) = fwd.dists.get(&u) {
                    let total = fd + dist_u;
                    if total < best_dist {
                        best_dist = total;
                        meeting_node = Some(u);
                    }
                }
            }
        }

        Self { src, dest, fwd, bwd, best_dist, meeting_node }
    }

    pub fn dist(&self) -> f64 {
        self.best_dist
    }

    /// The shortest path, source-to-destination order. Empty if `dest` is
    /// unreachable from `src`.
    pub fn path(&self) -> Vec<Arc<Edge>> {
        let Some(meet) = self.meeting_node else { return Vec::new() };

        let mut fwd_half = Vec::new();
        let mut node = meet;
        while node != self.src {
            match self.fwd.pars.get(&node) {
                Some(edge) => {
                    fwd_half.push(Arc::clone(edge));
                    node = edge.src();
                }
                None => break,
            }
        }
        fwd_half.reverse();

        let mut bwd_half = Vec::new();
        let mut node = meet;
        while node != self.dest {
            match self.bwd.pars.get(&node) {
                Some(edge) => {
                    bwd_half.push(Arc::clone(edge));
                    node = edge.dest();
                }
                None => break,
            }
        }

        fwd_half.extend(bwd_half);
        fwd_half
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::Dijkstra;
    use crate::edge::AtomicEdge;
    use crate::network::Network;
    use butterfly_common::Coordinate;

    fn stop(id: StopId) -> butterfly_common::Stop {
        butterfly_common::Stop::new(id, Coordinate::new(id as f64, 0.0))
    }

    fn edge(src: StopId, dest: StopId, w: f64) -> Arc<Edge> {
        Arc::new(Edge::Atomic(AtomicEdge {
            src,
            dest,
            weight: w,
            length: w,
            real_path: vec![],
            route_ids: vec![],
        }))
    }

    #[test]
    fn matches_dijkstra_on_a_linear_path() {
        let mut net = Network::from_stops((0..5).map(stop));
        for i in 0..4 {
            net.add_edge(edge(i, i + 1, 1.0));
        }
        let bd = BidirectionalDijkstra::run(&net, 0, 4);
        assert_eq!(bd.dist(), 4.0);
        assert_eq!(bd.path().len(), 4);
    }

    #[test]
    fn src_equals_dest_is_a_zero_length_path() {
        let net = Network::from_stops([stop(0)]);
        let bd = BidirectionalDijkstra::run(&net, 0, 0);
        assert_eq!(bd.dist(), 0.0);
        assert!(bd.path().is_empty());
    }

    #[test]
    fn unreachable_destination_reports_infinite_distance() {
        let mut net = Network::from_stops([stop(0), stop(1), stop(2), stop(3)]);
        net.add_edge(edge(0, 1, 1.0));
        net.add_edge(edge(2, 3, 1.0));
        let bd = BidirectionalDijkstra::run(&net, 0, 3);
        assert_eq!(bd.dist(), f64::INFINITY);
        assert!(bd.path().is_empty());
    }

    #[test]
    fn agrees_with_unidirectional_dijkstra_on_a_denser_graph() {
        let mut net = Network::from_stops((0..6).map(stop));
        net.add_edge(edge(0, 1, 2.0));
        net.add_edge(edge(0, 2, 5.0));
        net.add_edge(edge(1, 2, 1.0));
        net.add_edge(edge(1, 3, 4.0));
        net.add_edge(edge(2, 3, 1.0));
        net.add_edge(edge(2, 4, 7.0));
        net.add_edge(edge(3, 4, 2.0));
        net.add_edge(edge(3, 5, 6.0));
        net.add_edge(edge(4, 5, 1.0));

        for dest in 1..6 {
            let uni = Dijkstra::run(&net, 0);
            let bd = BidirectionalDijkstra::run(&net, 0, dest);
            assert_eq!(bd.dist(), uni.dist(dest), "mismatch for dest {dest}");
        }
    }
}
