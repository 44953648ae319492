//! Spatial A*: Dijkstra with a Euclidean-distance heuristic between each
//! node's stop coordinate and the destination's, admissible whenever edge
//! weights are travel times bounded below by straight-line distance over
//! some uniform speed (§4.8).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use butterfly_common::StopId;
use ordered_float::OrderedFloat;

use crate::edge::Edge;
use crate::graph::Graph;

/// Single-pair shortest path using the node coordinates already present on
/// the graph as the heuristic's source of truth; no separate heuristic
/// function need be supplied by the caller.
#[derive(Debug, Clone)]
pub struct SpatialAStar {
    src: StopId,
    dest: StopId,
    dists: HashMap<StopId, f64>,
    pars: HashMap<StopId, Arc<Edge>>,
    found: bool,
}

impl SpatialAStar {
    pub fn run<G: Graph + ?Sized>(graph: &G, src: StopId, dest: StopId) -> Self {
        let mut dists = HashMap::new();
        let mut pars = HashMap::new();
        dists.insert(src, 0.0_f64);
        let mut found = src == dest;

        let dest_coord = graph.coord(dest);
        let heuristic = |node: StopId| -> f64 {
            match (graph.coord(node), dest_coord) {
                (Some(a), Some(b)) => a.distance(&b),
                _ => 0.0,
            }
        };

        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, StopId)>> = BinaryHeap::new();
        heap.push(Reverse((OrderedFloat(heuristic(src)), src)));

        while !found {
            let Some(Reverse((_, u))) = heap.pop() else { break };
            let dist_u = match dists.get(&u) {
                Some(&d) => d,
                None => continue,
            };

            if u == dest {
                found = true;
                break;
            }

            for edge in graph.adjacent(u) {
                let v = edge.dest();
                let candidate = dist_u + edge.weight();
                if dists.get(&v).is_none_or(|&cur| candidate < cur) {
                    dists.insert(v, candidate);
                    pars.insert(v, Arc::clone(edge));
                    heap.push(Reverse((OrderedFloat(candidate + heuristic(v)), v)));
                }
            }
        }

        Self { src, dest, dists, pars, found }
    }

    pub fn dist(&self) -> f64 {
        if self.found {
            self.dists.get(&self.dest).copied().unwrap_or(f64::INFINITY)
        } else {
            f64::INFINITY
        }
    }

    pub fn path(&self) -> Vec<Arc<Edge>> {
        if !self.found {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut node = self.dest;
        while node != self.src {
            match self.pars.get(&node) {
                Some(edge) => {
                    out.push(Arc::clone(edge));
                    node = edge.src();
                }
                None => break,
            }
        }
        out.reverse();
        out
    }
}
