//! Base Dijkstra, its terminating variants, and the shortest-path-tree
//! descendants counter that backs betweenness centrality (§4.6).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use butterfly_common::StopId;
use ordered_float::OrderedFloat;

use crate::edge::Edge;
use crate::graph::Graph;

/// Hooks checked once per iteration, before the queue is popped.
///
/// `is_terminated` sees the current top of the queue (or `None` once it is
/// empty) and may break the search early; `update_per_iteration` advances
/// any internal counter. Both default to no-ops, giving plain unbounded
/// Dijkstra.
pub trait Termination {
    fn is_terminated(&self, frontier_top: Option<(f64, StopId)>) -> bool {
        let _ = frontier_top;
        false
    }

    fn update_per_iteration(&mut self) {}
}

/// Exhausts the whole reachable component; the default search.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTermination;

impl Termination for NoTermination {}

/// Stops as soon as `dest` reaches the front of the queue.
#[derive(Debug, Clone, Copy)]
pub struct SingleDestination {
    pub dest: StopId,
}

impl Termination for SingleDestination {
    fn is_terminated(&self, frontier_top: Option<(f64, StopId)>) -> bool {
        matches!(frontier_top, Some((_, node)) if node == self.dest)
    }
}

/// Stops after a fixed number of relaxation rounds; used by CH's witness
/// search to keep preprocessing approximate-but-sound (§4.9.1).
#[derive(Debug, Clone, Copy)]
pub struct LocalSteps {
    limit: u32,
    counter: u32,
}

impl LocalSteps {
    pub fn new(limit: u32) -> Self {
        Self { limit, counter: 0 }
    }
}

impl Termination for LocalSteps {
    fn is_terminated(&self, _frontier_top: Option<(f64, StopId)>) -> bool {
        self.counter >= self.limit
    }

    fn update_per_iteration(&mut self) {
        self.counter += 1;
    }
}

/// Stops once the queue's minimum distance reaches `limit`.
#[derive(Debug, Clone, Copy)]
pub struct LocalDistance {
    pub limit: f64,
}

impl Termination for LocalDistance {
    fn is_terminated(&self, frontier_top: Option<(f64, StopId)>) -> bool {
        matches!(frontier_top, Some((d, _)) if d >= self.limit)
    }
}

/// Single-source shortest paths over any `Graph`.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    src: StopId,
    dists: HashMap<StopId, f64>,
    pars: HashMap<StopId, Arc<Edge>>,
}

impl Dijkstra {
    /// Runs from `src` with no early termination.
    pub fn run<G: Graph + ?Sized>(graph: &G, src: StopId) -> Self {
        Self::from_src(graph, src, NoTermination)
    }

    pub fn run_single_destination<G: Graph + ?Sized>(graph: &G, src: StopId, dest: StopId) -> Self {
        Self::from_src(graph, src, SingleDestination { dest })
    }

    pub fn run_local_steps<G: Graph + ?Sized>(graph: &G, src: StopId, limit: u32) -> Self {
        Self::from_src(graph, src, LocalSteps::new(limit))
    }

    pub fn run_local_distance<G: Graph + ?Sized>(graph: &G, src: StopId, limit: f64) -> Self {
        Self::from_src(graph, src, LocalDistance { limit })
    }

    /// Runs from `src`, breaking early whenever `term.is_terminated` fires.
    pub fn from_src<G: Graph + ?Sized, T: Termination>(graph: &G, src: StopId, mut term: T) -> Self {
        let mut dists = HashMap::new();
        let mut pars = HashMap::new();
        dists.insert(src, 0.0_f64);

        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, StopId)>> = BinaryHeap::new();
        heap.push(Reverse((OrderedFloat(0.0), src)));

        loop {
            let top = heap.peek().map(|Reverse((d, u))| (d.0, *u));
            if term.is_terminated(top) {
                break;
            }
            if top.is_none() {
                break;
            }
            term.update_per_iteration();

            let Reverse((OrderedFloat(dist_u), u)) = heap.pop().unwrap();
            if dists.get(&u).copied() != Some(dist_u) {
                continue; // stale entry from an earlier, since-improved push
            }

            for edge in graph.adjacent(u) {
                let v = edge.dest();
                let w = edge.weight();
                let candidate = dist_u + w;
                if dists.get(&v).is_none_or(|&cur| candidate < cur) {
                    dists.insert(v, candidate);
                    pars.insert(v, Arc::clone(edge));
                    heap.push(Reverse((OrderedFloat(candidate), v)));
                }
            }
        }

        Self { src, dists, pars }
    }

    pub fn src(&self) -> StopId {
        self.src
    }

    pub fn dist(&self, dest: StopId) -> f64 {
        self.dists.get(&dest).copied().unwrap_or(f64::INFINITY)
    }

    pub fn dists(&self) -> &HashMap<StopId, f64> {
        &self.dists
    }

    pub fn pars(&self) -> &HashMap<StopId, Arc<Edge>> {
        &self.pars
    }

    /// Walks the `pars` chain from `dest` back to `src`, yielding edges in
    /// destination-to-source order. Empty if `dest` is unreached.
    pub fn reverse_path_from(&self, dest: StopId) -> Vec<Arc<Edge>> {
        if !self.dists.contains_key(&dest) {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut node = dest;
        while node != self.src {
            match self.pars.get(&node) {
                Some(edge) => {
                    out.push(Arc::clone(edge));
                    node = edge.src();
                }
                None => break,
            }
        }
        out
    }

    /// The shortest path to `dest`, source-to-destination order.
    pub fn path_to(&self, dest: StopId) -> Vec<Arc<Edge>> {
        let mut path = self.reverse_path_from(dest);
        path.reverse();
        path
    }
}

/// Per-node subtree size in the shortest-path tree produced by a completed
/// `Dijkstra` run (§4.6). Backs the "tree" betweenness algorithm.
#[derive(Debug, Clone, Default)]
pub struct DescendantsCount {
    counts: HashMap<StopId, u64>,
}

impl DescendantsCount {
    /// Processes nodes in descending `dist` order so that every child's
    /// count is finalised before it is folded into its parent's.
    pub fn from_engine(engine: &Dijkstra) -> Self {
        let mut by_dist: Vec<(StopId, f64)> = engine.dists.iter().map(|(&id, &d)| (id, d)).collect();
        by_dist.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then(b.0.cmp(&a.0)));

        let mut counts: HashMap<StopId, u64> = HashMap::new();
        for (u, _dist) in by_dist {
            *counts.entry(u).or_insert(0) += 1;
            if u != engine.src {
                if let Some(edge) = engine.pars.get(&u) {
                    let cnt_u = counts[&u];
                    *counts.entry(edge.src()).or_insert(0) += cnt_u;
                }
            }
        }

        Self { counts }
    }

    pub fn counts(&self) -> &HashMap<StopId, u64> {
        &self.counts
    }
}
