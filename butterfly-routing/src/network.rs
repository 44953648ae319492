//! Generic weighted directed multigraph with forward/reverse adjacency (§4.4).

use std::collections::HashMap;
use std::sync::Arc;

use butterfly_common::{Stop, StopId};

use crate::edge::Edge;

/// Stops as nodes, edges held as shared, cheaply-cloneable `Arc<Edge>` so
/// that the same edge instance can sit in both `adjs` and `adjs_rev`, and so
/// that Contraction Hierarchies can later fold edges into shortcuts without
/// copying their geometry.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(crate) nodes: HashMap<StopId, Arc<Stop>>,
    pub(crate) adjs: HashMap<StopId, Vec<Arc<Edge>>>,
    pub(crate) adjs_rev: HashMap<StopId, Vec<Arc<Edge>>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stops(stops: impl IntoIterator<Item = Stop>) -> Self {
        let mut net = Self::new();
        for stop in stops {
            net.add_node(stop);
        }
        net
    }

    /// Adds a node with empty adjacency. Adding the same id twice replaces
    /// the stop payload and leaves existing adjacency untouched.
    pub fn add_node(&mut self, stop: Stop) {
        let id = stop.id;
        self.nodes.insert(id, Arc::new(stop));
        self.adjs.entry(id).or_default();
        self.adjs_rev.entry(id).or_default();
    }

    /// Appends to `adjs[src]` and `adjs_rev[dest]`. Both endpoints must
    /// already be present as nodes; adjacency insertion order is preserved,
    /// which downstream Dijkstra tie-breaking depends on for repeatability.
    pub fn add_edge(&mut self, edge: Arc<Edge>) {
        let (src, dest) = edge.ends();
        self.adjs.entry(src).or_default().push(Arc::clone(&edge));
        self.adjs_rev.entry(dest).or_default().push(edge);
    }

    pub fn node(&self, id: StopId) -> Option<&Stop> {
        self.nodes.get(&id).map(|s| s.as_ref())
    }

    pub fn node_ids(&self) -> impl Iterator<Item = StopId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: StopId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn adjacent(&self, id: StopId) -> &[Arc<Edge>] {
        self.adjs.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn adjacent_rev(&self, id: StopId) -> &[Arc<Edge>] {
        self.adjs_rev.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn degree(&self, id: StopId) -> usize {
        self.adjacent(id).len()
    }

    pub fn degree_rev(&self, id: StopId) -> usize {
        self.adjacent_rev(id).len()
    }

    /// A view with `adjs` and `adjs_rev` swapped; node identities preserved.
    pub fn reverse(&self) -> Network {
        Network {
            nodes: self.nodes.clone(),
            adjs: self.adjs_rev.clone(),
            adjs_rev: self.adjs.clone(),
        }
    }

    /// Duplicates the adjacency structure. Stop payloads and edges are
    /// shared via `Arc`, not deep-copied.
    pub fn shallow_copy(&self) -> Network {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::AtomicEdge;
    use butterfly_common::{Coordinate, RouteVariantKey};

    fn stop(id: StopId, x: f64) -> Stop {
        Stop::new(id, Coordinate::new(x, 0.0))
    }

    fn edge(src: StopId, dest: StopId, w: f64) -> Arc<Edge> {
        Arc::new(Edge::Atomic(AtomicEdge {
            src,
            dest,
            weight: w,
            length: w,
            real_path: vec![Coordinate::new(src as f64, 0.0), Coordinate::new(dest as f64, 0.0)],
            route_ids: vec![RouteVariantKey::new(1, 1)],
        }))
    }

    #[test]
    fn add_edge_populates_both_adjacency_directions() {
        let mut net = Network::from_stops([stop(1, 0.0), stop(2, 10.0)]);
        net.add_edge(edge(1, 2, 5.0));
        assert_eq!(net.degree(1), 1);
        assert_eq!(net.degree_rev(2), 1);
        assert_eq!(net.degree(2), 0);
        assert_eq!(net.degree_rev(1), 0);
    }

    #[test]
    fn reverse_twice_matches_original_up_to_adjacency_order() {
        let mut net = Network::from_stops([stop(1, 0.0), stop(2, 10.0), stop(3, 20.0)]);
        net.add_edge(edge(1, 2, 1.0));
        net.add_edge(edge(2, 3, 1.0));

        let double_reversed = net.reverse().reverse();
        for id in net.node_ids() {
            let mut fwd: Vec<(StopId, StopId)> = net.adjacent(id).iter().map(|e| e.ends()).collect();
            let mut dbl: Vec<(StopId, StopId)> = double_reversed.adjacent(id).iter().map(|e| e.ends()).collect();
            fwd.sort();
            dbl.sort();
            assert_eq!(fwd, dbl);
        }
    }

    #[test]
    fn shallow_copy_shares_stop_payloads() {
        let net = Network::from_stops([stop(1, 0.0)]);
        let copy = net.shallow_copy();
        assert!(Arc::ptr_eq(net.nodes.get(&1).unwrap(), copy.nodes.get(&1).unwrap()));
    }
}
