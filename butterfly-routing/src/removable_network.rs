//! `Network` augmented with node hide/unhide and permanent removal (§4.5).
//!
//! Used internally by Contraction Hierarchies preprocessing as the mutable
//! work graph; hiding the node currently being contracted lets the witness
//! search run over "the graph as it will be once this node is gone" without
//! actually tearing anything down.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use butterfly_common::{Stop, StopId};

use crate::edge::Edge;
use crate::network::Network;

/// Wraps an `Arc<Edge>` so it can live in a `HashSet` keyed by pointer
/// identity rather than by value equality — edges carry floating-point
/// weights and geometry that make value-based dedup both costly and
/// meaningless here; two distinct edges can validly share every field.
#[derive(Clone)]
struct EdgeKey(Arc<Edge>);

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemovableNetwork {
    nodes: HashMap<StopId, Arc<Stop>>,
    adjs: HashMap<StopId, HashSet<EdgeKey>>,
    adjs_rev: HashMap<StopId, HashSet<EdgeKey>>,
    hidden: HashSet<StopId>,
}

impl RemovableNetwork {
    pub fn from_network(net: &Network) -> Self {
        let mut adjs: HashMap<StopId, HashSet<EdgeKey>> = HashMap::new();
        let mut adjs_rev: HashMap<StopId, HashSet<EdgeKey>> = HashMap::new();
        for (&id, edges) in &net.adjs {
            adjs.insert(id, edges.iter().cloned().map(EdgeKey).collect());
        }
        for (&id, edges) in &net.adjs_rev {
            adjs_rev.insert(id, edges.iter().cloned().map(EdgeKey).collect());
        }
        Self {
            nodes: net.nodes.clone(),
            adjs,
            adjs_rev,
            hidden: HashSet::new(),
        }
    }

    pub fn add_edge(&mut self, edge: Arc<Edge>) {
        let (src, dest) = edge.ends();
        self.adjs.entry(src).or_default().insert(EdgeKey(Arc::clone(&edge)));
        self.adjs_rev.entry(dest).or_default().insert(EdgeKey(edge));
    }

    pub fn hide_node(&mut self, id: StopId) {
        self.hidden.insert(id);
    }

    pub fn unhide_node(&mut self, id: StopId) {
        self.hidden.remove(&id);
    }

    pub fn is_hidden(&self, id: StopId) -> bool {
        self.hidden.contains(&id)
    }

    /// Erases `id` from both adjacency maps and every incident edge, in time
    /// proportional to `id`'s own degree (not the whole graph).
    pub fn remove_node(&mut self, id: StopId) {
        let out_edges = self.adjs.remove(&id).unwrap_or_default();
        let in_edges = self.adjs_rev.remove(&id).unwrap_or_default();

        for key in &out_edges {
            if let Some(set) = self.adjs_rev.get_mut(&key.0.dest()) {
                set.remove(key);
            }
        }
        for key in &in_edges {
            if let Some(set) = self.adjs.get_mut(&key.0.src()) {
                set.remove(key);
            }
        }

        self.nodes.remove(&id);
        self.hidden.remove(&id);
    }

    pub fn is_removed(&self, id: StopId) -> bool {
        !self.nodes.contains_key(&id)
    }

    pub fn contains(&self, id: StopId) -> bool {
        self.nodes.contains_key(&id)
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

    /// Adjacency filtered so that hidden endpoints are invisible to
    /// traversal, as a view over intact storage — hide/unhide never touches
    /// the underlying edge sets (§9).
    pub fn adjacent(&self, id: StopId) -> impl Iterator<Item = &Arc<Edge>> + '_ {
        self.adjs
            .get(&id)
            .into_iter()
            .flatten()
            .filter(move |key| !self.hidden.contains(&key.0.src()) && !self.hidden.contains(&key.0.dest()))
            .map(|key| &key.0)
    }

    pub fn adjacent_rev(&self, id: StopId) -> impl Iterator<Item = &Arc<Edge>> + '_ {
        self.adjs_rev
            .get(&id)
            .into_iter()
            .flatten()
            .filter(move |key| !self.hidden.contains(&key.0.src()) && !self.hidden.contains(&key.0.dest()))
            .map(|key| &key.0)
    }

    pub fn degree(&self, id: StopId) -> usize {
        self.adjacent(id).count()
    }

    pub fn degree_rev(&self, id: StopId) -> usize {
        self.adjacent_rev(id).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::AtomicEdge;
    use butterfly_common::Coordinate;

    fn stop(id: StopId) -> Stop {
        Stop::new(id, Coordinate::new(id as f64, 0.0))
    }

    fn edge(src: StopId, dest: StopId) -> Arc<Edge> {
        Arc::new(Edge::Atomic(AtomicEdge {
            src,
            dest,
            weight: 1.0,
            length: 1.0,
            real_path: vec![],
            route_ids: vec![],
        }))
    }

    fn sample() -> RemovableNetwork {
        let mut net = Network::from_stops([stop(1), stop(2), stop(3)]);
        net.add_edge(edge(1, 2));
        net.add_edge(edge(2, 3));
        RemovableNetwork::from_network(&net)
    }

    #[test]
    fn hidden_nodes_are_invisible_without_being_removed() {
        let mut rn = sample();
        rn.hide_node(2);
        assert_eq!(rn.adjacent(1).count(), 0);
        assert!(rn.contains(2));
        rn.unhide_node(2);
        assert_eq!(rn.adjacent(1).count(), 1);
    }

    #[test]
    fn remove_node_deletes_all_incident_edges() {
        let mut rn = sample();
        rn.remove_node(2);
        assert!(!rn.contains(2));
        assert_eq!(rn.degree(1), 0);
        assert_eq!(rn.degree_rev(3), 0);
    }
}
