//! Contraction Hierarchies: shortcut computation, three contraction-order
//! heuristics, and bidirectional queries over the resulting up/down
//! overlay (§4.9).
//!
//! Preprocessing owns a private `RemovableNetwork` copy of the input graph
//! and mutates it node by node; the caller's `Network` is never touched.
//! Once every node has a level, the original edges and the shortcut
//! overlay are partitioned into `adjs_up`/`adjs_down` and queries run
//! `BidirectionalDijkstra` over that partitioned view.

use std::collections::HashMap;
use std::sync::Arc;

use butterfly_common::{ChHeuristic, Config, Coordinate, Stop, StopId};
use priority_queue::PriorityQueue;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::bidirectional::BidirectionalDijkstra;
use crate::dijkstra::Dijkstra;
use crate::edge::{Edge, ShortcutEdge};
use crate::graph::Graph;
use crate::network::Network;
use crate::removable_network::RemovableNetwork;

/// A shortcut candidate: the left (incoming) and right (outgoing) edge
/// that would be concatenated if the shared neighbour were contracted.
type ShortcutPair = (Arc<Edge>, Arc<Edge>);

/// Groups `edges` by `key`, keeping only the minimum-weight edge per key
/// (§4.9.1 step 1: parallel edges between the same pair collapse to one
/// candidate before witness search runs).
fn group_min_weight<'a>(
    edges: impl Iterator<Item = &'a Arc<Edge>>,
    key: impl Fn(&Edge) -> StopId,
) -> HashMap<StopId, Arc<Edge>> {
    let mut group: HashMap<StopId, Arc<Edge>> = HashMap::new();
    for edge in edges {
        let k = key(edge);
        group
            .entry(k)
            .and_modify(|cur| {
                if edge.weight() < cur.weight() {
                    *cur = Arc::clone(edge);
                }
            })
            .or_insert_with(|| Arc::clone(edge));
    }
    group
}

/// Computes the shortcuts that contracting `node` would add, via a
/// `local_steps`-bounded witness search from each remaining predecessor
/// (§4.9.1). Hides `node` for the duration so the witness search runs over
/// the graph as it will look once `node` is actually removed.
fn shortcuts_added_at(rem_net: &mut RemovableNetwork, node: StopId, local_steps: u32) -> Vec<ShortcutPair> {
    let lefts = group_min_weight(rem_net.adjacent_rev(node), |e| e.src());
    let rights = group_min_weight(rem_net.adjacent(node), |e| e.dest());

    rem_net.hide_node(node);

    let mut shortcuts = Vec::new();
    for (&u, left) in &lefts {
        let witness = Dijkstra::run_local_steps(rem_net, u, local_steps);
        for (&w, right) in &rights {
            if witness.dist(w) > left.weight() + right.weight() {
                shortcuts.push((Arc::clone(left), Arc::clone(right)));
            }
        }
    }

    rem_net.unhide_node(node);
    shortcuts
}

/// `ED(v) = |shortcuts(v)| - degree(v) - degree_rev(v)` (§4.9.2). Negative
/// when contracting `v` removes more edges than it adds.
fn edge_difference(rem_net: &RemovableNetwork, node: StopId, shortcuts: &[ShortcutPair]) -> i64 {
    shortcuts.len() as i64 - rem_net.degree(node) as i64 - rem_net.degree_rev(node) as i64
}

fn contract(
    rem_net: &mut RemovableNetwork,
    overlay: &mut Vec<Arc<Edge>>,
    node: StopId,
    shortcuts: Vec<ShortcutPair>,
) {
    rem_net.remove_node(node);
    for (left, right) in shortcuts {
        let shortcut = Arc::new(Edge::Shortcut(ShortcutEdge::new(left, right)));
        rem_net.add_edge(Arc::clone(&shortcut));
        overlay.push(shortcut);
    }
}

/// The network partitioned for CH queries: `adjacent` serves the upward
/// (forward) search, `adjacent_rev` serves the downward (backward) search,
/// reusing `BidirectionalDijkstra` unmodified (§4.9.4).
struct AugmentedGraph {
    nodes: HashMap<StopId, Arc<Stop>>,
    adjs_up: HashMap<StopId, Vec<Arc<Edge>>>,
    adjs_down: HashMap<StopId, Vec<Arc<Edge>>>,
}

impl Graph for AugmentedGraph {
    fn adjacent(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_> {
        Box::new(self.adjs_up.get(&id).into_iter().flatten())
    }

    fn adjacent_rev(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_> {
        Box::new(self.adjs_down.get(&id).into_iter().flatten())
    }

    fn node_ids(&self) -> Box<dyn Iterator<Item = StopId> + '_> {
        Box::new(self.nodes.keys().copied())
    }

    fn contains(&self, id: StopId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn coord(&self, id: StopId) -> Option<Coordinate> {
        self.nodes.get(&id).map(|s| s.coord)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// A preprocessed Contraction Hierarchy: a per-node `level` and an overlay
/// of shortcut edges built from `net`, answerable via bidirectional
/// queries over the level-partitioned adjacency (§3 "CH augmentation").
pub struct ContractionHierarchies {
    level: HashMap<StopId, u32>,
    overlay: Vec<Arc<Edge>>,
    graph: AugmentedGraph,
}

impl ContractionHierarchies {
    /// Preprocesses `net` using the heuristic and parameters in `config`.
    pub fn build(net: &Network, config: &Config) -> Self {
        match config.ch_heuristic {
            ChHeuristic::Lazy => Self::build_lazy_ed(net, config.local_steps),
            ChHeuristic::Periodic => Self::build_periodic_ed(net, config.local_steps, config.periodic_batch),
            ChHeuristic::Random => Self::build_random(net, config.local_steps),
        }
    }

    /// Lazy edge-difference ordering (§4.9.3, recommended default): a
    /// priority queue keyed by ED, recomputed on pop and re-inserted if it
    /// no longer matches the current queue minimum.
    pub fn build_lazy_ed(net: &Network, local_steps: u32) -> Self {
        let mut rem_net = RemovableNetwork::from_network(net);
        let mut overlay = Vec::new();
        let mut level = HashMap::new();

        let mut pq: PriorityQueue<StopId, std::cmp::Reverse<i64>> = PriorityQueue::new();
        for node in net.node_ids() {
            let shortcuts = shortcuts_added_at(&mut rem_net, node, local_steps);
            let ed = edge_difference(&rem_net, node, &shortcuts);
            pq.push(node, std::cmp::Reverse(ed));
        }

        let mut next_level = 0_u32;
        while let Some((node, std::cmp::Reverse(_))) = pq.pop() {
            let current_shortcuts = shortcuts_added_at(&mut rem_net, node, local_steps);
            let current_ed = edge_difference(&rem_net, node, &current_shortcuts);

            if let Some((_, std::cmp::Reverse(top_ed))) = pq.peek() {
                if current_ed > *top_ed {
                    pq.push(node, std::cmp::Reverse(current_ed));
                    continue;
                }
            }

            level.insert(node, next_level);
            contract(&mut rem_net, &mut overlay, node, current_shortcuts);
            next_level += 1;
        }

        tracing::debug!(nodes = net.len(), shortcuts = overlay.len(), "lazy-ED contraction complete");
        Self::finish(net, level, overlay)
    }

    /// Periodic edge-difference ordering (§4.9.3): contract the best
    /// `batch` remaining nodes by their last-known ED, then recompute ED
    /// for everyone still left and repeat.
    pub fn build_periodic_ed(net: &Network, local_steps: u32, batch: u32) -> Self {
        let mut rem_net = RemovableNetwork::from_network(net);
        let mut overlay = Vec::new();
        let mut level = HashMap::new();

        let mut remaining: Vec<StopId> = net.node_ids().collect();
        let mut next_level = 0_u32;
        let batch = batch.max(1) as usize;

        while !remaining.is_empty() {
            let mut costs: Vec<(StopId, i64)> = remaining
                .iter()
                .map(|&node| {
                    let shortcuts = shortcuts_added_at(&mut rem_net, node, local_steps);
                    (node, edge_difference(&rem_net, node, &shortcuts))
                })
                .collect();
            costs.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

            let take = batch.min(costs.len());
            let mut contracted_this_round = Vec::with_capacity(take);
            for &(node, _) in &costs[..take] {
                let shortcuts = shortcuts_added_at(&mut rem_net, node, local_steps);
                level.insert(node, next_level);
                contract(&mut rem_net, &mut overlay, node, shortcuts);
                next_level += 1;
                contracted_this_round.push(node);
            }

            remaining.retain(|node| !contracted_this_round.contains(node));
        }

        tracing::debug!(nodes = net.len(), shortcuts = overlay.len(), "periodic-ED contraction complete");
        Self::finish(net, level, overlay)
    }

    /// Random contraction order (§4.9.3): a baseline with no edge
    /// difference computation at all, used to measure the other two
    /// heuristics against.
    pub fn build_random(net: &Network, local_steps: u32) -> Self {
        Self::build_random_seeded(net, local_steps, rand::random())
    }

    /// As `build_random`, with an explicit RNG seed for reproducible test
    /// fixtures.
    pub fn build_random_seeded(net: &Network, local_steps: u32, seed: u64) -> Self {
        let mut rem_net = RemovableNetwork::from_network(net);
        let mut overlay = Vec::new();
        let mut level = HashMap::new();

        let mut order: Vec<StopId> = net.node_ids().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        for (next_level, node) in order.into_iter().enumerate() {
            let shortcuts = shortcuts_added_at(&mut rem_net, node, local_steps);
            level.insert(node, next_level as u32);
            contract(&mut rem_net, &mut overlay, node, shortcuts);
        }

        tracing::debug!(nodes = net.len(), shortcuts = overlay.len(), "random-order contraction complete");
        Self::finish(net, level, overlay)
    }

    /// Rebuilds a `ContractionHierarchies` from a previously computed level
    /// map and overlay, skipping contraction entirely. Used by
    /// `butterfly-io`'s CH snapshot loader.
    pub fn from_parts(net: &Network, level: HashMap<StopId, u32>, overlay: Vec<Arc<Edge>>) -> Self {
        Self::finish(net, level, overlay)
    }

    fn finish(net: &Network, level: HashMap<StopId, u32>, overlay: Vec<Arc<Edge>>) -> Self {
        let nodes: HashMap<StopId, Arc<Stop>> = net.node_ids().filter_map(|id| net.node(id).map(|s| (id, Arc::new(s.clone())))).collect();
        let mut adjs_up: HashMap<StopId, Vec<Arc<Edge>>> = HashMap::new();
        let mut adjs_down: HashMap<StopId, Vec<Arc<Edge>>> = HashMap::new();
        for &id in nodes.keys() {
            adjs_up.entry(id).or_default();
            adjs_down.entry(id).or_default();
        }

        let original_edges = net.node_ids().flat_map(|id| net.adjacent(id).iter().cloned());
        for edge in original_edges.chain(overlay.iter().cloned()) {
            let (src, dest) = edge.ends();
            if level[&src] < level[&dest] {
                adjs_up.entry(src).or_default().push(Arc::clone(&edge));
            } else {
                adjs_down.entry(dest).or_default().push(edge);
            }
        }

        Self {
            level,
            overlay,
            graph: AugmentedGraph { nodes, adjs_up, adjs_down },
        }
    }

    /// The contraction order index of `node` (0 = contracted first), if
    /// `node` is part of this hierarchy.
    pub fn level(&self, node: StopId) -> Option<u32> {
        self.level.get(&node).copied()
    }

    /// The full node-to-level mapping (§3 "CH augmentation").
    pub fn levels(&self) -> &HashMap<StopId, u32> {
        &self.level
    }

    /// The shortcut edges added to the overlay, in the order they were
    /// created. `butterfly-io`'s CH snapshot persistence serialises these
    /// alongside the level map so a preprocessed hierarchy can be reloaded
    /// without rerunning contraction (§4.9.5).
    pub fn overlay_edges(&self) -> &[Arc<Edge>] {
        &self.overlay
    }

    /// Total number of `ShortcutEdge`s added to the overlay (§4.9.5).
    pub fn no_shortcuts(&self) -> usize {
        self.overlay.len()
    }

    /// Scalar shortest-path distance between `src` and `dest`.
    pub fn dist(&self, src: StopId, dest: StopId) -> f64 {
        BidirectionalDijkstra::run(&self.graph, src, dest).dist()
    }

    /// The shortest path, still containing `ShortcutEdge`s where the
    /// bidirectional search crossed the overlay.
    pub fn raw_path(&self, src: StopId, dest: StopId) -> Vec<Arc<Edge>> {
        BidirectionalDijkstra::run(&self.graph, src, dest).path()
    }

    /// The shortest path fully unpacked into atomic edges (§4.9.4).
    pub fn path(&self, src: StopId, dest: StopId) -> (f64, Vec<Arc<crate::edge::AtomicEdge>>) {
        let bd = BidirectionalDijkstra::run(&self.graph, src, dest);
        let atomic: Vec<Arc<crate::edge::AtomicEdge>> =
            bd.path().iter().flat_map(|e| e.unpack()).map(Arc::new).collect();
        (bd.dist(), atomic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::AtomicEdge;
    use butterfly_common::{Coordinate, RouteVariantKey, Stop};
    use rand::rngs::StdRng;
    use rand::Rng;

    fn stop(id: StopId, x: f64, y: f64) -> Stop {
        Stop::new(id, Coordinate::new(x, y))
    }

    fn edge(src: StopId, dest: StopId, w: f64) -> Arc<Edge> {
        Arc::new(Edge::Atomic(AtomicEdge {
            src,
            dest,
            weight: w,
            length: w,
            real_path: vec![],
            route_ids: vec![RouteVariantKey::new(1, 1)],
        }))
    }

    fn linear_network() -> Network {
        let mut net = Network::from_stops((0..5).map(|i| stop(i, i as f64, 0.0)));
        for i in 0..4 {
            net.add_edge(edge(i, i + 1, 1.0));
        }
        net
    }

    fn random_network(n: i64, seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut net = Network::from_stops((0..n).map(|i| stop(i, i as f64, 0.0)));
        for i in 0..n {
            let edges_from_i = rng.random_range(1..=3.min(n));
            for _ in 0..edges_from_i {
                let j = rng.random_range(0..n);
                if j != i {
                    net.add_edge(edge(i, j, rng.random_range(1.0..10.0)));
                }
            }
        }
        net
    }

    #[test]
    fn lazy_ed_matches_dijkstra_on_linear_path() {
        let net = linear_network();
        let ch = ContractionHierarchies::build_lazy_ed(&net, 50);
        assert_eq!(ch.dist(0, 4), 4.0);
        let (dist, path) = ch.path(0, 4);
        assert_eq!(dist, 4.0);
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn ch_distances_match_dijkstra_on_random_graph() {
        let net = random_network(10, 42);
        let ch = ContractionHierarchies::build_lazy_ed(&net, 50);

        for src in net.node_ids() {
            let dijkstra = Dijkstra::run(&net, src);
            for dest in net.node_ids() {
                assert_eq!(ch.dist(src, dest), dijkstra.dist(dest), "mismatch for ({src}, {dest})");
            }
        }
    }

    #[test]
    fn periodic_ed_matches_dijkstra_on_random_graph() {
        let net = random_network(10, 7);
        let ch = ContractionHierarchies::build_periodic_ed(&net, 50, 3);

        for src in net.node_ids() {
            let dijkstra = Dijkstra::run(&net, src);
            for dest in net.node_ids() {
                assert_eq!(ch.dist(src, dest), dijkstra.dist(dest), "mismatch for ({src}, {dest})");
            }
        }
    }

    #[test]
    fn random_order_matches_dijkstra_on_random_graph() {
        let net = random_network(10, 99);
        let ch = ContractionHierarchies::build_random_seeded(&net, 50, 123);

        for src in net.node_ids() {
            let dijkstra = Dijkstra::run(&net, src);
            for dest in net.node_ids() {
                assert_eq!(ch.dist(src, dest), dijkstra.dist(dest), "mismatch for ({src}, {dest})");
            }
        }
    }

    #[test]
    fn unreachable_pair_is_infinite() {
        let mut net = Network::from_stops([stop(0, 0.0, 0.0), stop(1, 1.0, 0.0), stop(2, 100.0, 0.0), stop(3, 101.0, 0.0)]);
        net.add_edge(edge(0, 1, 1.0));
        net.add_edge(edge(2, 3, 1.0));
        let ch = ContractionHierarchies::build_lazy_ed(&net, 50);
        assert_eq!(ch.dist(0, 2), f64::INFINITY);
        assert!(ch.raw_path(0, 2).is_empty());
    }

    #[test]
    fn no_shortcuts_counts_overlay_edges() {
        let net = random_network(12, 5);
        let ch = ContractionHierarchies::build_lazy_ed(&net, 50);
        assert!(ch.no_shortcuts() <= net.node_ids().map(|id| net.degree(id) * net.degree_rev(id)).sum());
    }

    #[test]
    fn local_steps_witness_limit_never_breaks_correctness() {
        // A long chain means a full witness search from one end needs many
        // relaxations; a tight local_steps limit can only make the
        // contraction add redundant shortcuts, never a wrong distance.
        let mut net = Network::from_stops((0..20).map(|i| stop(i, i as f64, 0.0)));
        for i in 0..19 {
            net.add_edge(edge(i, i + 1, 1.0));
            net.add_edge(edge(i + 1, i, 1.0));
        }
        let ch = ContractionHierarchies::build_lazy_ed(&net, 2);
        let dijkstra = Dijkstra::run(&net, 0);
        for dest in net.node_ids() {
            assert_eq!(ch.dist(0, dest), dijkstra.dist(dest));
        }
    }
}
