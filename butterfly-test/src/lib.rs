//! Synthetic stop/variant/path/network fixtures shared across the
//! butterfly-osm transit routing engine's test suites.
//!
//! Kept as a separate crate (rather than `#[cfg(test)]` helpers duplicated
//! in every downstream crate) so that `butterfly-plan` and `butterfly-serve`
//! integration tests can build the same literal scenarios from §8 of the
//! engine's specification without re-deriving them.

use std::sync::Arc;

use butterfly_common::{Coordinate, Polyline, RouteVariantKey, Stop, StopId, Variant};
use butterfly_geometry::nearest_segment;
use butterfly_routing::{AtomicEdge, Edge, Network};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A straight line of `n` stops spaced `spacing` metres apart along the
/// x-axis, ids `0..n`.
pub fn linear_stops(n: i64, spacing: f64) -> Vec<Stop> {
    (0..n).map(|i| Stop::new(i, Coordinate::new(i as f64 * spacing, 0.0))).collect()
}

/// The route-variant, polyline and membership behind §8's "Linear path"
/// scenario: stops at `(0,0),(10,0),(20,0),(30,0)`, a single straight
/// polyline through them, and a variant whose `speed == 1.0`.
pub fn linear_scenario() -> (Vec<Stop>, Variant, Polyline, RouteVariantKey) {
    let key = RouteVariantKey::new(1, 1);
    let stops = linear_stops(4, 10.0);
    let coords: Vec<Coordinate> = stops.iter().map(|s| s.coord).collect();
    let total_length: f64 = coords.windows(2).map(|w| w[0].distance(&w[1])).sum();
    let variant = Variant::new(key, total_length, total_length).expect("positive length and time");
    let path = Polyline::new(key, coords).expect("well-formed polyline");
    (stops, variant, path, key)
}

/// A `Network` built directly from atomic edges, bypassing `GraphBuilder`
/// geometry — for algorithm-level tests (Dijkstra, CH, betweenness) that
/// only care about the weighted graph, not snapping.
pub fn network_from_edges(stops: impl IntoIterator<Item = Stop>, edges: impl IntoIterator<Item = (StopId, StopId, f64)>) -> Network {
    let mut net = Network::from_stops(stops);
    for (src, dest, weight) in edges {
        net.add_edge(Arc::new(Edge::Atomic(AtomicEdge {
            src,
            dest,
            weight,
            length: weight,
            real_path: vec![],
            route_ids: vec![RouteVariantKey::new(0, 0)],
        })));
    }
    net
}

/// A chain of `n` stops `0..n` connected by unit-weight edges in both
/// directions, ids laid out along the x-axis for A*'s heuristic.
pub fn linear_network(n: i64, weight: f64) -> Network {
    let stops = linear_stops(n, 1.0);
    let mut edges = Vec::new();
    for i in 0..n - 1 {
        edges.push((i, i + 1, weight));
        edges.push((i + 1, i, weight));
    }
    network_from_edges(stops, edges)
}

/// §8's "Parallel variants" scenario: two stops `A` (0) and `B` (1)
/// connected by two edges of differing weight, modelling two route
/// variants with running times 100 and 80.
pub fn parallel_variants_network() -> Network {
    let stops = vec![Stop::new(0, Coordinate::new(0.0, 0.0)), Stop::new(1, Coordinate::new(100.0, 0.0))];
    network_from_edges(stops, [(0, 1, 100.0), (0, 1, 80.0)])
}

/// §8's "Unreachable" scenario: two disjoint components, `0-1` and `2-3`,
/// with no edge between them.
pub fn disjoint_components_network() -> Network {
    let stops = linear_stops(4, 10.0);
    network_from_edges(stops, [(0, 1, 1.0), (2, 3, 1.0)])
}

/// §8's betweenness scenario: an undirected 5-node star with centre `0`
/// and leaves `1..=leaves`, modelled as edges in both directions so every
/// leaf-to-leaf shortest path passes through the centre.
pub fn star_network(leaves: i64) -> Network {
    let stops = linear_stops(leaves + 1, 1.0);
    let mut edges = Vec::new();
    for leaf in 1..=leaves {
        edges.push((0, leaf, 1.0));
        edges.push((leaf, 0, 1.0));
    }
    network_from_edges(stops, edges)
}

/// A reproducible random directed graph over `n` nodes, 1-3 outgoing edges
/// per node with weights in `[1.0, 10.0)`, for CH-vs-Dijkstra correctness
/// checks (§8 "CH correctness on a 10-node random graph").
pub fn random_network(n: i64, seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    let stops = linear_stops(n, 1.0);
    let mut edges = Vec::new();
    for i in 0..n {
        let fan_out = rng.random_range(1..=3.min(n));
        for _ in 0..fan_out {
            let j = rng.random_range(0..n);
            if j != i {
                edges.push((i, j, rng.random_range(1.0..10.0)));
            }
        }
    }
    network_from_edges(stops, edges)
}

/// Snaps `point` onto the nearest segment of `path` using the `spatial`
/// backend, for geometry-level tests that want a realistic index without
/// pulling in `butterfly-plan`'s `GraphBuilder`.
pub fn snap_to_polyline(path: &Polyline, point: Coordinate, box_size: f64) -> Option<usize> {
    let segments: Vec<(Coordinate, Coordinate)> = path.segments().collect();
    let index = butterfly_geometry::build_segment_index(butterfly_common::SpatialBackend::Spatial, &segments);
    nearest_segment(index.as_ref(), &segments, point, box_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use butterfly_routing::Dijkstra;

    #[test]
    fn linear_scenario_matches_spec_distance() {
        let (stops, variant, path, key) = linear_scenario();
        assert_eq!(stops.len(), 4);
        assert_eq!(variant.speed(), 1.0);
        assert_eq!(path.key, key);
    }

    #[test]
    fn parallel_variants_network_prefers_cheaper_edge() {
        let net = parallel_variants_network();
        let dijkstra = Dijkstra::run(&net, 0);
        assert_eq!(dijkstra.dist(1), 80.0);
    }

    #[test]
    fn disjoint_components_are_unreachable() {
        let net = disjoint_components_network();
        let dijkstra = Dijkstra::run(&net, 0);
        assert_eq!(dijkstra.dist(2), f64::INFINITY);
    }

    #[test]
    fn star_network_has_expected_shape() {
        let net = star_network(4);
        assert_eq!(net.degree(0), 4);
        assert_eq!(net.degree(1), 1);
    }

    #[test]
    fn snap_to_polyline_finds_nearest_segment() {
        let (_, _, path, _) = linear_scenario();
        let nearest = snap_to_polyline(&path, Coordinate::new(15.0, 1.0), 150.0);
        assert_eq!(nearest, Some(1));
    }

    #[test]
    fn random_network_is_reproducible_for_a_fixed_seed() {
        let a = random_network(10, 42);
        let b = random_network(10, 42);
        for id in a.node_ids() {
            let edges_a: Vec<_> = a.adjacent(id).iter().map(|e| (e.dest(), e.weight())).collect();
            let edges_b: Vec<_> = b.adjacent(id).iter().map(|e| (e.dest(), e.weight())).collect();
            assert_eq!(edges_a, edges_b);
        }
    }
}
