//! Cross-algorithm invariants checked against the shared fixtures in
//! `butterfly-test`, rather than each algorithm re-deriving its own graphs.

use butterfly_routing::{
    BetweennessAlgorithm, BetweennessAnalysis, BidirectionalDijkstra, ContractionHierarchies, DescendantsCount,
    Dijkstra, SpatialAStar,
};

#[test]
fn dijkstra_bidirectional_and_ch_agree_on_a_random_graph() {
    let net = butterfly_test::random_network(10, 1234);
    let ch = ContractionHierarchies::build_lazy_ed(&net, 50);

    for src in net.node_ids() {
        let dijkstra = Dijkstra::run(&net, src);
        for dest in net.node_ids() {
            let reference = dijkstra.dist(dest);
            let bd = BidirectionalDijkstra::run(&net, src, dest).dist();
            let ch_dist = ch.dist(src, dest);
            assert_eq!(bd, reference, "bidirectional mismatch for ({src}, {dest})");
            assert_eq!(ch_dist, reference, "CH mismatch for ({src}, {dest})");
        }
    }
}

#[test]
fn astar_agrees_with_dijkstra_on_same_speed_edges() {
    // `linear_network` gives every stop an x-coordinate equal to its index and
    // unit-weight edges, so the Euclidean heuristic is exactly the remaining
    // travel time: A* is correctness-equivalent here (§9 open question).
    let net = butterfly_test::linear_network(8, 1.0);
    for dest in net.node_ids() {
        let dijkstra = Dijkstra::run(&net, 0);
        let astar = SpatialAStar::run(&net, 0, dest);
        assert_eq!(astar.dist(), dijkstra.dist(dest), "mismatch for dest {dest}");
    }
}

#[test]
fn unreachable_components_report_infinity_across_every_algorithm() {
    let net = butterfly_test::disjoint_components_network();
    let ch = ContractionHierarchies::build_lazy_ed(&net, 50);

    assert_eq!(Dijkstra::run(&net, 0).dist(2), f64::INFINITY);
    assert_eq!(BidirectionalDijkstra::run(&net, 0, 2).dist(), f64::INFINITY);
    assert_eq!(SpatialAStar::run(&net, 0, 2).dist(), f64::INFINITY);
    assert_eq!(ch.dist(0, 2), f64::INFINITY);
    assert!(ch.raw_path(0, 2).is_empty());
}

#[test]
fn tree_and_brute_betweenness_agree_on_a_random_graph() {
    let net = butterfly_test::random_network(12, 55);
    let tree = BetweennessAnalysis::compute(&net, BetweennessAlgorithm::Tree);
    let brute = BetweennessAnalysis::compute(&net, BetweennessAlgorithm::Brute);

    for id in net.node_ids() {
        assert_eq!(tree.score(id), brute.score(id), "mismatch at node {id}");
    }
}

#[test]
fn star_centre_dominates_betweenness_score() {
    let net = butterfly_test::star_network(6);
    let analysis = BetweennessAnalysis::compute(&net, BetweennessAlgorithm::Tree);
    let centre = analysis.score(0);
    for leaf in 1..=6 {
        assert!(centre > analysis.score(leaf));
    }
}

#[test]
fn descendants_count_sums_to_reachable_node_count() {
    let net = butterfly_test::random_network(15, 9);
    for src in net.node_ids() {
        let dijkstra = Dijkstra::run(&net, src);
        let reachable = dijkstra.dists().len() as u64;
        let descendants = DescendantsCount::from_engine(&dijkstra);
        assert_eq!(*descendants.counts().get(&src).unwrap(), reachable);
    }
}

#[test]
fn network_reverse_is_involutive() {
    let net = butterfly_test::random_network(9, 3);
    let double_reversed = net.reverse().reverse();
    for id in net.node_ids() {
        let mut fwd: Vec<_> = net.adjacent(id).iter().map(|e| e.ends()).collect();
        let mut dbl: Vec<_> = double_reversed.adjacent(id).iter().map(|e| e.ends()).collect();
        fwd.sort();
        dbl.sort();
        assert_eq!(fwd, dbl);
    }
}
