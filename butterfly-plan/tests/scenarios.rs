//! End-to-end scenarios from the engine's literal test fixtures, run through
//! `GraphBuilder` and the query façade rather than against hand-built edges.

use butterfly_common::Config;
use butterfly_plan::{Algorithm, ChQuery, GraphBuilder, Query, RouteMembership};
use butterfly_routing::ContractionHierarchies;

#[test]
fn linear_path_scenario_matches_builder_and_every_query_algorithm() {
    let (stops, variant, path, key) = butterfly_test::linear_scenario();
    let stop_ids: Vec<i64> = (0..stops.len() as i64).collect();
    let membership: RouteMembership = [(key, stop_ids)].into_iter().collect();

    let net = GraphBuilder::build(stops, vec![variant], vec![path], &membership, &Config::default()).unwrap();

    let query = Query::new(&net);
    for alg in [Algorithm::Dijkstra, Algorithm::Bidirectional, Algorithm::AStar] {
        let result = query.path(0, 3, alg);
        assert_eq!(result.dist, 30.0, "{alg:?} distance mismatch");
        assert_eq!(result.path.len(), 3, "{alg:?} edge count mismatch");
    }

    let ch = ContractionHierarchies::build(&net, &Config::default());
    let ch_query = ChQuery::new(&ch);
    let (dist, edges) = ch_query.path(0, 3);
    assert_eq!(dist, 30.0);
    assert_eq!(edges.len(), 3);
}

#[test]
fn snapping_matches_between_default_and_spatial_backends() {
    let (_, _, path, _) = butterfly_test::linear_scenario();
    let mut spatial_config = Config::default();
    spatial_config.spatial_backend = butterfly_common::SpatialBackend::Spatial;
    let mut default_config = Config::default();
    default_config.spatial_backend = butterfly_common::SpatialBackend::Default;

    let point = butterfly_common::Coordinate::new(15.0, 2.0);
    let spatial = butterfly_test::snap_to_polyline(&path, point, spatial_config.box_size);
    let linear = {
        let segments: Vec<_> = path.segments().collect();
        let index = butterfly_geometry::build_segment_index(default_config.spatial_backend, &segments);
        butterfly_geometry::nearest_segment(index.as_ref(), &segments, point, default_config.box_size)
    };
    assert_eq!(spatial, linear);
}
