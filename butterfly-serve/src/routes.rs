//! HTTP handlers: point-to-point routing and betweenness ranking over the
//! `AppState`'s network, backed by `butterfly-plan`'s query façade.

use std::sync::Arc;

use axum::extract::{Query as QueryParams, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use butterfly_common::{Coordinate, StopId};
use butterfly_plan::{Algorithm, ChQuery, Query};
use butterfly_routing::{BetweennessAlgorithm, BetweennessAnalysis, Graph};

use crate::error::ServeError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", get(route))
        .route("/betweenness", get(betweenness))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    nodes: usize,
    ch_loaded: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody { status: "ok", nodes: state.network.len(), ch_loaded: state.ch.is_some() })
}

#[derive(Deserialize)]
struct RouteParams {
    from: StopId,
    to: StopId,
    #[serde(default)]
    algorithm: Option<String>,
}

#[derive(Serialize)]
struct RouteBody {
    dist: f64,
    edges: usize,
    path: Vec<EdgeBody>,
}

#[derive(Serialize)]
struct EdgeBody {
    src: StopId,
    dest: StopId,
    weight: f64,
    length: f64,
    real_path: Vec<(f64, f64)>,
}

fn edge_body(e: &butterfly_routing::AtomicEdge) -> EdgeBody {
    EdgeBody {
        src: e.src,
        dest: e.dest,
        weight: e.weight,
        length: e.length,
        real_path: e.real_path.iter().map(|c| (c.x, c.y)).collect(),
    }
}

/// `GET /route?from=<id>&to=<id>&algorithm=dijkstra|bidirectional|astar|ch`.
/// Defaults to the preprocessed Contraction Hierarchy when one is loaded,
/// falling back to bidirectional Dijkstra otherwise.
async fn route(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<RouteParams>,
) -> Result<Json<RouteBody>, ServeError> {
    if !state.network.contains(params.from) {
        return Err(ServeError::Core(butterfly_common::Error::NotFound(params.from)));
    }
    if !state.network.contains(params.to) {
        return Err(ServeError::Core(butterfly_common::Error::NotFound(params.to)));
    }

    let use_ch = matches!(params.algorithm.as_deref(), Some("ch") | None) && state.ch.is_some();

    if use_ch {
        let ch = state.ch.as_ref().expect("use_ch implies state.ch is Some");
        let query = ChQuery::new(ch);
        let (dist, path) = query.path(params.from, params.to);
        return Ok(Json(RouteBody { dist, edges: path.len(), path: path.iter().map(|e| edge_body(e)).collect() }));
    }

    let alg = match params.algorithm.as_deref() {
        Some("dijkstra") => Algorithm::Dijkstra,
        Some("astar") => Algorithm::AStar,
        _ => Algorithm::Bidirectional,
    };
    let query = Query::new(state.network.as_ref());
    let result = query.path(params.from, params.to, alg);
    let unpacked: Vec<Arc<butterfly_routing::AtomicEdge>> =
        result.path.iter().flat_map(|e| e.unpack()).map(Arc::new).collect();
    Ok(Json(RouteBody { dist: result.dist, edges: unpacked.len(), path: unpacked.iter().map(|e| edge_body(e)).collect() }))
}

#[derive(Deserialize)]
struct BetweennessParams {
    #[serde(default = "default_top")]
    top: usize,
    #[serde(default)]
    algorithm: Option<String>,
}

fn default_top() -> usize {
    10
}

#[derive(Serialize)]
struct BetweennessEntry {
    stop: StopId,
    score: u64,
}

#[derive(Serialize)]
struct BetweennessBody {
    ranked: Vec<BetweennessEntry>,
}

/// `GET /betweenness?top=<k>&algorithm=tree|brute`. Recomputes on every
/// call; a hosting application that wants this cached should memoise it
/// itself (§5: the core keeps no server-side caching concerns).
async fn betweenness(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<BetweennessParams>,
) -> Result<Json<BetweennessBody>, ServeError> {
    let alg = match params.algorithm.as_deref() {
        Some("brute") => BetweennessAlgorithm::Brute,
        _ => BetweennessAlgorithm::Tree,
    };
    let analysis = BetweennessAnalysis::compute(state.network.as_ref(), alg);
    let top = params.top.min(state.network.len());
    let ranked = analysis
        .top_scores(top)
        .map_err(ServeError::Core)?
        .into_iter()
        .map(|stop| BetweennessEntry { stop, score: analysis.score(stop) })
        .collect();
    Ok(Json(BetweennessBody { ranked }))
}

#[allow(dead_code)]
fn nearest(state: &AppState, point: Coordinate) -> Option<StopId> {
    butterfly_plan::query::nearest_stop(state.network.as_ref(), point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use butterfly_common::Config;
    use tower::ServiceExt;

    fn linear_network() -> butterfly_routing::Network {
        butterfly_test::linear_network(4, 10.0)
    }

    #[tokio::test]
    async fn health_reports_node_count() {
        let state = AppState::new(linear_network(), None, Config::default());
        let app = router(state);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn route_returns_distance_without_ch() {
        let state = AppState::new(linear_network(), None, Config::default());
        let app = router(state);
        let response = app
            .oneshot(Request::builder().uri("/route?from=0&to=3").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn route_reports_not_found_for_unknown_stop() {
        let state = AppState::new(linear_network(), None, Config::default());
        let app = router(state);
        let response = app
            .oneshot(Request::builder().uri("/route?from=0&to=999").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
