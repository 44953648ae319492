//! Shared application state: the loaded network plus an optional
//! preprocessed Contraction Hierarchy. Both are immutable once the server
//! starts, so handlers only ever take a shared reference (§5: an immutable
//! `Network` may be queried from many threads at once).

use std::sync::Arc;

use butterfly_common::Config;
use butterfly_routing::{ContractionHierarchies, Network};

/// Cloned per request (all fields are `Arc`-backed, so this is cheap);
/// `axum::extract::State` requires `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub network: Arc<Network>,
    pub ch: Option<Arc<ContractionHierarchies>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(network: Network, ch: Option<ContractionHierarchies>, config: Config) -> Self {
        Self { network: Arc::new(network), ch: ch.map(Arc::new), config: Arc::new(config) }
    }
}
