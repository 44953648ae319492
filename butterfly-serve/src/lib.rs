//! Minimal HTTP front end exposing point-to-point queries and betweenness
//! ranking over the butterfly-osm transit routing engine (§1: CLI/HTTP
//! entry points are external-collaborator plumbing, not core scope; this
//! crate is one such collaborator, built on `butterfly-plan`'s query
//! façade and nothing else).

pub mod error;
pub mod routes;
pub mod state;

pub use error::ServeError;
pub use routes::router;
pub use state::AppState;
