//! Graph construction from transit geometry, provider interfaces, and the
//! query façade that sits on top of `butterfly-routing`'s algorithm family.
//!
//! This is the seam between the core engine (stop/variant/path agnostic)
//! and a hosting application: ingestion (`ingest`), the builder that turns
//! ingested data into a `Network` (`builder`), and a unified query API
//! (`query`) that a CLI or HTTP front end calls into.

pub mod builder;
pub mod error;
pub mod ingest;
pub mod provider;
pub mod query;

pub use builder::GraphBuilder;
pub use error::{PlanError, Result};
pub use provider::RouteMembership;
pub use query::{Algorithm, ChQuery, PathResult, Query};
