//! Shared data-model types, configuration and error kinds for the
//! butterfly-osm transit routing engine.
//!
//! This crate has no algorithmic content: it is the vocabulary that
//! `butterfly-geometry`, `butterfly-routing`, `butterfly-io` and
//! `butterfly-plan` all speak.

pub mod config;
pub mod coordinate;
pub mod error;
pub mod polyline;
pub mod stop;
pub mod variant;

pub use config::{ChHeuristic, Config, SpatialBackend};
pub use coordinate::Coordinate;
pub use error::{Error, Result};
pub use polyline::Polyline;
pub use stop::{Stop, StopId};
pub use variant::{RouteId, RouteVariantKey, Variant, VariantId};
