//! Error kinds shared across the butterfly-osm transit routing engine.

use thiserror::Error;

/// Errors surfaced by the shortest-path engine's public APIs.
///
/// Unreachable destinations are a normal result, not an error: algorithms
/// return `(f64::INFINITY, vec![])` instead of raising.
#[derive(Debug, Error)]
pub enum Error {
    /// A zero-length polyline segment, a non-positive variant speed, a stop id
    /// referenced by route membership but absent from the stop set, or a
    /// non-finite coordinate.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A query referenced a stop id absent from the network.
    #[error("stop {0} not found in network")]
    NotFound(i64),

    /// `top_scores(k)` called with `k` outside `[0, scores.len()]`.
    #[error("range error: {0}")]
    RangeError(String),

    /// A shortcut failed to unpack into a chain of atomic edges whose weights
    /// sum to the shortcut's own weight. This is a contraction bug, never a
    /// caller mistake, and is fatal.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// Convenience result type for butterfly-osm routing operations.
pub type Result<T> = std::result::Result<T, Error>;
