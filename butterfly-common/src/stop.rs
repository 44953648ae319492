//! Transit stops: the only entity identities that appear in graph queries.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Integer identifier of a stop. Stop ids are the node identities of the
/// routing graph; everything else about a stop (name, zone, accessibility,
/// ...) is opaque to the core.
pub type StopId = i64;

/// A stop: an id, a coordinate, and opaque attributes the core never reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub coord: Coordinate,
    /// Attributes carried through ingestion and persistence but never
    /// inspected by any algorithm. Kept as an opaque JSON value so that
    /// external providers (§6) can stash arbitrary metadata.
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl Stop {
    pub fn new(id: StopId, coord: Coordinate) -> Self {
        Self {
            id,
            coord,
            attributes: serde_json::Value::Null,
        }
    }

    pub fn with_attributes(id: StopId, coord: Coordinate, attributes: serde_json::Value) -> Self {
        Self { id, coord, attributes }
    }
}
