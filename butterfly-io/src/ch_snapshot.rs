//! Binary persistence of a preprocessed Contraction Hierarchy: the level
//! map and the shortcut overlay, so a query-serving process can load a CH
//! built offline instead of repeating preprocessing at startup.
//!
//! The JSON network format (`json.rs`) is unsuitable for the overlay: a
//! `ShortcutEdge` is a binary tree whose leaves are atomic edges, and
//! round-tripping it through `Arc` pointer sharing isn't something `serde`
//! can express without extra bookkeeping. Instead shortcuts are recorded as
//! a `Box`-based mirror (`EdgeRecord`) that bincode serialises directly,
//! rebuilt into `Arc<Edge>`s on load.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use butterfly_common::{RouteVariantKey, StopId};
use butterfly_routing::{AtomicEdge, ContractionHierarchies, Edge, Network};
use std::collections::HashMap;

use crate::error::Result;

#[derive(Debug, Serialize, Deserialize)]
struct AtomicEdgeRecord {
    src: StopId,
    dest: StopId,
    weight: f64,
    length: f64,
    real_path: Vec<(f64, f64)>,
    route_ids: Vec<(i64, i64)>,
}

#[derive(Debug, Serialize, Deserialize)]
enum EdgeRecord {
    Atomic(AtomicEdgeRecord),
    Shortcut(Box<EdgeRecord>, Box<EdgeRecord>),
}

impl EdgeRecord {
    fn from_edge(edge: &Edge) -> Self {
        match edge {
            Edge::Atomic(a) => EdgeRecord::Atomic(AtomicEdgeRecord {
                src: a.src,
                dest: a.dest,
                weight: a.weight,
                length: a.length,
                real_path: a.real_path.iter().map(|c| (c.x, c.y)).collect(),
                route_ids: a.route_ids.iter().map(|k| (k.route_id, k.variant_id)).collect(),
            }),
            Edge::Shortcut(s) => {
                EdgeRecord::Shortcut(Box::new(EdgeRecord::from_edge(&s.left)), Box::new(EdgeRecord::from_edge(&s.right)))
            }
        }
    }

    fn into_edge(self) -> Arc<Edge> {
        match self {
            EdgeRecord::Atomic(a) => Arc::new(Edge::Atomic(AtomicEdge {
                src: a.src,
                dest: a.dest,
                weight: a.weight,
                length: a.length,
                real_path: a.real_path.into_iter().map(|(x, y)| butterfly_common::Coordinate::new(x, y)).collect(),
                route_ids: a.route_ids.into_iter().map(|(r, v)| RouteVariantKey::new(r, v)).collect(),
            })),
            EdgeRecord::Shortcut(left, right) => {
                Arc::new(Edge::Shortcut(butterfly_routing::ShortcutEdge::new(left.into_edge(), right.into_edge())))
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChSnapshot {
    level: HashMap<StopId, u32>,
    overlay: Vec<EdgeRecord>,
}

/// Serialises `ch`'s level map and shortcut overlay to `path` as bincode.
/// The original network is not included; the loader needs the same
/// `Network` the hierarchy was built from (typically reloaded separately
/// via `json::load_network`).
pub fn save_ch_snapshot(ch: &ContractionHierarchies, path: impl AsRef<Path>) -> Result<()> {
    let snapshot = ChSnapshot {
        level: ch.levels().clone(),
        overlay: ch.overlay_edges().iter().map(|e| EdgeRecord::from_edge(e)).collect(),
    };
    let file = BufWriter::new(File::create(path)?);
    bincode::serialize_into(file, &snapshot)?;
    Ok(())
}

/// Rebuilds a `ContractionHierarchies` from a snapshot written by
/// `save_ch_snapshot`, against the original `net` it was preprocessed
/// from. Skips contraction entirely.
pub fn load_ch_snapshot(net: &Network, path: impl AsRef<Path>) -> Result<ContractionHierarchies> {
    let file = BufReader::new(File::open(path)?);
    let snapshot: ChSnapshot = bincode::deserialize_from(file)?;
    let overlay: Vec<Arc<Edge>> = snapshot.overlay.into_iter().map(EdgeRecord::into_edge).collect();
    Ok(ContractionHierarchies::from_parts(net, snapshot.level, overlay))
}
