//! Persisted network format: a JSON object keyed by stop id, each value
//! carrying the stop's opaque payload and its outgoing adjacency (§6).
//!
//! Round-tripping through `save_network`/`load_network` reproduces an
//! identical `Network` up to adjacency order — order is not preserved by
//! a JSON object's key set, only within each stop's `Adjacent` array.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use butterfly_common::{Coordinate, RouteVariantKey, Stop, StopId};
use butterfly_routing::{AtomicEdge, Edge, Network};

use crate::error::{IoError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct AdjacentEntry {
    #[serde(rename = "RouteId")]
    route_id: i64,
    #[serde(rename = "RouteVarId")]
    route_var_id: i64,
    #[serde(rename = "Src")]
    src: StopId,
    #[serde(rename = "Dest")]
    dest: StopId,
    #[serde(rename = "Time")]
    time: f64,
    #[serde(rename = "Length")]
    length: f64,
    #[serde(rename = "Path")]
    path: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeEntry {
    #[serde(rename = "Data")]
    data: Stop,
    #[serde(rename = "Adjacent")]
    adjacent: Vec<AdjacentEntry>,
}

/// Writes `net` to `path` as the persisted network JSON format.
///
/// Only atomic edges are representable; a CH overlay's `ShortcutEdge`s
/// must be unpacked before calling this (they are excluded from the
/// original network by construction, so this only ever fires on a
/// programmer error).
pub fn save_network(net: &Network, path: impl AsRef<Path>) -> Result<()> {
    let mut obj: HashMap<String, NodeEntry> = HashMap::with_capacity(net.len());

    for id in net.node_ids() {
        let stop = net.node(id).expect("node_ids yields only existing nodes").clone();
        let adjacent = net
            .adjacent(id)
            .iter()
            .map(|edge| match edge.as_ref() {
                Edge::Atomic(a) => {
                    let route = a.route_ids.first().copied().unwrap_or(RouteVariantKey::new(0, 0));
                    Ok(AdjacentEntry {
                        route_id: route.route_id,
                        route_var_id: route.variant_id,
                        src: a.src,
                        dest: a.dest,
                        time: a.weight,
                        length: a.length,
                        path: a.real_path.iter().map(|c| [c.x, c.y]).collect(),
                    })
                }
                Edge::Shortcut(_) => Err(IoError::Core(butterfly_common::Error::InvalidInput(
                    "cannot persist a network containing shortcut edges to the JSON format".into(),
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        obj.insert(id.to_string(), NodeEntry { data: stop, adjacent });
    }

    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer(file, &obj)?;
    Ok(())
}

/// Loads a `Network` previously written by `save_network`.
pub fn load_network(path: impl AsRef<Path>) -> Result<Network> {
    let file = BufReader::new(File::open(path)?);
    let obj: HashMap<String, NodeEntry> = serde_json::from_reader(file)?;

    let mut net = Network::new();
    for entry in obj.values() {
        net.add_node(entry.data.clone());
    }

    for (id_str, entry) in &obj {
        let _id: StopId = id_str.parse().map_err(|_| IoError::BadStopId(id_str.clone()))?;
        for adj in &entry.adjacent {
            let real_path: Vec<Coordinate> = adj.path.iter().map(|[x, y]| Coordinate::new(*x, *y)).collect();
            let edge = AtomicEdge {
                src: adj.src,
                dest: adj.dest,
                weight: adj.time,
                length: adj.length,
                real_path,
                route_ids: vec![RouteVariantKey::new(adj.route_id, adj.route_var_id)],
            };
            net.add_edge(Arc::new(Edge::Atomic(edge)));
        }
    }

    Ok(net)
}
