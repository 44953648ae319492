//! NDJSON dump loaders feeding `GraphBuilder`. One JSON object per line,
//! field names mirroring the stop/variant/path/route dumps this engine was
//! built against — minus the WGS-84 → local-CRS conversion step, which is
//! itself an external collaborator (§1 "out of scope") and assumed already
//! applied upstream of these files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use butterfly_common::{Coordinate, RouteVariantKey, Stop, StopId, Variant};

use crate::error::{PlanError, Result};
use crate::provider::RouteMembership;

fn read_ndjson<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let path_str = path.display().to_string();
    let file = File::open(path).map_err(|source| PlanError::Read { path: path_str.clone(), source })?;
    let reader = BufReader::new(file);
    serde_json::Deserializer::from_reader(reader)
        .into_iter::<T>()
        .map(|r| r.map_err(|source| PlanError::Malformed { path: path_str.clone(), source }))
        .collect()
}

#[derive(Debug, Deserialize)]
struct StopRecord {
    #[serde(rename = "StopId")]
    stop_id: StopId,
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
    #[serde(flatten)]
    attributes: serde_json::Value,
}

/// Loads a stop dump (one `{"StopId", "X", "Y", ...}` object per line).
pub fn load_stops(path: impl AsRef<Path>) -> Result<Vec<Stop>> {
    let records: Vec<StopRecord> = read_ndjson(path.as_ref())?;
    Ok(records
        .into_iter()
        .map(|r| Stop::with_attributes(r.stop_id, Coordinate::new(r.x, r.y), r.attributes))
        .collect())
}

#[derive(Debug, Deserialize)]
struct VariantRecord {
    #[serde(rename = "RouteId")]
    route_id: i64,
    #[serde(rename = "RouteVarId")]
    route_var_id: i64,
    #[serde(rename = "Distance")]
    distance: f64,
    #[serde(rename = "RunningTime")]
    running_time: f64,
}

/// Loads a variant dump (one `{"RouteId", "RouteVarId", "Distance",
/// "RunningTime"}` object per line). Fails fast on non-positive distance or
/// running time (§7 InvalidInput).
pub fn load_variants(path: impl AsRef<Path>) -> Result<Vec<Variant>> {
    let records: Vec<VariantRecord> = read_ndjson(path.as_ref())?;
    records
        .into_iter()
        .map(|r| {
            let key = RouteVariantKey::new(r.route_id, r.route_var_id);
            Variant::new(key, r.distance, r.running_time).map_err(PlanError::from)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct PathRecord {
    #[serde(rename = "RouteId")]
    route_id: i64,
    #[serde(rename = "RouteVarId")]
    route_var_id: i64,
    #[serde(rename = "Coords")]
    coords: Vec<[f64; 2]>,
}

/// Loads a path dump (one `{"RouteId", "RouteVarId", "Coords": [[x,y], ...]}`
/// object per line).
pub fn load_paths(path: impl AsRef<Path>) -> Result<Vec<butterfly_common::Polyline>> {
    let records: Vec<PathRecord> = read_ndjson(path.as_ref())?;
    records
        .into_iter()
        .map(|r| {
            let key = RouteVariantKey::new(r.route_id, r.route_var_id);
            let coords = r.coords.into_iter().map(|[x, y]| Coordinate::new(x, y)).collect();
            butterfly_common::Polyline::new(key, coords).map_err(PlanError::from)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    #[serde(rename = "RouteId")]
    route_id: i64,
    #[serde(rename = "RouteVarId")]
    route_var_id: i64,
    #[serde(rename = "Stops")]
    stops: Vec<StopId>,
}

/// Loads route membership (one `{"RouteId", "RouteVarId", "Stops": [id,
/// ...]}` object per line; the `Stops` ordering is taken as travel
/// direction, per variant).
pub fn load_route_membership(path: impl AsRef<Path>) -> Result<RouteMembership> {
    let records: Vec<RouteRecord> = read_ndjson(path.as_ref())?;
    Ok(records
        .into_iter()
        .map(|r| (RouteVariantKey::new(r.route_id, r.route_var_id), r.stops))
        .collect())
}
