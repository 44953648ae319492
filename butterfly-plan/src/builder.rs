//! Snaps ordered stops onto route polylines and emits travel-time weighted
//! edges (§4.3). The only component that turns provider data (§6) into a
//! `butterfly_routing::Network`.

use std::collections::HashMap;
use std::sync::Arc;

use butterfly_common::{Config, Coordinate, Error, Polyline, Result, RouteVariantKey, Stop, StopId, Variant};
use butterfly_geometry::{build_segment_index, nearest_segment, project};
use butterfly_routing::{AtomicEdge, Edge, Network};

use crate::provider::RouteMembership;

/// Builds a `Network` from a stop set, a variant set, a path set and route
/// membership (§4.3). Stateless: all per-route working data lives in local
/// variables of `build`, matching the original's per-route `SidesSet`
/// lifetime (built, queried, released).
pub struct GraphBuilder;

impl GraphBuilder {
    /// Runs the full per-route-variant algorithm (§4.3 steps 1-5) and
    /// collects every emitted edge into one `Network`.
    pub fn build(
        stops: impl IntoIterator<Item = Stop>,
        variants: impl IntoIterator<Item = Variant>,
        paths: impl IntoIterator<Item = Polyline>,
        stops_per_route: &RouteMembership,
        config: &Config,
    ) -> Result<Network> {
        let stops: HashMap<StopId, Stop> = stops.into_iter().map(|s| (s.id, s)).collect();
        let variants: HashMap<RouteVariantKey, Variant> = variants.into_iter().map(|v| (v.key, v)).collect();
        let paths: HashMap<RouteVariantKey, Polyline> = paths.into_iter().map(|p| (p.key, p)).collect();

        let mut net = Network::from_stops(stops.values().cloned());

        for (&key, stop_ids) in stops_per_route {
            let variant = variants.get(&key).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "route variant {}/{} has membership but no Variant record",
                    key.route_id, key.variant_id
                ))
            })?;
            let path = paths.get(&key).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "route variant {}/{} has membership but no Path record",
                    key.route_id, key.variant_id
                ))
            })?;

            for edge in Self::build_variant(&stops, stop_ids, path, variant, config)? {
                net.add_edge(Arc::new(Edge::Atomic(edge)));
            }
        }

        Ok(net)
    }

    fn build_variant(
        stops: &HashMap<StopId, Stop>,
        stop_ids: &[StopId],
        path: &Polyline,
        variant: &Variant,
        config: &Config,
    ) -> Result<Vec<AtomicEdge>> {
        let key = path.key;
        let segments: Vec<(Coordinate, Coordinate)> = path.segments().collect();
        let index = build_segment_index(config.spatial_backend, &segments);
        let speed = variant.speed();

        let mut snapped: Vec<(StopId, usize)> = Vec::with_capacity(stop_ids.len());
        for &stop_id in stop_ids {
            let stop = stops.get(&stop_id).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "route variant {}/{} references unknown stop {stop_id}",
                    key.route_id, key.variant_id
                ))
            })?;
            let seg_idx = nearest_segment(index.as_ref(), &segments, stop.coord, config.box_size).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "route variant {}/{} has no segments to snap stop {stop_id} onto",
                    key.route_id, key.variant_id
                ))
            })?;
            snapped.push((stop_id, seg_idx));
        }

        let mut edges = Vec::with_capacity(snapped.len().saturating_sub(1));
        for window in snapped.windows(2) {
            let (s1, i1) = window[0];
            let (s2, i2) = window[1];
            let (a1, b1) = segments[i1];
            let (a2, b2) = segments[i2];
            let (start, _) = project(stops[&s1].coord, a1, b1);
            let (end, _) = project(stops[&s2].coord, a2, b2);

            let (length, real_path) = if i1 == i2 {
                (start.distance(&end), vec![stops[&s1].coord, start, end, stops[&s2].coord])
            } else {
                let mut length = start.distance(&path.coords[i1 + 1]);
                for k in (i1 + 1)..i2 {
                    length += path.coords[k].distance(&path.coords[k + 1]);
                }
                length += path.coords[i2].distance(&end);

                let mut real_path = vec![stops[&s1].coord, start];
                real_path.extend_from_slice(&path.coords[(i1 + 1)..=i2]);
                real_path.push(end);
                real_path.push(stops[&s2].coord);
                (length, real_path)
            };

            if length <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "route variant {}/{} produced a zero-length edge {s1}->{s2}",
                    key.route_id, key.variant_id
                )));
            }

            edges.push(AtomicEdge {
                src: s1,
                dest: s2,
                weight: length / speed,
                length,
                real_path,
                route_ids: vec![key],
            });
        }

        Ok(edges)
    }
}
