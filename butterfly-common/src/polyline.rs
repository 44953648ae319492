//! Route polylines: the geometry that `GraphBuilder` snaps stops onto.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::variant::RouteVariantKey;

/// An ordered sequence of coordinates tracing a route-variant's physical
/// path on the ground. Consecutive pairs form segments; no segment may have
/// zero length and every coordinate must be finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub key: RouteVariantKey,
    pub coords: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(key: RouteVariantKey, coords: Vec<Coordinate>) -> Result<Self> {
        if coords.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "polyline {route_id}/{variant_id} has fewer than 2 coordinates",
                route_id = key.route_id,
                variant_id = key.variant_id,
            )));
        }
        for c in &coords {
            if !c.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "polyline {route_id}/{variant_id} has a non-finite coordinate",
                    route_id = key.route_id,
                    variant_id = key.variant_id,
                )));
            }
        }
        for w in coords.windows(2) {
            if w[0].distance(&w[1]) == 0.0 {
                return Err(Error::InvalidInput(format!(
                    "polyline {route_id}/{variant_id} has a zero-length segment",
                    route_id = key.route_id,
                    variant_id = key.variant_id,
                )));
            }
        }
        Ok(Self { key, coords })
    }

    /// Consecutive coordinate pairs: `[(p0,p1), (p1,p2), ...]`.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.coords.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.coords.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> RouteVariantKey {
        RouteVariantKey::new(1, 1)
    }

    #[test]
    fn rejects_short_polylines() {
        assert!(Polyline::new(key(), vec![Coordinate::new(0.0, 0.0)]).is_err());
    }

    #[test]
    fn rejects_zero_length_segment() {
        let coords = vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0)];
        assert!(Polyline::new(key(), coords).is_err());
    }

    #[test]
    fn rejects_non_finite_coordinate() {
        let coords = vec![Coordinate::new(0.0, 0.0), Coordinate::new(f64::NAN, 1.0)];
        assert!(Polyline::new(key(), coords).is_err());
    }

    #[test]
    fn segments_cover_all_consecutive_pairs() {
        let coords = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(2.0, 0.0),
        ];
        let path = Polyline::new(key(), coords).unwrap();
        assert_eq!(path.segment_count(), 2);
        assert_eq!(path.segments().count(), 2);
    }
}
