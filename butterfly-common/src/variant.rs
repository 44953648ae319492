//! Route variants: one direction of a bus route, carrying a scalar speed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type RouteId = i64;
pub type VariantId = i64;

/// Identifies one direction of one bus route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteVariantKey {
    pub route_id: RouteId,
    pub variant_id: VariantId,
}

impl RouteVariantKey {
    pub fn new(route_id: RouteId, variant_id: VariantId) -> Self {
        Self { route_id, variant_id }
    }
}

/// A route-variant's total length and running time, giving a single
/// position-independent `speed` used to convert polyline distance into
/// travel time (§4.3 step 4).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Variant {
    pub key: RouteVariantKey,
    pub length: f64,
    pub running_time: f64,
}

impl Variant {
    /// Validates `length > 0` and `running_time > 0` before constructing.
    pub fn new(key: RouteVariantKey, length: f64, running_time: f64) -> Result<Self> {
        if !(running_time.is_finite() && running_time > 0.0) {
            return Err(Error::InvalidInput(format!(
                "variant {route_id}/{variant_id} has non-positive running_time {running_time}",
                route_id = key.route_id,
                variant_id = key.variant_id,
            )));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(Error::InvalidInput(format!(
                "variant {route_id}/{variant_id} has non-positive length {length}",
                route_id = key.route_id,
                variant_id = key.variant_id,
            )));
        }
        Ok(Self { key, length, running_time })
    }

    /// `length / running_time`, guaranteed strictly positive by `new`.
    pub fn speed(&self) -> f64 {
        self.length / self.running_time
    }
}
