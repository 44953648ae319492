//! The four external-collaborator interfaces `GraphBuilder` consumes (§6):
//! a stop set, a variant set, a path set, and route membership. The core
//! only ever needs `id`/`coord` off a stop, `(route,var)`/`length`/
//! `running_time` off a variant, and `(route,var)`/coordinates off a path —
//! everything else about how those were produced (NDJSON dump, database
//! row, hand-built fixture) is irrelevant here, so they are plain value
//! types rather than traits.

use std::collections::HashMap;

use butterfly_common::{RouteVariantKey, StopId};

/// `(route, variant) → ordered list of stop ids along that variant`,
/// ordering reflecting travel direction (§4.3, §9 open question: per-variant
/// ordering is required even when a source stores stops per *route*).
pub type RouteMembership = HashMap<RouteVariantKey, Vec<StopId>>;
