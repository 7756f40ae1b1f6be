// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod options;
mod result;
mod search;
mod via;

pub use error::{ErrorKind, PathError, DEFAULT_STEP_LIMIT};
pub use options::{CostProfile, Options, Strategy, DEFAULT_COSTS};
pub use result::{PathResult, RouteSegment};

use crate::Graph;

/// Uses a route-aware [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the cheapest route between two stations in the provided graph.
///
/// Returns [None] if there is no route between the two stations satisfying
/// the provided [Options], or if the request is ill-formed (unknown or forbidden
/// start or end, or a trip from a station to itself).
/// Use [try_find_path] to learn why no route was returned.
///
/// The search considers (station, route) pairs rather than bare stations,
/// and every change of routes costs a [Strategy]-dependent penalty.
/// Transfer edges of the graph are never traversed.
///
/// The default [CostProfile::heuristic_scale] assumes lines slower than 30 km/h.
/// With faster lines, [Strategy::Time] searches might return slightly suboptimal
/// routes; lower the scale if that's a concern.
pub fn find_path(g: &Graph, start_id: &str, end_id: &str, options: &Options) -> Option<PathResult> {
    try_find_path(g, start_id, end_id, options).ok()
}

/// Same as [find_path], but returns the reason why no route was found.
pub fn try_find_path(
    g: &Graph,
    start_id: &str,
    end_id: &str,
    options: &Options,
) -> Result<PathResult, PathError> {
    if !options.costs.is_valid() {
        return Err(PathError::InvalidCosts);
    }

    check_station(g, start_id, options)?;
    check_station(g, end_id, options)?;

    if options.via_stations.is_empty() {
        search::find_leg(g, start_id, end_id, options, None)
    } else {
        via::find_via_path(g, start_id, end_id, options)
    }
}

/// Ensures a station exists and is not forbidden.
fn check_station(g: &Graph, id: &str, options: &Options) -> Result<(), PathError> {
    if !g.contains(id) {
        Err(PathError::UnknownStation(id.to_string()))
    } else if options.is_avoided(id) {
        Err(PathError::AvoidedStation(id.to_string()))
    } else {
        Ok(())
    }
}
