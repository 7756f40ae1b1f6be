// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::trace;

use super::search::find_leg;
use super::{check_station, Options, PathError, PathResult};
use crate::Graph;

/// Finds a route from `from_id` to `to_id` passing through all
/// [Options::via_stations] in order, by chaining searches between
/// consecutive waypoints.
///
/// Fails as a whole if any of the legs is infeasible.
pub(super) fn find_via_path(
    g: &Graph,
    from_id: &str,
    to_id: &str,
    options: &Options,
) -> Result<PathResult, PathError> {
    for via_id in &options.via_stations {
        check_station(g, via_id, options)?;
    }

    let mut waypoints: Vec<&str> = Vec::with_capacity(options.via_stations.len() + 2);
    waypoints.push(from_id);
    waypoints.extend(options.via_stations.iter().map(String::as_str));
    waypoints.push(to_id);

    // A leg from a station to itself is trivially satisfied
    waypoints.dedup();
    if waypoints.len() < 2 {
        return Err(PathError::SameStation(from_id.to_string()));
    }

    let mut result: Option<PathResult> = None;
    for (leg, pair) in waypoints.windows(2).enumerate() {
        // Every leg after the first continues on the route the previous one arrived on
        let arrival = result
            .as_ref()
            .and_then(|r| r.segments.last())
            .map(|s| s.route_id.as_str());

        let leg_result = find_leg(g, pair[0], pair[1], options, arrival).map_err(|e| match e {
            PathError::NoPath { from, to } => PathError::ViaLegInfeasible { leg, from, to },
            e => e,
        })?;

        trace!(
            "via leg {}: {} -> {}, cost {}, {} transfers",
            leg,
            pair[0],
            pair[1],
            leg_result.cost,
            leg_result.transfers,
        );

        match result.as_mut() {
            Some(r) => r.append_leg(leg_result),
            None => result = Some(leg_result),
        }
    }

    let mut result = result.ok_or_else(|| PathError::SameStation(from_id.to_string()))?;
    result.via = options.via_stations.clone();
    Ok(result)
}
