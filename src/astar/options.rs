// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DEFAULT_STEP_LIMIT;
use crate::Edge;

/// Cost model used to rank candidate routes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Minimize travel time. Line changes cost
    /// [CostProfile::transfer_penalty_time] each.
    ///
    /// The search stops at the first time the destination is reached.
    #[default]
    Time,

    /// Minimize the number of line changes first, and the cost second.
    /// Line changes cost [CostProfile::transfer_penalty_budget] each.
    ///
    /// The search explores every reachable state before returning.
    Budget,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => f.write_str("time"),
            Self::Budget => f.write_str("budget"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" | "fastest" => Ok(Self::Time),
            "budget" | "cheapest" => Ok(Self::Budget),
            _ => Err(format!("unknown strategy: {s} (expected time or budget)")),
        }
    }
}

/// Tunable constants of the route search cost model. Times are in minutes.
///
/// All values must be finite and not less than zero, which
/// [try_find_path](crate::try_find_path) checks with [CostProfile::is_valid].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostProfile {
    /// Added to the cost of a step which changes lines, under [Strategy::Time].
    pub transfer_penalty_time: f64,

    /// Added to the cost of a step which changes lines, under [Strategy::Budget].
    /// Should dominate any realistic ride, so that line changes are avoided.
    pub transfer_penalty_budget: f64,

    /// Multiplier of the crow-flies distance (in km) to the destination,
    /// used as the A* heuristic.
    ///
    /// The heuristic is only a lower bound of the remaining cost (and the
    /// returned routes are only guaranteed to be optimal) if no line runs
    /// faster than `60 / heuristic_scale` km/h in a straight line.
    /// Setting this to zero turns the search into Dijkstra's algorithm.
    pub heuristic_scale: f64,

    /// Multiplier of an [Edge::distance_km] to get its cost, for edges without
    /// [Edge::time_minutes].
    pub distance_scale: f64,

    /// Cost of an [Edge] without a time nor a distance.
    pub fallback_cost: f64,

    /// Cost of a [Connection](crate::Connection) whose edge doesn't exist in the graph.
    pub missing_edge_cost: f64,
}

/// Default [CostProfile]: 8-minute transfers when optimizing for time,
/// 50 when optimizing for line changes, and distances valued at 30 km/h.
pub const DEFAULT_COSTS: CostProfile = CostProfile {
    transfer_penalty_time: 8.0,
    transfer_penalty_budget: 50.0,
    heuristic_scale: 2.0,
    distance_scale: 2.0,
    fallback_cost: 1.0,
    missing_edge_cost: 2.0,
};

impl Default for CostProfile {
    fn default() -> Self {
        DEFAULT_COSTS
    }
}

impl CostProfile {
    /// Returns `true` if every constant is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [
            self.transfer_penalty_time,
            self.transfer_penalty_budget,
            self.heuristic_scale,
            self.distance_scale,
            self.fallback_cost,
            self.missing_edge_cost,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Returns the cost of riding along an edge, without any transfer penalties.
    pub fn edge_cost(&self, edge: Option<&Edge>) -> f64 {
        let Some(edge) = edge else {
            return self.missing_edge_cost;
        };

        if let Some(time) = edge.time_minutes.filter(|&t| t > 0.0) {
            time
        } else if let Some(distance) = edge.distance_km.filter(|&d| d > 0.0) {
            distance * self.distance_scale
        } else {
            self.fallback_cost
        }
    }

    /// Returns the penalty for changing lines under the provided [Strategy].
    pub fn transfer_penalty(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Time => self.transfer_penalty_time,
            Strategy::Budget => self.transfer_penalty_budget,
        }
    }
}

/// Additional controls for [find_path](crate::find_path).
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub strategy: Strategy,

    /// Stations which the route must not pass through.
    pub avoid_stations: BTreeSet<String>,

    /// Stations which the route must pass through, in order.
    pub via_stations: Vec<String>,

    pub costs: CostProfile,

    /// Limits how many states may be expanded in the search of a single leg
    /// before returning [PathError::StepLimitExceeded](crate::PathError::StepLimitExceeded).
    /// The recommended value is [DEFAULT_STEP_LIMIT].
    pub step_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            avoid_stations: BTreeSet::default(),
            via_stations: Vec::default(),
            costs: DEFAULT_COSTS,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

impl Options {
    /// Checks if a station must not be used by the route.
    pub fn is_avoided(&self, station_id: &str) -> bool {
        self.avoid_stations.contains(station_id)
    }
}
