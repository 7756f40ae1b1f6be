// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Route-aware trip planning over multi-line public transit networks.
//!
//! A transit network is loaded into a [Graph] of [Stations](Station) and
//! directed [Edges](Edge), each edge belonging to a single route (line).
//! [find_path] runs A* over (station, route) pairs, which allows it to count
//! and penalize line changes. The search honors forbidden stations and can be
//! forced through a list of intermediate ("via") stations.
//!
//! # Example
//!
//! ```no_run
//! let mut g = metrox::Graph::default();
//! let options = metrox::network::Options::default();
//! metrox::network::add_network_from_file(&mut g, &options, "path/to/metro_graph.json")
//!     .expect("failed to load the network");
//!
//! let query = metrox::Options {
//!     strategy: metrox::Strategy::Budget,
//!     ..Default::default()
//! };
//! let route = metrox::find_path(&g, "nust", "police_foundation", &query)
//!     .expect("failed to find route");
//!
//! println!("Route: {:?} ({} transfers)", route.path, route.transfers);
//! ```

mod astar;
mod distance;
mod graph;
pub mod network;
mod queue;

pub use astar::{
    find_path, try_find_path, CostProfile, ErrorKind, Options, PathError, PathResult,
    RouteSegment, Strategy, DEFAULT_COSTS, DEFAULT_STEP_LIMIT,
};
pub use distance::earth_distance;
pub use graph::Graph;
pub use queue::PriorityQueue;

/// Route id reserved for in-station transfer edges.
pub const TRANSFER_ROUTE: &str = "TRANSFER";

/// Represents a point in the [Graph] where riders board or alight.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,

    /// Latitude and longitude, if known. Stations without coordinates
    /// don't contribute to the A* heuristic.
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// Ids of routes calling at this station. The search starts
    /// on every one of these routes.
    pub routes: Vec<String>,

    pub is_transfer: bool,
}

/// Represents a directed connection between two [Stations](Station) on a specific route.
///
/// Self-loops (`from == to`) represent an in-station line change. Such edges
/// (and any other edge with `is_transfer` set) are never traversed by the search;
/// line changes are priced by the [CostProfile] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,

    /// Route this edge belongs to, or [TRANSFER_ROUTE].
    pub route_id: String,

    pub distance_km: Option<f64>,
    pub time_minutes: Option<f64>,
    pub is_transfer: bool,
    pub transfer_time_minutes: Option<f64>,
}

impl Station {
    /// Returns (latitude, longitude) if both are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}

impl Edge {
    /// Returns `true` if the edge starts and ends at the same station.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Represents an entry in the adjacency index of a [Graph]: an outgoing
/// [Edge] as seen from its source station.
///
/// `edge_id` might not refer to an existing edge in the [Graph];
/// the search prices such connections with [CostProfile::missing_edge_cost].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub neighbor: String,
    pub edge_id: String,
    pub route_id: String,
    pub is_transfer: bool,
}

impl From<&Edge> for Connection {
    fn from(e: &Edge) -> Self {
        Self {
            neighbor: e.to.clone(),
            edge_id: e.id.clone(),
            route_id: e.route_id.clone(),
            is_transfer: e.is_transfer,
        }
    }
}
