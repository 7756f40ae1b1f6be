// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde::Deserialize;

/// Transit network document, as produced by network authoring tools.
/// Unknown fields (like `metadata`) are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct Document {
    pub nodes: BTreeMap<String, StationRecord>,

    #[serde(default)]
    pub edges: Vec<EdgeRecord>,

    #[serde(default)]
    pub adjacency_list: BTreeMap<String, Vec<ConnectionRecord>>,

    #[serde(default)]
    pub transfer_stations: Vec<TransferStationRecord>,
}

/// Coordinates may be spelled in several ways. The long forms win
/// (`latitude` over `lat`, `longitude` over `lng` over `lon`).
#[derive(Debug, Deserialize)]
pub(super) struct StationRecord {
    pub name: Option<String>,

    pub latitude: Option<f64>,
    pub lat: Option<f64>,
    pub longitude: Option<f64>,
    pub lng: Option<f64>,
    pub lon: Option<f64>,

    #[serde(default)]
    pub routes_serving: Vec<String>,

    #[serde(default)]
    pub is_transfer: bool,
}

impl StationRecord {
    pub fn lat(&self) -> Option<f64> {
        self.latitude.or(self.lat)
    }

    pub fn lon(&self) -> Option<f64> {
        self.longitude.or(self.lng).or(self.lon)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EdgeRecord {
    pub id: Option<String>,
    pub from: String,
    pub to: String,
    pub route_id: String,
    pub distance_km: Option<f64>,
    pub time_minutes: Option<f64>,
    pub is_transfer_edge: Option<bool>,
    pub transfer_time_minutes: Option<f64>,
    pub from_route: Option<String>,
    pub to_route: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ConnectionRecord {
    pub neighbor: String,
    pub edge_id: String,
    pub route_id: String,

    #[serde(default)]
    pub is_transfer: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct TransferStationRecord {
    pub station_id: String,

    #[serde(default)]
    pub transfer_pairs: Vec<TransferPairRecord>,
}

/// Allowed line change at a transfer station, with its walking time in minutes.
#[derive(Debug, Deserialize)]
pub(super) struct TransferPairRecord {
    pub from: String,
    pub to: String,
    pub time: Option<f64>,
}
