// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashSet};

use log::{info, warn};

use crate::{Connection, Edge, Graph, Station, TRANSFER_ROUTE};

use super::model::{ConnectionRecord, Document, EdgeRecord, StationRecord, TransferStationRecord};
use super::Options;

/// Average speed assumed for edges without a travel time, in km/h.
const ASSUMED_SPEED_KMH: f64 = 30.0;

/// Walking time of transfer edges without an explicit one, in minutes.
const DEFAULT_TRANSFER_MINUTES: f64 = 3.0;

/// Helper object used for converting a [Document] into a [Graph],
/// repairing incomplete data along the way (if [Options::repair] is set).
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    options: &'a Options,

    /// (station, from route, to route) of every known transfer edge.
    transfer_edges: HashSet<(String, String, String)>,

    /// Number of self-loop edges flagged as transfer edges.
    flagged_transfers: usize,

    /// Number of stations without a full set of coordinates.
    unplaced_stations: usize,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(g: &'a mut Graph, options: &'a Options) -> Self {
        Self {
            g,
            options,
            transfer_edges: HashSet::default(),
            flagged_transfers: 0,
            unplaced_stations: 0,
        }
    }

    /// Adds all stations and edges from the provided [Document].
    pub(super) fn add_document(&mut self, doc: Document) {
        let transfer_station_ids: HashSet<&str> = doc
            .transfer_stations
            .iter()
            .map(|s| s.station_id.as_str())
            .collect();

        for (id, record) in doc.nodes {
            let is_transfer = transfer_station_ids.contains(id.as_str());
            self.add_station(id, record, is_transfer);
        }

        if self.unplaced_stations > 0 {
            warn!(
                "{} stations have no coordinates, route search may be slower",
                self.unplaced_stations
            );
        }

        let mut edges: Vec<Edge> = doc
            .edges
            .into_iter()
            .enumerate()
            .map(|(idx, record)| self.convert_edge(idx, record))
            .collect();

        if self.options.repair {
            info!("flagged {} self-loop edges as transfers", self.flagged_transfers);
            repair_edges(&mut edges);
            self.synthesize_transfer_edges(&doc.transfer_stations, &mut edges);
        }

        // Without repairs, the authored adjacency index is kept as-is
        let derive_adjacency = self.options.repair || doc.adjacency_list.is_empty();
        self.add_edges(edges, derive_adjacency);
        if !derive_adjacency {
            self.add_adjacency(doc.adjacency_list);
        }

        info!(
            "loaded {} stations and {} edges",
            self.g.len(),
            self.g.edge_count()
        );
    }

    fn add_station(&mut self, id: String, record: StationRecord, is_transfer: bool) {
        let (lat, lon) = (record.lat(), record.lon());
        if lat.is_none() || lon.is_none() {
            self.unplaced_stations += 1;
        }

        self.g.set_station(Station {
            name: record.name.unwrap_or_else(|| id.clone()),
            id,
            lat,
            lon,
            is_transfer: is_transfer || record.is_transfer || record.routes_serving.len() > 1,
            routes: record.routes_serving,
        });
    }

    fn convert_edge(&mut self, idx: usize, record: EdgeRecord) -> Edge {
        let id = record
            .id
            .unwrap_or_else(|| format!("{}_{}_{}_{}", record.from, record.to, record.route_id, idx));

        if let (Some(from_route), Some(to_route)) = (record.from_route, record.to_route) {
            if record.from == record.to {
                self.transfer_edges
                    .insert((record.from.clone(), from_route, to_route));
            }
        }

        let is_transfer = match record.is_transfer_edge {
            Some(flag) => flag,
            None if self.options.repair && record.from == record.to => {
                self.flagged_transfers += 1;
                true
            }
            None => false,
        };

        Edge {
            id,
            from: record.from,
            to: record.to,
            route_id: record.route_id,
            distance_km: record.distance_km,
            time_minutes: record.time_minutes,
            is_transfer,
            transfer_time_minutes: record.transfer_time_minutes,
        }
    }

    /// Adds a transfer edge for every allowed line change at every transfer station,
    /// unless the document already has one.
    fn synthesize_transfer_edges(
        &mut self,
        stations: &[TransferStationRecord],
        edges: &mut Vec<Edge>,
    ) {
        let before = edges.len();

        for station in stations {
            for pair in &station.transfer_pairs {
                let key = (
                    station.station_id.clone(),
                    pair.from.clone(),
                    pair.to.clone(),
                );
                if !self.transfer_edges.insert(key) {
                    continue;
                }

                let time = pair.time.unwrap_or(DEFAULT_TRANSFER_MINUTES);
                edges.push(Edge {
                    id: format!("transfer_{}_{}_{}", station.station_id, pair.from, pair.to),
                    from: station.station_id.clone(),
                    to: station.station_id.clone(),
                    route_id: TRANSFER_ROUTE.to_string(),
                    distance_km: Some(0.0),
                    time_minutes: Some(time),
                    is_transfer: true,
                    transfer_time_minutes: Some(time),
                });
            }
        }

        info!("synthesized {} missing transfer edges", edges.len() - before);
    }

    fn add_edges(&mut self, edges: Vec<Edge>, with_connections: bool) {
        let mut dropped = 0;
        for edge in edges {
            let added = if with_connections {
                self.g.add_edge(edge)
            } else {
                self.g.set_edge(edge)
            };

            if !added {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!("dropped {} edges referring to unknown stations", dropped);
        }
    }

    fn add_adjacency(&mut self, adjacency: BTreeMap<String, Vec<ConnectionRecord>>) {
        let mut dropped = 0;
        for (from, connections) in adjacency {
            for c in connections {
                let connection = Connection {
                    neighbor: c.neighbor,
                    edge_id: c.edge_id,
                    route_id: c.route_id,
                    is_transfer: c.is_transfer,
                };

                if !self.g.add_connection(&from, connection) {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!("dropped {} connections referring to unknown stations", dropped);
        }
    }
}

/// Fills in missing travel times (from distances) and transfer times.
fn repair_edges(edges: &mut [Edge]) {
    let (mut timed, mut transfer_timed) = (0, 0);

    for e in edges.iter_mut() {
        if e.time_minutes.map_or(true, |t| t <= 0.0) {
            if let Some(d) = e.distance_km.filter(|&d| d > 0.0) {
                e.time_minutes = Some((d / ASSUMED_SPEED_KMH * 60.0).ceil());
                timed += 1;
            }
        }

        if e.is_transfer && e.transfer_time_minutes.is_none() {
            e.transfer_time_minutes = Some(
                e.time_minutes
                    .filter(|&t| t > 0.0)
                    .unwrap_or(DEFAULT_TRANSFER_MINUTES),
            );
            transfer_timed += 1;
        }
    }

    info!(
        "added travel times to {} edges and transfer times to {} transfer edges",
        timed, transfer_timed
    );
}
