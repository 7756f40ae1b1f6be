// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Connection, Edge, Station};
use std::collections::btree_map::{BTreeMap, Entry};

/// Represents a transit network as a set of [Stations](Station),
/// [Edges](Edge) between them and an adjacency index of [Connections](Connection).
///
/// Route searches only ever borrow the graph immutably, so a single graph
/// can be shared between any number of concurrent searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    stations: BTreeMap<String, (Station, Vec<Connection>)>,
    edges: BTreeMap<String, Edge>,
}

impl Graph {
    /// Returns the number of stations in the graph.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns an iterator over all [Stations](Station) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values().map(|(station, _)| station)
    }

    /// Returns an iterator over all [Edges](Edge) in the graph, ordered by id.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Retrieves a [Station] with the provided id.
    pub fn get_station(&self, id: &str) -> Option<&Station> {
        self.stations.get(id).map(|(station, _)| station)
    }

    /// Checks whether a [Station] with the provided id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.stations.contains_key(id)
    }

    /// Retrieves an [Edge] by its id.
    pub fn get_edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    /// Gets all outgoing [Connections](Connection) from a station with a given id,
    /// in the order they were added.
    pub fn get_connections(&self, from_id: &str) -> &[Connection] {
        self.stations
            .get(from_id)
            .map(|(_, c)| c.as_slice())
            .unwrap_or_default()
    }

    /// Creates or updates a [Station] with `station.id`.
    ///
    /// All outgoing connections are preserved.
    pub fn set_station(&mut self, station: Station) {
        match self.stations.entry(station.id.clone()) {
            Entry::Vacant(e) => {
                e.insert((station, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                e.get_mut().0 = station;
            }
        }
    }

    /// Creates or updates an [Edge] with `edge.id`, without touching
    /// the adjacency index.
    ///
    /// Returns `false` (and leaves the graph untouched) if any endpoint
    /// of the edge doesn't exist in the graph.
    pub fn set_edge(&mut self, edge: Edge) -> bool {
        if !self.contains(&edge.from) || !self.contains(&edge.to) {
            return false;
        }

        self.edges.insert(edge.id.clone(), edge);
        true
    }

    /// Creates or updates an [Edge] with `edge.id`, and a matching [Connection]
    /// in the adjacency index of `edge.from`.
    ///
    /// Returns `false` (and leaves the graph untouched) if any endpoint
    /// of the edge doesn't exist in the graph.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if !self.contains(&edge.from) || !self.contains(&edge.to) {
            return false;
        }

        if let Some(old) = self.edges.get(&edge.id) {
            if let Some((_, connections)) = self.stations.get_mut(&old.from) {
                connections.retain(|c| c.edge_id != edge.id);
            }
        }

        if let Some((_, connections)) = self.stations.get_mut(&edge.from) {
            connections.push(Connection::from(&edge));
        }
        self.set_edge(edge)
    }

    /// Appends a [Connection] to the adjacency index of a station, without
    /// touching the edge list. Used for adjacency indices authored separately
    /// from the edges.
    ///
    /// Returns `false` if either the station or the neighbor doesn't exist.
    pub fn add_connection(&mut self, from_id: &str, connection: Connection) -> bool {
        if !self.contains(&connection.neighbor) {
            return false;
        }

        match self.stations.get_mut(from_id) {
            Some((_, connections)) => {
                connections.push(connection);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str) -> Station {
        Station {
            id: id.to_string(),
            name: id.to_uppercase(),
            lat: Some(0.0),
            lon: Some(0.0),
            routes: vec!["R1".to_string()],
            is_transfer: false,
        }
    }

    fn edge(id: &str, from: &str, to: &str) -> Edge {
        Edge {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            route_id: "R1".to_string(),
            distance_km: Some(1.0),
            time_minutes: Some(2.0),
            is_transfer: false,
            transfer_time_minutes: None,
        }
    }

    #[test]
    fn add_edge_keeps_adjacency_consistent() {
        let mut g = Graph::default();
        g.set_station(station("a"));
        g.set_station(station("b"));
        g.set_station(station("c"));

        assert!(g.add_edge(edge("e1", "a", "b")));
        assert!(g.add_edge(edge("e2", "a", "c")));
        assert_eq!(g.edge_count(), 2);

        let neighbors: Vec<&str> = g
            .get_connections("a")
            .iter()
            .map(|c| c.neighbor.as_str())
            .collect();
        assert_eq!(neighbors, ["b", "c"]);

        // Re-adding an edge under the same id moves its connection
        assert!(g.add_edge(edge("e1", "b", "c")));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.get_connections("a").len(), 1);
        assert_eq!(g.get_connections("b")[0].edge_id, "e1");
    }

    #[test]
    fn add_edge_rejects_unknown_endpoints() {
        let mut g = Graph::default();
        g.set_station(station("a"));

        assert!(!g.add_edge(edge("e1", "a", "x")));
        assert!(!g.add_edge(edge("e2", "x", "a")));
        assert_eq!(g.edge_count(), 0);
        assert!(g.get_connections("a").is_empty());
    }

    #[test]
    fn set_edge_leaves_adjacency_alone() {
        let mut g = Graph::default();
        g.set_station(station("a"));
        g.set_station(station("b"));

        assert!(g.set_edge(edge("e1", "a", "b")));
        assert!(g.get_edge("e1").is_some());
        assert!(g.get_connections("a").is_empty());
    }

    #[test]
    fn set_station_preserves_connections() {
        let mut g = Graph::default();
        g.set_station(station("a"));
        g.set_station(station("b"));
        g.add_edge(edge("e1", "a", "b"));

        let mut renamed = station("a");
        renamed.name = "Alpha".to_string();
        g.set_station(renamed);

        assert_eq!(g.len(), 2);
        assert_eq!(g.get_station("a").map(|s| s.name.as_str()), Some("Alpha"));
        assert_eq!(g.get_connections("a").len(), 1);
    }

    #[test]
    fn unknown_lookups() {
        let g = Graph::default();
        assert!(g.is_empty());
        assert!(g.get_station("a").is_none());
        assert!(g.get_edge("e1").is_none());
        assert!(g.get_connections("a").is_empty());
    }
}
