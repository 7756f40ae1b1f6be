// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of transit network documents into a [Graph](crate::Graph).
//!
//! A network document is a JSON object with stations under `nodes`,
//! a list of `edges`, an `adjacency_list` and a list of `transfer_stations`.
//! Documents produced by hand are often incomplete; by default the reader
//! [repairs](Options::repair) them before building the graph.

mod reader;

pub use reader::{
    add_network_from_buffer, add_network_from_file, add_network_from_io, Error, FileFormat,
    Options,
};

#[cfg(test)]
mod tests {
    use super::super::{find_path, Graph, RouteSegment, Strategy};
    use super::*;
    use std::io::Write;

    const DATA: &[u8] = include_bytes!("reader/test_fixtures/simple.json");

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-4),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn load(options: &Options, data: &[u8]) -> Graph {
        let mut g = Graph::default();
        add_network_from_buffer(&mut g, options, data).unwrap();
        g
    }

    fn segment(route_id: &str, from: &str, to: &str, stops: usize) -> RouteSegment {
        RouteSegment {
            route_id: route_id.to_string(),
            from_station: from.to_string(),
            to_station: to.to_string(),
            stops,
        }
    }

    fn check_repaired_graph(g: &Graph) {
        // Check the loaded stations
        assert_eq!(g.len(), 4);
        let g13 = g.get_station("g13").unwrap();
        assert_eq!(g13.name, "G-13");
        assert_almost_eq!(g13.lat.unwrap(), 33.65);
        assert_almost_eq!(g13.lon.unwrap(), 72.999);
        assert!(!g13.is_transfer);
        assert!(g.get_station("faizabad").unwrap().is_transfer);

        // Edge to an unknown station is dropped, one transfer edge is synthesized
        assert_eq!(g.edge_count(), 7);
        assert!(g.get_edge("e6").is_none());
        let synthesized = g.get_edge("transfer_faizabad_green_red").unwrap();
        assert!(synthesized.is_transfer);
        assert!(synthesized.is_self_loop());
        assert_eq!(synthesized.time_minutes, Some(4.0));

        // Missing travel time derived at 30 km/h
        assert_eq!(g.get_edge("e2").unwrap().time_minutes, Some(9.0));

        // Self-loops are flagged as transfers
        let e5 = g.get_edge("e5").unwrap();
        assert!(e5.is_transfer);
        assert_eq!(e5.transfer_time_minutes, Some(2.0));
        assert!(!g.get_edge("e1").unwrap().is_transfer);

        // Adjacency rebuilt from the edges
        assert_eq!(g.get_connections("nust").len(), 2);
        assert_eq!(g.get_connections("g13").len(), 2);
        assert_eq!(g.get_connections("faizabad").len(), 3);
        assert!(g.get_connections("comsats").is_empty());
    }

    #[test]
    fn load_json() {
        check_repaired_graph(&load(&Options::default(), DATA));
    }

    #[test]
    fn load_json_forced_format() {
        let options = Options {
            file_format: FileFormat::Json,
            ..Default::default()
        };
        check_repaired_graph(&load(&options, DATA));
    }

    #[test]
    fn load_gz() {
        let mut e = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        e.write_all(DATA).unwrap();
        let compressed = e.finish().unwrap();

        assert_eq!(FileFormat::detect(&compressed), FileFormat::JsonGz);
        check_repaired_graph(&load(&Options::default(), &compressed));

        let options = Options {
            file_format: FileFormat::JsonGz,
            ..Default::default()
        };
        check_repaired_graph(&load(&options, &compressed));
    }

    #[test]
    fn load_bz2() {
        let mut e = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        e.write_all(DATA).unwrap();
        let compressed = e.finish().unwrap();

        assert_eq!(FileFormat::detect(&compressed), FileFormat::JsonBz2);
        check_repaired_graph(&load(&Options::default(), &compressed));
    }

    #[test]
    fn load_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(DATA).unwrap();
        f.flush().unwrap();

        let mut g = Graph::default();
        add_network_from_file(&mut g, &Options::default(), f.path()).unwrap();
        check_repaired_graph(&g);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut g = Graph::default();
        let err = add_network_from_file(&mut g, &Options::default(), dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn load_invalid_json() {
        let mut g = Graph::default();
        let err = add_network_from_buffer(&mut g, &Options::default(), b"{\"nodes\": [").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(g.is_empty());
    }

    #[test]
    fn load_without_repairs() {
        let options = Options {
            repair: false,
            ..Default::default()
        };
        let g = load(&options, DATA);

        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 6);
        assert!(g.get_edge("transfer_faizabad_green_red").is_none());
        assert_eq!(g.get_edge("e2").unwrap().time_minutes, None);
        assert!(!g.get_edge("e5").unwrap().is_transfer);

        // Authored adjacency is kept, minus the connection to an unknown station
        assert_eq!(g.get_connections("nust").len(), 2);
        assert_eq!(g.get_connections("g13").len(), 2);
        assert_eq!(g.get_connections("faizabad").len(), 1);
        assert!(g.get_connections("g13")[1].is_transfer);
    }

    #[test]
    fn load_coordinate_spellings() {
        let data = br#"{
            "nodes": {
                "a": {"latitude": 33.7, "lat": 1.0, "longitude": 73.0, "lng": 2.0, "lon": 3.0},
                "b": {"lat": 33.71, "lng": 73.01, "lon": 3.0},
                "c": {"lat": 33.72, "lon": 73.02}
            }
        }"#;
        let g = load(&Options::default(), data);

        for (id, lat, lon) in [("a", 33.7, 73.0), ("b", 33.71, 73.01), ("c", 33.72, 73.02)] {
            let (station_lat, station_lon) = g.get_station(id).unwrap().position().unwrap();
            assert_almost_eq!(station_lat, lat);
            assert_almost_eq!(station_lon, lon);
        }
    }

    #[test]
    fn load_station_without_coordinates() {
        let data = br#"{
            "nodes": {
                "a": {"name": "A", "lat": 33.7, "lng": 73.0, "routes_serving": ["r"]},
                "b": {"name": "B", "routes_serving": ["r"]},
                "c": {"name": "C", "latitude": 33.72, "routes_serving": ["r"]}
            },
            "edges": [
                {"id": "ab", "from": "a", "to": "b", "route_id": "r", "time_minutes": 4},
                {"id": "bc", "from": "b", "to": "c", "route_id": "r", "time_minutes": 5}
            ]
        }"#;
        let g = load(&Options::default(), data);

        assert_eq!(g.len(), 3);
        let b = g.get_station("b").unwrap();
        assert_eq!((b.lat, b.lon), (None, None));
        assert!(g.get_station("c").unwrap().position().is_none());

        let r = find_path(&g, "a", "c", &crate::Options::default()).unwrap();
        assert_eq!(r.path, ["a", "b", "c"]);
        assert_almost_eq!(r.cost, 9.0);
    }

    #[test]
    fn route_over_loaded_network() {
        let g = load(&Options::default(), DATA);

        let fast = find_path(&g, "nust", "comsats", &crate::Options::default()).unwrap();
        assert_eq!(fast.path, ["nust", "g13", "faizabad", "comsats"]);
        assert_eq!(
            fast.segments,
            [
                segment("red", "nust", "faizabad", 2),
                segment("green", "faizabad", "comsats", 1)
            ]
        );
        assert_eq!(fast.transfers, 1);
        assert_almost_eq!(fast.cost, 6.0 + 9.0 + 7.0 + 8.0);
        assert_almost_eq!(fast.distance_km.unwrap(), 6.5);

        let cheap = find_path(
            &g,
            "nust",
            "comsats",
            &crate::Options {
                strategy: Strategy::Budget,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cheap.path, ["nust", "comsats"]);
        assert_eq!(cheap.segments, [segment("blue", "nust", "comsats", 1)]);
        assert_almost_eq!(cheap.cost, 45.0);
    }

    #[test]
    fn route_over_unrepaired_network() {
        let options = Options {
            repair: false,
            ..Default::default()
        };
        let g = load(&options, DATA);

        // e2 is priced by its distance
        let r = find_path(&g, "nust", "comsats", &crate::Options::default()).unwrap();
        assert_eq!(r.path, ["nust", "g13", "faizabad", "comsats"]);
        assert_almost_eq!(r.cost, 6.0 + 8.4 + 7.0 + 8.0);
    }
}
