use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use metrox::{PathResult, Strategy};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] metrox::network::Error);

#[derive(Parser)]
struct Cli {
    /// The path to the network document (JSON, optionally gzip or bzip2 compressed)
    graph_file: PathBuf,

    /// Id of the start station
    start: String,

    /// Id of the destination station
    end: String,

    /// Cost model: "time" (fastest) or "budget" (fewest line changes)
    #[arg(short, long, default_value_t = Strategy::Time)]
    strategy: Strategy,

    /// Id of a station the route must not pass through (may be repeated)
    #[arg(short, long)]
    avoid: Vec<String>,

    /// Id of a station the route must pass through (may be repeated, order matters)
    #[arg(short, long)]
    via: Vec<String>,

    /// Print the route as a GeoJSON FeatureCollection instead of plain JSON
    #[arg(long)]
    geojson: bool,

    /// Load the network document as-is, without filling in missing data
    #[arg(long)]
    no_repair: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = load_graph(&cli.graph_file, !cli.no_repair)?;

    let options = metrox::Options {
        strategy: cli.strategy,
        avoid_stations: cli.avoid.into_iter().collect(),
        via_stations: cli.via,
        ..Default::default()
    };
    let route = metrox::try_find_path(&g, &cli.start, &cli.end, &options)?;

    let output = if cli.geojson {
        to_geojson(&g, &route)
    } else {
        serde_json::to_value(&route)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn load_graph<P: AsRef<Path>>(path: P, repair: bool) -> Result<metrox::Graph, GraphLoadError> {
    let mut g = metrox::Graph::default();
    let options = metrox::network::Options {
        repair,
        ..Default::default()
    };
    match metrox::network::add_network_from_file(&mut g, &options, path.as_ref()) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}

/// Converts a route into a FeatureCollection with one LineString per route segment.
fn to_geojson(g: &metrox::Graph, route: &PathResult) -> serde_json::Value {
    let features: Vec<serde_json::Value> = route
        .segments
        .iter()
        .zip(route.segment_stations())
        .map(|(segment, stations)| {
            let coordinates: Vec<[f64; 2]> = stations
                .iter()
                .filter_map(|id| g.get_station(id)?.position())
                .map(|(lat, lon)| [lon, lat])
                .collect();

            json!({
                "type": "Feature",
                "properties": {
                    "route_id": segment.route_id,
                    "from_station": segment.from_station,
                    "to_station": segment.to_station,
                    "stops": segment.stops,
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "properties": {
            "cost": route.cost,
            "transfers": route.transfers,
            "distance_km": route.distance_km,
        },
        "features": features,
    })
}
