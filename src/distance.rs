// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Mean radius of Earth, in kilometers.
const EARTH_RADIUS: f64 = 6371.0;

/// Mean diameter of Earth, in kilometers.
const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in kilometers.
///
/// Only used for estimates (the search heuristic and lengths of steps without
/// an authored distance), never as the cost of an [Edge](crate::Edge).
pub fn earth_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    // Rounding may push h a hair above 1 for antipodal points
    EARTH_DIAMETER * h.sqrt().min(1.0).asin()
}
