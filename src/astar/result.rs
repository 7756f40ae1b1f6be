// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

/// A continuous ride on a single route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSegment {
    pub route_id: String,

    /// Station where the rider boards.
    pub from_station: String,

    /// Station where the rider alights.
    pub to_station: String,

    /// Number of edges ridden, so that the segment covers
    /// `stops + 1` consecutive stations of [PathResult::path].
    pub stops: usize,
}

/// A route found by [find_path](crate::find_path).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Ids of visited stations, in order, starting with the start station
    /// and ending with the destination. Never contains two consecutive
    /// copies of the same station.
    pub path: Vec<String>,

    /// Rides on consecutive routes. Every segment starts where
    /// the previous one has ended, the first segment starts at `path[0]`,
    /// and the last segment ends at the destination.
    pub segments: Vec<RouteSegment>,

    /// Total cost of the route, including transfer penalties.
    pub cost: f64,

    /// Number of line changes, equal to `segments.len() - 1`.
    pub transfers: usize,

    /// Total length of the route, in kilometers.
    pub distance_km: Option<f64>,

    /// Intermediate stations the route was forced through.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub via: Vec<String>,
}

impl PathResult {
    /// Returns the stations covered by every segment, in order.
    /// Consecutive slices share their boundary station.
    pub fn segment_stations(&self) -> impl Iterator<Item = &[String]> + '_ {
        let mut start = 0;
        self.segments.iter().map(move |segment| {
            let end = (start + segment.stops).min(self.path.len().saturating_sub(1));
            let stations = &self.path[start..=end];
            start = end;
            stations
        })
    }

    /// Appends the route of the next leg of a trip, which must start
    /// where this one ends.
    ///
    /// If the last segment of `self` and the first segment of `next` are on
    /// the same route, they are merged into one continuous ride.
    pub(super) fn append_leg(&mut self, next: PathResult) {
        debug_assert_eq!(self.path.last(), next.path.first());

        self.path.extend(next.path.into_iter().skip(1));

        let mut next_segments = next.segments.into_iter();
        if let Some(first) = next_segments.next() {
            match self.segments.last_mut() {
                Some(last) if last.route_id == first.route_id => {
                    last.to_station = first.to_station;
                    last.stops += first.stops;
                }
                _ => self.segments.push(first),
            }
        }
        self.segments.extend(next_segments);

        self.cost += next.cost;
        self.transfers = self.segments.len().saturating_sub(1);
        self.distance_km = match (self.distance_km, next.distance_km) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        };
    }
}
