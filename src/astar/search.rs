// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use super::{Options, PathError, PathResult, RouteSegment, Strategy};
use crate::{earth_distance, Graph, PriorityQueue, Station, TRANSFER_ROUTE};

/// Route the rider is on at a given [SearchState].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ActiveRoute<'g> {
    /// Not yet committed to any route - boarding any route is free.
    Start,
    Route(&'g str),
}

impl ActiveRoute<'_> {
    fn is_change_to(&self, route_id: &str) -> bool {
        match *self {
            Self::Start => false,
            Self::Route(r) => r != route_id,
        }
    }
}

/// Node of the search graph. The same station reached on different routes
/// yields different states, which is what makes line changes countable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SearchState<'g> {
    station: &'g str,
    route: ActiveRoute<'g>,
}

/// Move from one [SearchState] to another, along a single edge.
#[derive(Debug, Clone, Copy)]
struct Step<'g> {
    from: SearchState<'g>,
    edge_id: &'g str,
    route_id: &'g str,
    route_change: bool,
}

#[derive(Debug, Clone, Copy)]
struct SearchRecord<'g> {
    cost: f64,

    /// [None] for initial states.
    step: Option<Step<'g>>,
}

/// Finds a route between two stations, without considering
/// [Options::via_stations].
///
/// `arrival` is the route the rider is already on at `from_id`, when the leg
/// continues an earlier one. Leaving that route at `from_id` is then
/// a line change like any other.
pub(super) fn find_leg<'g>(
    g: &'g Graph,
    from_id: &str,
    to_id: &str,
    options: &Options,
    arrival: Option<&'g str>,
) -> Result<PathResult, PathError> {
    let from = g
        .get_station(from_id)
        .ok_or_else(|| PathError::UnknownStation(from_id.to_string()))?;
    let to = g
        .get_station(to_id)
        .ok_or_else(|| PathError::UnknownStation(to_id.to_string()))?;

    if from.id == to.id {
        return Err(PathError::SameStation(from.id.clone()));
    }

    let mut ctx = SearchContext::new(g, to, options);
    match arrival {
        Some(route_id) => ctx.seed_on_route(from, route_id),
        None => ctx.seed(from),
    }
    ctx.run(from)
}

/// Mutable state of a single route search. Never reused between searches.
struct SearchContext<'g, 'o> {
    g: &'g Graph,
    to: &'g Station,
    options: &'o Options,
    queue: PriorityQueue<SearchState<'g>>,
    records: HashMap<SearchState<'g>, SearchRecord<'g>>,
    finalized: HashSet<SearchState<'g>>,
    steps: usize,

    /// Set if the search starts on the route of an earlier leg,
    /// making a route change on the first step a real transfer.
    continues_ride: bool,
}

impl<'g, 'o> SearchContext<'g, 'o> {
    fn new(g: &'g Graph, to: &'g Station, options: &'o Options) -> Self {
        Self {
            g,
            to,
            options,
            queue: PriorityQueue::default(),
            records: HashMap::default(),
            finalized: HashSet::default(),
            steps: 0,
            continues_ride: false,
        }
    }

    /// Adds initial states: one for every route calling at `from`,
    /// or a single uncommitted state if `from` doesn't declare any routes.
    fn seed(&mut self, from: &'g Station) {
        let score = self.heuristic(from);

        if from.routes.is_empty() {
            self.push_initial(
                SearchState {
                    station: &from.id,
                    route: ActiveRoute::Start,
                },
                score,
            );
        } else {
            for route_id in &from.routes {
                self.push_initial(
                    SearchState {
                        station: &from.id,
                        route: ActiveRoute::Route(route_id),
                    },
                    score,
                );
            }
        }
    }

    /// Adds a single initial state on the route the rider arrived on.
    fn seed_on_route(&mut self, from: &'g Station, route_id: &'g str) {
        let score = self.heuristic(from);
        self.continues_ride = true;
        self.push_initial(
            SearchState {
                station: &from.id,
                route: ActiveRoute::Route(route_id),
            },
            score,
        );
    }

    fn push_initial(&mut self, state: SearchState<'g>, score: f64) {
        if self.records.contains_key(&state) {
            return;
        }

        self.records.insert(
            state,
            SearchRecord {
                cost: 0.0,
                step: None,
            },
        );
        self.queue.enqueue(state, score);
    }

    fn run(mut self, from: &Station) -> Result<PathResult, PathError> {
        let mut best: Option<(usize, PathResult)> = None;

        while let Some(state) = self.queue.dequeue() {
            // The queue might keep multiple entries for the same state.
            if !self.finalized.insert(state) {
                continue;
            }

            if state.station == self.to.id {
                let candidate = self.reconstruct(state);
                let transfers = candidate.transfers + usize::from(self.boards_with_change(state));
                trace!(
                    "goal candidate on {:?}: cost {}, {} transfers",
                    state.route,
                    candidate.cost,
                    transfers,
                );

                if best
                    .as_ref()
                    .map_or(true, |(b_transfers, b)| {
                        is_better((transfers, candidate.cost), (*b_transfers, b.cost))
                    })
                {
                    best = Some((transfers, candidate));
                }

                if self.options.strategy == Strategy::Time {
                    break;
                }
                continue;
            }

            self.steps += 1;
            if self.steps > self.options.step_limit {
                return Err(PathError::StepLimitExceeded);
            }

            self.expand(state);
        }

        debug!(
            "{} -> {} ({}): {} states expanded, {}",
            from.id,
            self.to.id,
            self.options.strategy,
            self.steps,
            match &best {
                Some((transfers, r)) => format!("cost {} with {} transfers", r.cost, transfers),
                None => "no route".to_string(),
            },
        );

        best.map(|(_, r)| r).ok_or_else(|| PathError::NoPath {
            from: from.id.clone(),
            to: self.to.id.clone(),
        })
    }

    fn expand(&mut self, state: SearchState<'g>) {
        let g = self.g;
        let options = self.options;
        let cost = self
            .records
            .get(&state)
            .map_or(f64::INFINITY, |r| r.cost);

        for connection in g.get_connections(state.station) {
            // Line changes are priced by the transfer penalty,
            // walking a transfer edge as well would count them twice.
            if connection.is_transfer
                || connection.route_id == TRANSFER_ROUTE
                || connection.neighbor == state.station
            {
                continue;
            }

            if options.is_avoided(&connection.neighbor) {
                continue;
            }

            // Check if the referred station exists
            let Some(neighbor) = g.get_station(&connection.neighbor) else {
                continue;
            };

            let neighbor_state = SearchState {
                station: &neighbor.id,
                route: ActiveRoute::Route(&connection.route_id),
            };
            if self.finalized.contains(&neighbor_state) {
                continue;
            }

            let route_change = state.route.is_change_to(&connection.route_id);
            let mut move_cost = options.costs.edge_cost(g.get_edge(&connection.edge_id));
            if route_change {
                move_cost += options.costs.transfer_penalty(options.strategy);
            }

            // Check if this is the cheapest way to the neighbor state
            let neighbor_cost = cost + move_cost;
            if neighbor_cost
                >= self
                    .records
                    .get(&neighbor_state)
                    .map_or(f64::INFINITY, |r| r.cost)
            {
                continue;
            }

            self.records.insert(
                neighbor_state,
                SearchRecord {
                    cost: neighbor_cost,
                    step: Some(Step {
                        from: state,
                        edge_id: &connection.edge_id,
                        route_id: &connection.route_id,
                        route_change,
                    }),
                },
            );
            let score = neighbor_cost + self.heuristic(neighbor);
            self.queue.enqueue(neighbor_state, score);
        }
    }

    /// Returns zero if either station has no coordinates.
    fn heuristic(&self, station: &Station) -> f64 {
        match (station.position(), self.to.position()) {
            (Some((lat1, lon1)), Some((lat2, lon2))) => {
                earth_distance(lat1, lon1, lat2, lon2) * self.options.costs.heuristic_scale
            }
            _ => 0.0,
        }
    }

    /// Checks if the route to `goal` leaves the arrival route on its first step.
    fn boards_with_change(&self, goal: SearchState<'g>) -> bool {
        if !self.continues_ride {
            return false;
        }

        let mut first = None;
        let mut at = goal;
        while let Some(step) = self.records.get(&at).and_then(|r| r.step) {
            first = Some(step);
            at = step.from;
        }
        first.map_or(false, |step| step.route_change)
    }

    fn reconstruct(&self, goal: SearchState<'g>) -> PathResult {
        let mut steps = Vec::default();
        let mut at = goal;
        while let Some(step) = self.records.get(&at).and_then(|r| r.step) {
            steps.push((step, at.station));
            at = step.from;
        }
        steps.reverse();

        let mut path = vec![at.station.to_string()];
        let mut segments: Vec<RouteSegment> = Vec::default();
        let mut distance_km = 0.0;

        for &(step, to_station) in &steps {
            if path.last().map(String::as_str) != Some(to_station) {
                path.push(to_station.to_string());
            }

            match segments.last_mut() {
                Some(segment) if !step.route_change => {
                    debug_assert_eq!(segment.route_id, step.route_id);
                    segment.to_station = to_station.to_string();
                    segment.stops += 1;
                }
                _ => segments.push(RouteSegment {
                    route_id: step.route_id.to_string(),
                    from_station: step.from.station.to_string(),
                    to_station: to_station.to_string(),
                    stops: 1,
                }),
            }

            distance_km += self.step_distance(&step, to_station);
        }

        PathResult {
            path,
            transfers: segments.len().saturating_sub(1),
            segments,
            cost: self.records.get(&goal).map_or(0.0, |r| r.cost),
            distance_km: Some(distance_km),
            via: Vec::default(),
        }
    }

    fn step_distance(&self, step: &Step<'g>, to_station: &str) -> f64 {
        if let Some(d) = self
            .g
            .get_edge(step.edge_id)
            .and_then(|e| e.distance_km)
            .filter(|d| d.is_finite() && *d >= 0.0)
        {
            return d;
        }

        let a = self.g.get_station(step.from.station).and_then(Station::position);
        let b = self.g.get_station(to_station).and_then(Station::position);
        match (a, b) {
            (Some((lat1, lon1)), Some((lat2, lon2))) => earth_distance(lat1, lon1, lat2, lon2),
            _ => 0.0,
        }
    }
}

/// Compares (transfers, cost) of goal candidates: transfers first, then cost.
fn is_better(candidate: (usize, f64), best: (usize, f64)) -> bool {
    candidate.0 < best.0 || (candidate.0 == best.0 && candidate.1 < best.1)
}
