// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed state expansions per leg in
/// [try_find_path](crate::try_find_path) before [PathError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Reasons why [try_find_path](crate::try_find_path) did not produce a route.
///
/// [find_path](crate::find_path) collapses all of these into [None]:
/// for a trip planner, a missing route is an expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A start, end or via station doesn't exist in the graph.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The start and end of the trip are the same station.
    #[error("start and end are the same station: {0}")]
    SameStation(String),

    /// A start, end or via station is also listed as a station to avoid.
    #[error("station is forbidden: {0}")]
    AvoidedStation(String),

    /// No route exists from `from` to `to` under the current constraints.
    #[error("no route from {from} to {to}")]
    NoPath { from: String, to: String },

    /// One of the legs between consecutive waypoints has no route.
    /// `leg` is zero-based.
    #[error("via leg {leg} from {from} to {to} is infeasible")]
    ViaLegInfeasible { leg: usize, from: String, to: String },

    /// The [CostProfile](crate::CostProfile) has a negative or non-finite constant.
    #[error("invalid cost profile: costs must be finite and non-negative")]
    InvalidCosts,

    /// Route search has exceeded its limit of expanded states.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}

/// Coarse classification of a [PathError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request refers to stations which don't exist, or is ill-formed.
    Input,

    /// The request's constraints (avoided or via stations) can't be satisfied.
    Constraint,

    /// The destination is unreachable.
    NoPathFound,
}

impl PathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownStation(_) | Self::SameStation(_) | Self::InvalidCosts => {
                ErrorKind::Input
            }
            Self::AvoidedStation(_) | Self::ViaLegInfeasible { .. } => ErrorKind::Constraint,
            Self::NoPath { .. } | Self::StepLimitExceeded => ErrorKind::NoPathFound,
        }
    }
}
