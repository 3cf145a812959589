//! Route planning between two countries over the land-border graph.
//!
//! [`plan_route`] validates both endpoints against the snapshot index, runs
//! the breadth-first search from [`crate::path`], and maps the resulting codes
//! back to full country records.
//!
//! Two outcomes are deliberately kept apart:
//! - an endpoint that is not in the dataset is an [`crate::Error::UnknownCountry`];
//! - two valid endpoints with no connecting land path are a normal
//!   [`RouteOutcome::NoRoute`] (islands, other continents).

use serde::Serialize;

use crate::country::Country;
use crate::error::Result;
use crate::path::find_route;
use crate::snapshot::Snapshot;

/// Result of a route query between two known countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Shortest path, both endpoints included.
    Found { steps: Vec<Country> },
    /// The countries are not connected by land borders.
    NoRoute,
}

impl RouteOutcome {
    /// Number of border crossings, or `None` when there is no route.
    pub fn hop_count(&self) -> Option<usize> {
        match self {
            RouteOutcome::Found { steps } => Some(steps.len().saturating_sub(1)),
            RouteOutcome::NoRoute => None,
        }
    }

    pub fn steps(&self) -> &[Country] {
        match self {
            RouteOutcome::Found { steps } => steps,
            RouteOutcome::NoRoute => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found { .. })
    }
}

/// Plan the shortest land route from `start` to `end`.
pub fn plan_route(snapshot: &Snapshot, start: &str, end: &str) -> Result<RouteOutcome> {
    let origin = snapshot.resolve(start)?;
    let destination = snapshot.resolve(end)?;

    let Some(codes) = find_route(snapshot.graph(), &origin.code, &destination.code) else {
        return Ok(RouteOutcome::NoRoute);
    };

    // Every node on a found path is either an endpoint or was expanded, and
    // only indexed codes have outgoing edges, so each code resolves.
    let steps = codes
        .iter()
        .filter_map(|code| snapshot.lookup(code).cloned())
        .collect();

    Ok(RouteOutcome::Found { steps })
}
