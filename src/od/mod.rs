//! Origin/destination inference per (route, direction).
//!
//! Trips are folded into groups keyed by route and direction, the most
//! frequent (first stop, last stop) pair of each group is selected, and the
//! result is joined with route and stop metadata into sorted rows.

pub mod aggregate;
pub mod builder;
pub mod ordering;
pub mod types;
pub mod utility;

use tracing::info;

use crate::endpoints::{self, TripEndpoints};
use crate::error::Result;
use crate::feed::{FeedPaths, Reference};
pub use types::OriginDestinationRow;

/// Aggregates trip endpoints and returns sorted output rows.
pub fn origin_destination(
    endpoints: &TripEndpoints,
    reference: &Reference,
) -> Vec<OriginDestinationRow> {
    let groups = aggregate::aggregate(endpoints, &reference.trips);
    let mut rows: Vec<OriginDestinationRow> = aggregate::summarize(&groups)
        .iter()
        .map(|summary| builder::build_row(summary, reference))
        .collect();
    ordering::sort_rows(&mut rows);
    rows
}

/// Full run over a GTFS directory: checks inputs, loads references, streams
/// stop times and builds the rows.
#[tracing::instrument(skip_all)]
pub fn run(paths: &FeedPaths) -> Result<Vec<OriginDestinationRow>> {
    paths.ensure_exist()?;

    let reference = Reference::load(paths)?;
    let endpoints = endpoints::scan_stop_times(&paths.stop_times)?;
    let rows = origin_destination(&endpoints, &reference);

    info!(rows = rows.len(), "Origin/destination rows built");
    Ok(rows)
}
