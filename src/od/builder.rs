use tracing::debug;

use super::aggregate::GroupSummary;
use super::types::OriginDestinationRow;
use crate::feed::{Reference, Stop};

/// Resolves a group's dominant pair against the reference tables. Unknown
/// routes or stops leave the descriptive fields empty.
pub fn build_row(summary: &GroupSummary, reference: &Reference) -> OriginDestinationRow {
    let route = reference.routes.get(&summary.key.route_id);
    if route.is_none() {
        debug!(route_id = %summary.key.route_id, "Route not in routes table");
    }
    let origin = lookup_stop(reference, &summary.endpoints.first);
    let destination = lookup_stop(reference, &summary.endpoints.last);

    OriginDestinationRow {
        line_code: route.map(|r| r.short_name.clone()).unwrap_or_default(),
        line_name: route.map(|r| r.long_name.clone()).unwrap_or_default(),
        direction_id: summary.key.direction_id.clone(),
        common_headsign: summary.headsign.clone().unwrap_or_default(),
        origin_stop_name: origin.name,
        origin_lat: origin.lat,
        origin_lon: origin.lon,
        destination_stop_name: destination.name,
        destination_lat: destination.lat,
        destination_lon: destination.lon,
        trip_count: summary.trip_count,
        route_id: summary.key.route_id.clone(),
        origin_stop_id: summary.endpoints.first.clone(),
        destination_stop_id: summary.endpoints.last.clone(),
    }
}

fn lookup_stop(reference: &Reference, stop_id: &str) -> Stop {
    match reference.stops.get(stop_id) {
        Some(stop) => stop.clone(),
        None => {
            debug!(stop_id, "Stop not in stops table");
            Stop::default()
        }
    }
}
