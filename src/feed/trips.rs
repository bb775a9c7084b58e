//! `trips.txt`: the trip index used to fold endpoints into route groups.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use super::reader::Table;
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripInfo {
    pub route_id: String,
    /// `"0"`, `"1"`, or empty when the feed leaves it out.
    pub direction_id: String,
    pub headsign: String,
}

pub type TripIndex = HashMap<String, TripInfo>;

pub fn load<R: Read>(table: Table<R>) -> Result<TripIndex> {
    let mut trips = HashMap::new();
    for rec in table.records::<Record>()? {
        let rec = rec?;
        if rec.trip_id.is_empty() {
            debug!("Skipping trip without trip_id");
            continue;
        }
        trips.insert(
            rec.trip_id,
            TripInfo {
                route_id: rec.route_id,
                direction_id: rec.direction_id,
                headsign: rec.trip_headsign,
            },
        );
    }
    Ok(trips)
}

#[derive(Deserialize)]
struct Record {
    #[serde(default)]
    trip_id: String,
    #[serde(default)]
    route_id: String,
    #[serde(default)]
    direction_id: String,
    #[serde(default)]
    trip_headsign: String,
}
