//! `stops.txt`: stop_id -> name and coordinates.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use super::reader::Table;
use crate::error::Result;

/// Coordinates are kept as the feed wrote them, so output reproduces them
/// byte for byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stop {
    pub name: String,
    pub lat: String,
    pub lon: String,
}

pub type Stops = HashMap<String, Stop>;

pub fn load<R: Read>(table: Table<R>) -> Result<Stops> {
    let mut stops = HashMap::new();
    for rec in table.records::<Record>()? {
        let rec = rec?;
        if rec.stop_id.is_empty() {
            debug!("Skipping stop without stop_id");
            continue;
        }
        stops.insert(
            rec.stop_id,
            Stop {
                name: rec.stop_name,
                lat: rec.stop_lat,
                lon: rec.stop_lon,
            },
        );
    }
    Ok(stops)
}

#[derive(Deserialize)]
struct Record {
    #[serde(default)]
    stop_id: String,
    #[serde(default)]
    stop_name: String,
    #[serde(default)]
    stop_lat: String,
    #[serde(default)]
    stop_lon: String,
}
