//! Streaming extraction of each trip's first and last stop.
//!
//! `stop_times.txt` is assumed to be grouped by trip and ordered by
//! `stop_sequence` within each trip. That assumption is not checked: a trip
//! whose rows are split into several runs ends up with the endpoints of its
//! last run, and rows out of sequence order give a wrong first/last pair.

use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::feed::Table;

/// First and last stop visited by one trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoints {
    pub first: String,
    pub last: String,
}

/// trip_id -> endpoints, iterated in the order trips first completed.
pub type TripEndpoints = IndexMap<String, Endpoints>;

/// One `(trip_id, stop_id)` row of the stop-times stream.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StopVisit {
    #[serde(default)]
    pub trip_id: String,
    #[serde(default)]
    pub stop_id: String,
}

impl StopVisit {
    pub fn new(trip_id: impl Into<String>, stop_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            stop_id: stop_id.into(),
        }
    }
}

struct PendingTrip {
    trip_id: String,
    first: String,
    last: String,
}

/// Single forward pass over the stop-times stream. Holds only the trip being
/// tracked, plus the finished results.
#[derive(Default)]
pub struct EndpointScanner {
    current: Option<PendingTrip>,
    done: TripEndpoints,
}

impl EndpointScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one visit in. Visits missing either id are ignored.
    pub fn push(&mut self, visit: StopVisit) {
        if visit.trip_id.is_empty() || visit.stop_id.is_empty() {
            return;
        }

        if let Some(pending) = self.current.as_mut() {
            if pending.trip_id == visit.trip_id {
                pending.last = visit.stop_id;
                return;
            }
        }

        self.commit();
        self.current = Some(PendingTrip {
            trip_id: visit.trip_id,
            first: visit.stop_id.clone(),
            last: visit.stop_id,
        });
    }

    fn commit(&mut self) {
        if let Some(pending) = self.current.take() {
            // IndexMap::insert keeps the original slot for a repeated trip
            self.done.insert(
                pending.trip_id,
                Endpoints {
                    first: pending.first,
                    last: pending.last,
                },
            );
        }
    }

    /// Flushes the trip still being tracked and returns the mapping.
    pub fn finish(mut self) -> TripEndpoints {
        self.commit();
        self.done
    }
}

/// Runs the scanner over an in-memory or already-decoded sequence of visits.
pub fn scan<I: IntoIterator<Item = StopVisit>>(visits: I) -> TripEndpoints {
    let mut scanner = EndpointScanner::new();
    for visit in visits {
        scanner.push(visit);
    }
    scanner.finish()
}

/// Streams a stop-times table through the scanner, one row at a time.
pub fn scan_table<R: Read>(table: Table<R>) -> Result<TripEndpoints> {
    let mut scanner = EndpointScanner::new();
    let mut rows = 0usize;
    for visit in table.records::<StopVisit>()? {
        scanner.push(visit?);
        rows += 1;
    }
    let endpoints = scanner.finish();
    info!(rows, trips = endpoints.len(), "Stop times scanned");
    Ok(endpoints)
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn scan_stop_times(path: &Path) -> Result<TripEndpoints> {
    info!("Scanning stop times (this may take a while)");
    scan_table(Table::open(path)?)
}
