//! Static GTFS reference tables.
//!
//! Routes, stops and trips are small enough to hold in memory and are loaded
//! into lookup tables keyed by their identifier. `stop_times.txt` is never
//! loaded here; it is streamed through [`crate::endpoints`].

pub mod reader;
pub mod routes;
pub mod stops;
pub mod trips;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{OdError, Result};
pub use reader::Table;
pub use routes::{Route, Routes};
pub use stops::{Stop, Stops};
pub use trips::{TripIndex, TripInfo};

/// Locations of the four GTFS files the origin/destination run needs.
#[derive(Clone, Debug)]
pub struct FeedPaths {
    pub routes: PathBuf,
    pub trips: PathBuf,
    pub stop_times: PathBuf,
    pub stops: PathBuf,
}

impl FeedPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            routes: dir.join("routes.txt"),
            trips: dir.join("trips.txt"),
            stop_times: dir.join("stop_times.txt"),
            stops: dir.join("stops.txt"),
        }
    }

    fn all(&self) -> [&Path; 4] {
        [&self.routes, &self.trips, &self.stop_times, &self.stops]
    }

    /// Fails with every absent file listed, before anything is read.
    pub fn ensure_exist(&self) -> Result<()> {
        let missing: Vec<PathBuf> = self
            .all()
            .into_iter()
            .filter(|p| !p.exists())
            .map(Path::to_path_buf)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(OdError::MissingFiles(missing))
        }
    }
}

/// Read-only snapshot of the reference tables for one run.
#[derive(Debug, Default)]
pub struct Reference {
    pub routes: Routes,
    pub stops: Stops,
    pub trips: TripIndex,
}

impl Reference {
    #[tracing::instrument(skip_all)]
    pub fn load(paths: &FeedPaths) -> Result<Self> {
        info!(path = %paths.routes.display(), "Reading routes");
        let routes = routes::load(Table::open(&paths.routes)?)?;
        info!(path = %paths.trips.display(), "Reading trips");
        let trips = trips::load(Table::open(&paths.trips)?)?;
        info!(path = %paths.stops.display(), "Reading stops");
        let stops = stops::load(Table::open(&paths.stops)?)?;

        info!(
            routes = routes.len(),
            trips = trips.len(),
            stops = stops.len(),
            "Reference tables loaded"
        );
        Ok(Self {
            routes,
            stops,
            trips,
        })
    }
}
