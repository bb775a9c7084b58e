//! `routes.txt`: route_id -> display code and name.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use super::reader::Table;
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    pub short_name: String,
    pub long_name: String,
}

pub type Routes = HashMap<String, Route>;

/// Loads every route with a non-empty `route_id`. Later duplicates win.
pub fn load<R: Read>(table: Table<R>) -> Result<Routes> {
    let mut routes = HashMap::new();
    for rec in table.records::<Record>()? {
        let rec = rec?;
        if rec.route_id.is_empty() {
            debug!("Skipping route without route_id");
            continue;
        }
        routes.insert(
            rec.route_id,
            Route {
                short_name: rec.route_short_name,
                long_name: rec.route_long_name,
            },
        );
    }
    Ok(routes)
}

#[derive(Deserialize)]
struct Record {
    #[serde(default)]
    route_id: String,
    #[serde(default)]
    route_short_name: String,
    #[serde(default)]
    route_long_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_routes() {
        let data = "route_id,agency_id,route_short_name,route_long_name,route_type\n\
                    r1,A,326, Estação Diamante / Centro ,3\n\
                    ,A,99,No id,3\n\
                    r2,A,SC01,,3\n";
        let routes = load(Table::from_reader("routes.txt", data.as_bytes()).unwrap()).unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes["r1"].short_name, "326");
        assert_eq!(routes["r1"].long_name, "Estação Diamante / Centro");
        assert_eq!(routes["r2"].long_name, "");
    }
}
