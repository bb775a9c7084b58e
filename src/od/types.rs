//! Records produced by the origin/destination pipeline.

use serde::{Deserialize, Serialize};

/// One output row per (route, direction) group. Field order is the column
/// order of both serializations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginDestinationRow {
    #[serde(rename = "linha")]
    pub line_code: String,
    #[serde(rename = "nome_linha")]
    pub line_name: String,
    pub direction_id: String,
    #[serde(rename = "headsign_comum")]
    pub common_headsign: String,
    #[serde(rename = "origem_stop_name")]
    pub origin_stop_name: String,
    #[serde(rename = "origem_lat")]
    pub origin_lat: String,
    #[serde(rename = "origem_lon")]
    pub origin_lon: String,
    #[serde(rename = "destino_stop_name")]
    pub destination_stop_name: String,
    #[serde(rename = "destino_lat")]
    pub destination_lat: String,
    #[serde(rename = "destino_lon")]
    pub destination_lon: String,
    /// Trips of the group that share the dominant origin/destination pair.
    #[serde(rename = "viagens_contadas")]
    pub trip_count: usize,
    pub route_id: String,
    #[serde(rename = "origem_stop_id")]
    pub origin_stop_id: String,
    #[serde(rename = "destino_stop_id")]
    pub destination_stop_id: String,
}

impl OriginDestinationRow {
    pub const HEADER: [&'static str; 14] = [
        "linha",
        "nome_linha",
        "direction_id",
        "headsign_comum",
        "origem_stop_name",
        "origem_lat",
        "origem_lon",
        "destino_stop_name",
        "destino_lat",
        "destino_lon",
        "viagens_contadas",
        "route_id",
        "origem_stop_id",
        "destino_stop_id",
    ];

    /// Field values in [`Self::HEADER`] order.
    pub fn fields(&self) -> [String; 14] {
        [
            self.line_code.clone(),
            self.line_name.clone(),
            self.direction_id.clone(),
            self.common_headsign.clone(),
            self.origin_stop_name.clone(),
            self.origin_lat.clone(),
            self.origin_lon.clone(),
            self.destination_stop_name.clone(),
            self.destination_lat.clone(),
            self.destination_lon.clone(),
            self.trip_count.to_string(),
            self.route_id.clone(),
            self.origin_stop_id.clone(),
            self.destination_stop_id.clone(),
        ]
    }
}
