use std::fmt;

use serde::{Deserialize, Serialize};

/// Service-type label assigned to a bus line.
///
/// Declaration order is classification priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    TroncaisMove,
    TroncaisConvencionais,
    Estruturais,
    Alimentadoras,
    Circular,
    VilasFavelas,
    Metro,
}

impl ServiceType {
    pub const ALL: [ServiceType; 7] = [
        ServiceType::TroncaisMove,
        ServiceType::TroncaisConvencionais,
        ServiceType::Estruturais,
        ServiceType::Alimentadoras,
        ServiceType::Circular,
        ServiceType::VilasFavelas,
        ServiceType::Metro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::TroncaisMove => "troncais_move",
            ServiceType::TroncaisConvencionais => "troncais_convencionais",
            ServiceType::Estruturais => "estruturais",
            ServiceType::Alimentadoras => "alimentadoras",
            ServiceType::Circular => "circular",
            ServiceType::VilasFavelas => "vilas_favelas",
            ServiceType::Metro => "metro",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_name_matches_display() {
        for service_type in ServiceType::ALL {
            let json = serde_json::to_string(&service_type).unwrap();
            assert_eq!(json, format!("\"{service_type}\""));
        }
    }
}
