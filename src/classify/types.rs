//! Input and output records of the classification step.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::category::ServiceType;
use crate::od::OriginDestinationRow;

fn default_direction() -> String {
    "0".to_string()
}

/// A line to classify, as read from the origin/destination table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LineRecord {
    #[serde(default)]
    pub linha: String,
    #[serde(default)]
    pub nome_linha: String,
    #[serde(default)]
    pub route_id: String,
    /// `"0"` when the column is absent; an empty value stays empty.
    #[serde(default = "default_direction")]
    pub direction_id: String,
}

impl From<&OriginDestinationRow> for LineRecord {
    fn from(row: &OriginDestinationRow) -> Self {
        Self {
            linha: row.line_code.clone(),
            nome_linha: row.line_name.clone(),
            route_id: row.route_id.clone(),
            direction_id: row.direction_id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub linha: String,
    pub nome_linha: String,
    pub route_id: String,
    pub tipo_servico: ServiceType,
    pub direction_id: String,
}

impl ClassifiedLine {
    pub const HEADER: [&'static str; 5] =
        ["linha", "nome_linha", "route_id", "tipo_servico", "direction_id"];
}

/// The classification document: totals, per-category counts in first-seen
/// order, and every classified line.
#[derive(Debug, Serialize)]
pub struct ClassificationReport {
    pub generated_at: DateTime<Utc>,
    pub total_linhas: usize,
    pub classificacao: IndexMap<ServiceType, usize>,
    pub linhas: Vec<ClassifiedLine>,
}

impl ClassificationReport {
    pub fn from_lines(linhas: Vec<ClassifiedLine>) -> Self {
        let mut classificacao = IndexMap::new();
        for line in &linhas {
            *classificacao.entry(line.tipo_servico).or_insert(0) += 1;
        }
        Self {
            generated_at: Utc::now(),
            total_linhas: linhas.len(),
            classificacao,
            linhas,
        }
    }

    /// Category counts, largest first. Equal counts keep first-seen order.
    pub fn distribution(&self) -> Vec<(ServiceType, usize)> {
        let mut counts: Vec<(ServiceType, usize)> =
            self.classificacao.iter().map(|(t, n)| (*t, *n)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
