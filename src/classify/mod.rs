//! Service-type classification of bus lines from their code and name.
//!
//! Categories are tried in a fixed priority order. Within a category each
//! pattern is checked against the code first, then against the name, and the
//! first hit wins. Lines no pattern recognises fall back to a numeric range
//! on the code, and anything left over is `estruturais`, so every line gets
//! exactly one label.

pub mod category;
pub mod rules;
pub mod types;

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::feed::Table;
pub use category::ServiceType;
use rules::CategoryRules;
pub use types::{ClassificationReport, ClassifiedLine, LineRecord};

#[derive(Debug)]
pub struct Classifier {
    categories: Vec<CategoryRules>,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            categories: rules::compile()?,
        })
    }

    pub fn classify(&self, code: &str, name: &str) -> ServiceType {
        let code = code.trim();
        let name = name.trim();
        self.categories
            .iter()
            .find(|category| category.matches(code, name))
            .map(|category| category.service_type)
            .unwrap_or_else(|| fallback(code))
    }

    pub fn classify_line(&self, line: LineRecord) -> ClassifiedLine {
        let tipo_servico = self.classify(&line.linha, &line.nome_linha);
        ClassifiedLine {
            linha: line.linha,
            nome_linha: line.nome_linha,
            route_id: line.route_id,
            tipo_servico,
            direction_id: line.direction_id,
        }
    }

    pub fn classify_all<I>(&self, lines: I) -> ClassificationReport
    where
        I: IntoIterator<Item = LineRecord>,
    {
        let classified = lines
            .into_iter()
            .map(|line| self.classify_line(line))
            .collect();
        let report = ClassificationReport::from_lines(classified);

        info!(total = report.total_linhas, "Classification complete");
        for (service_type, count) in report.distribution() {
            info!(service_type = %service_type, count, "Lines per service type");
        }
        report
    }
}

/// Numeric range on the code once a leading `SC` or `S` is removed.
fn fallback(code: &str) -> ServiceType {
    let number = code
        .strip_prefix("SC")
        .or_else(|| code.strip_prefix('S'))
        .unwrap_or(code)
        .trim();

    if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
        match number.parse::<u64>() {
            Ok(n) if n < 100 => return ServiceType::TroncaisConvencionais,
            Ok(n) if n < 1000 => return ServiceType::Estruturais,
            Ok(n) if n < 10000 => return ServiceType::Alimentadoras,
            _ => {}
        }
    }

    // SC (complementary) and S (special) services land here too
    ServiceType::Estruturais
}

pub fn load_lines<R: Read>(table: Table<R>) -> Result<Vec<LineRecord>> {
    table.records::<LineRecord>()?.collect()
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_lines_from(path: &Path) -> Result<Vec<LineRecord>> {
    info!("Reading lines to classify");
    load_lines(Table::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new().unwrap()
    }

    #[test]
    fn test_numeric_patterns() {
        let c = classifier();
        assert_eq!(c.classify("42", ""), ServiceType::TroncaisMove);
        assert_eq!(c.classify("850", ""), ServiceType::TroncaisMove);
        assert_eq!(c.classify("1500", ""), ServiceType::Estruturais);
        assert_eq!(c.classify("226", ""), ServiceType::Estruturais);
        assert_eq!(c.classify("1404A", ""), ServiceType::Alimentadoras);
        assert_eq!(c.classify("404a", ""), ServiceType::Alimentadoras);
    }

    #[test]
    fn test_name_patterns() {
        let c = classifier();
        assert_eq!(c.classify("150", "Circular Savassi"), ServiceType::Circular);
        assert_eq!(
            c.classify("150", "Madrugão Circular Norte"),
            ServiceType::Circular
        );
        assert_eq!(c.classify("150", "Vila Pinho"), ServiceType::VilasFavelas);
        assert_eq!(c.classify("150", "Aglomerado da Serra"), ServiceType::VilasFavelas);
        assert_eq!(c.classify("150", "Metrô Eldorado"), ServiceType::Metro);
        assert_eq!(c.classify("150", "Bairro / centro"), ServiceType::TroncaisConvencionais);
        assert_eq!(
            c.classify("150", "Estação São Gabriel / Bairro"),
            ServiceType::TroncaisMove
        );
    }

    #[test]
    fn test_priority_order_code_beats_later_name_match() {
        let c = classifier();
        // the code pattern of an earlier category wins over a later name hit
        assert_eq!(c.classify("42", "Circular Savassi"), ServiceType::TroncaisMove);
        // an earlier category's name pattern wins over a later code hit
        assert_eq!(c.classify("1404A", "Centro"), ServiceType::TroncaisConvencionais);
    }

    #[test]
    fn test_fallback_ranges() {
        let c = classifier();
        assert_eq!(c.classify("SC05", ""), ServiceType::TroncaisConvencionais);
        assert_eq!(c.classify("S150", ""), ServiceType::Estruturais);
        assert_eq!(c.classify("150", ""), ServiceType::Estruturais);
        assert_eq!(c.classify("S1234", ""), ServiceType::Alimentadoras);
        assert_eq!(c.classify("12345", ""), ServiceType::Estruturais);
    }

    #[test]
    fn test_fallback_default() {
        let c = classifier();
        assert_eq!(c.classify("999999Z", ""), ServiceType::Estruturais);
        assert_eq!(c.classify("SC-X", ""), ServiceType::Estruturais);
        assert_eq!(c.classify("", ""), ServiceType::Estruturais);
        assert_eq!(c.classify("99999999999999999999999", ""), ServiceType::Estruturais);
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let c = classifier();
        assert_eq!(c.classify(" 42 ", ""), ServiceType::TroncaisMove);
    }

    #[test]
    fn test_every_input_gets_exactly_one_label() {
        let c = classifier();
        let codes = ["", "0", "7", "99", "100", "1000", "A", "SC", "S", "9999Z", "x1"];
        let names = ["", "Centro", "Vila ", "Metro", "qualquer"];
        for code in codes {
            for name in names {
                let label = c.classify(code, name);
                assert_eq!(ServiceType::ALL.iter().filter(|t| **t == label).count(), 1);
            }
        }
    }

    #[test]
    fn test_classify_all_counts_in_first_seen_order() {
        let c = classifier();
        let lines = vec![
            LineRecord {
                linha: "1500".to_string(),
                nome_linha: "".to_string(),
                route_id: "r1".to_string(),
                direction_id: "0".to_string(),
            },
            LineRecord {
                linha: "42".to_string(),
                nome_linha: "".to_string(),
                route_id: "r2".to_string(),
                direction_id: "1".to_string(),
            },
            LineRecord {
                linha: "43".to_string(),
                nome_linha: "".to_string(),
                route_id: "r3".to_string(),
                direction_id: "0".to_string(),
            },
        ];
        let report = c.classify_all(lines);

        assert_eq!(report.total_linhas, 3);
        let counts: Vec<(ServiceType, usize)> =
            report.classificacao.iter().map(|(t, n)| (*t, *n)).collect();
        assert_eq!(
            counts,
            vec![(ServiceType::Estruturais, 1), (ServiceType::TroncaisMove, 2)]
        );
        assert_eq!(report.distribution()[0], (ServiceType::TroncaisMove, 2));
        assert_eq!(report.linhas[1].route_id, "r2");
        assert_eq!(report.linhas[1].direction_id, "1");
    }

    #[test]
    fn test_load_lines_direction_default() {
        let with_column = "linha,nome_linha,route_id,direction_id\n42,X,r1,\n";
        let lines =
            load_lines(Table::from_reader("a.csv", with_column.as_bytes()).unwrap()).unwrap();
        assert_eq!(lines[0].direction_id, "");

        let without_column = "linha,nome_linha,route_id\n42,X,r1\n";
        let lines =
            load_lines(Table::from_reader("b.csv", without_column.as_bytes()).unwrap()).unwrap();
        assert_eq!(lines[0].direction_id, "0");
    }
}
