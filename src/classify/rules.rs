//! The ordered pattern table.
//!
//! Each pattern is tried against the line code, anchored at its start, and
//! then anywhere inside the line name. Both checks ignore case.

use regex::{Regex, RegexBuilder};

use super::category::ServiceType;
use crate::error::{OdError, Result};

const ESTACAO_MOVE: &str =
    r"^Estação\s+(Barreiro|Pampulha|Venda Nova|Vilarinho|São Gabriel|Diamante|Central|Lagoinha)";

/// Categories in priority order, each with its patterns in check order.
pub const PATTERNS: &[(ServiceType, &[&str])] = &[
    (
        ServiceType::TroncaisMove,
        &[
            ESTACAO_MOVE,
            r"^[0-9]{1,2}$",
            r"^30[0-9]$",
            r"^32[0-9]$",
            r"^33[0-9]$",
            r"^34[0-9]$",
            r"^50[0-9]$",
            r"^51[0-9]$",
            r"^52[0-9]$",
            r"^60[0-9]$",
            r"^61[0-9]$",
            r"^62[0-9]$",
            r"^63[0-9]$",
            r"^64[0-9]$",
            r"^70[0-9]$",
            r"^71[0-9]$",
            r"^72[0-9]$",
            r"^73[0-9]$",
            r"^74[0-9]$",
            r"^80[0-9]$",
            r"^81[0-9]$",
            r"^82[0-9]$",
            r"^83[0-9]$",
            r"^84[0-9]$",
            r"^85[0-9]$",
        ],
    ),
    (
        ServiceType::TroncaisConvencionais,
        &[ESTACAO_MOVE, r"Centro", r"Direta", r"Paradora"],
    ),
    (
        ServiceType::Estruturais,
        &[
            r"^[1-9][0-9]{3}$",
            r"^[2-9][0-9]{2}$",
            r"^1[5-9][0-9]{2}$",
            r"^2[0-9]{3}$",
            r"^3[0-9]{3}$",
            r"^4[0-9]{3}$",
        ],
    ),
    (
        ServiceType::Alimentadoras,
        &[
            r"^[1-9][0-9]{3}[A-Z]$",
            r"^[4-9][0-9]{2}[A-Z]$",
            r"^[1-9][0-9]{2}[A-Z]$",
        ],
    ),
    (ServiceType::Circular, &[r"Circular", r"Madrugão.*Circular"]),
    (
        ServiceType::VilasFavelas,
        &[r"Vila\s+", r"Favela", r"Conjunto\s+", r"Aglomerado"],
    ),
    (ServiceType::Metro, &[r"Metro", r"Metrô", r"Estação.*Metro"]),
];

/// One pattern compiled for both of its checks.
#[derive(Debug)]
pub struct MatchRule {
    code: Regex,
    name: Regex,
}

impl MatchRule {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            code: build(&format!("^(?:{pattern})"), pattern)?,
            name: build(pattern, pattern)?,
        })
    }

    pub fn matches_code(&self, code: &str) -> bool {
        self.code.is_match(code)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.is_match(name)
    }
}

fn build(regex: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(regex)
        .case_insensitive(true)
        .build()
        .map_err(|source| OdError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// A category with its compiled rules.
#[derive(Debug)]
pub struct CategoryRules {
    pub service_type: ServiceType,
    pub rules: Vec<MatchRule>,
}

impl CategoryRules {
    /// True when any rule matches, trying code then name for each rule in
    /// turn.
    pub fn matches(&self, code: &str, name: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.matches_code(code) || rule.matches_name(name))
    }
}

pub fn compile() -> Result<Vec<CategoryRules>> {
    PATTERNS
        .iter()
        .map(|(service_type, patterns)| {
            Ok(CategoryRules {
                service_type: *service_type,
                rules: patterns
                    .iter()
                    .map(|p| MatchRule::new(p))
                    .collect::<Result<Vec<_>>>()?,
            })
        })
        .collect()
}
