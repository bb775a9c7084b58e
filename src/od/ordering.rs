//! Output order: line code (numeric codes first, ascending), then direction,
//! then route id.

use std::cmp::Ordering;

use super::types::OriginDestinationRow;

/// A line code as it sorts: integer codes before everything else.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LineCode {
    Numeric(Integer),
    Text(String),
}

impl LineCode {
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        match Integer::parse(code) {
            Some(n) => LineCode::Numeric(n),
            None => LineCode::Text(code.to_string()),
        }
    }
}

/// An integer of any length, kept as its decimal digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Integer {
    negative: bool,
    /// No leading zeros; zero is `"0"`.
    digits: String,
}

impl Integer {
    /// Accepts an optional sign followed by ASCII digits.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = match unsigned.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        };
        Some(Self {
            negative: negative && digits != "0",
            digits: digits.to_string(),
        })
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Composite sort key. Direction and route id compare as plain strings, so
/// `""` sorts before `"0"`.
pub fn sort_key(row: &OriginDestinationRow) -> (LineCode, &str, &str) {
    (
        LineCode::parse(&row.line_code),
        row.direction_id.as_str(),
        row.route_id.as_str(),
    )
}

pub fn compare(a: &OriginDestinationRow, b: &OriginDestinationRow) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

pub fn sort_rows(rows: &mut [OriginDestinationRow]) {
    rows.sort_by(compare);
}
