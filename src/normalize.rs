use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A loosely-typed cell as handed over by the persistence collaborator.
/// Missing columns arrive as `Empty`, not as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Converts arbitrary monetary input into a canonical amount.
///
/// Source data writes amounts as whole currency units with `.` and `,` used
/// interchangeably as thousands separators, so both are deleted outright;
/// there is no decimal-point handling. Unparsable input degrades to 0.0,
/// never to an error.
pub fn normalize_money(raw: &CellValue) -> f64 {
    match raw {
        CellValue::Number(n) => *n,
        CellValue::Empty => 0.0,
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return 0.0;
            }

            let cleaned: String = trimmed
                .chars()
                .filter(|c| *c != '.' && *c != ',')
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect();

            cleaned.parse::<f64>().unwrap_or(0.0)
        }
    }
}

// %d/%m/%y must precede %d/%m/%Y: %Y accepts a bare "24" as year 24
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%y", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];

/// Converts arbitrary date input into a calendar date.
///
/// Time-of-day is discarded. Missing, empty, or unparsable input yields
/// `None` (a record without dates is legal, not an error).
pub fn normalize_date(raw: &CellValue) -> Option<NaiveDate> {
    let text = match raw {
        CellValue::Text(s) => s.trim(),
        _ => return None,
    };

    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }

    None
}

/// Normalizes a unit identifier for grouping: trims surrounding whitespace
/// and strips the trailing ".0" artifact that numeric-looking ids pick up
/// on the spreadsheet round-trip ("101.0" -> "101").
pub fn normalize_unit_id(raw: &CellValue) -> String {
    match raw {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => {
            if n.fract() == 0.0 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if let Some(stripped) = trimmed.strip_suffix(".0") {
                if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                    return stripped.to_string();
                }
            }
            trimmed.to_string()
        }
    }
}

/// Free-text cells (names, areas): trimmed text or nothing.
pub fn normalize_text(raw: &CellValue) -> Option<String> {
    match raw {
        CellValue::Empty => None,
        CellValue::Number(n) => Some(if n.fract() == 0.0 {
            format!("{}", *n as i64)
        } else {
            format!("{}", n)
        }),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}
