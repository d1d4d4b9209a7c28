use std::fmt;

/// A present cell value. Missing cells are represented as `None` in an
/// `Option<Value>` and never as a variant of this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
}

pub type Cell = Option<Value>;

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => format_number(*n),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Builds a numeric cell, folding NaN into the missing sentinel.
pub fn number_cell(value: f64) -> Cell {
    if value.is_nan() {
        None
    } else {
        Some(Value::Number(value))
    }
}

/// Parses a float literal after trimming surrounding whitespace.
///
/// Accepts the same literals as `f64::from_str`, including `inf` and `nan`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

pub fn display_cell(cell: &Cell) -> String {
    cell.as_ref().map(Value::as_display).unwrap_or_default()
}

/// Hashable stand-in for a cell when comparing rows.
///
/// Two missing cells are equal, and `-0.0` equals `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Missing,
    Text(String),
    Number(u64),
}

impl From<&Cell> for CellKey {
    fn from(cell: &Cell) -> Self {
        match cell {
            None => CellKey::Missing,
            Some(Value::Text(s)) => CellKey::Text(s.clone()),
            Some(Value::Number(n)) if n.is_nan() => CellKey::Missing,
            Some(Value::Number(n)) => {
                let normalized = if *n == 0.0 { 0.0 } else { *n };
                CellKey::Number(normalized.to_bits())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_cell_folds_nan_into_missing() {
        assert_eq!(number_cell(f64::NAN), None);
        assert_eq!(number_cell(2.5), Some(Value::Number(2.5)));
    }

    #[test]
    fn parse_number_trims_and_rejects_text() {
        assert_eq!(parse_number(" 897.2 "), Some(897.2));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("Suburban"), None);
        assert_eq!(parse_number("   "), None);
    }

    #[test]
    fn format_number_drops_fraction_for_integral_values() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn cell_key_treats_signed_zero_and_missing_consistently() {
        let pos = CellKey::from(&Some(Value::Number(0.0)));
        let neg = CellKey::from(&Some(Value::Number(-0.0)));
        assert_eq!(pos, neg);
        assert_eq!(CellKey::from(&None), CellKey::Missing);
        assert_ne!(
            CellKey::from(&Some(Value::Text("1".into()))),
            CellKey::from(&Some(Value::Number(1.0)))
        );
    }
}
