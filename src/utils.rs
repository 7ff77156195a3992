//! Shared helpers: literal recognition, rounding and value fingerprints.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Cell, Column, Row};

/// ISO date pattern (`YYYY-MM-DD`), compiled once at startup.
pub(crate) static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex: YYYY-MM-DD"));

/// Whether a cell reads as a boolean: a native boolean or the literals
/// `"true"` / `"false"` (case-insensitive).
pub(crate) fn is_boolean_literal(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(_) => true,
        Cell::Str(s) => {
            let lower = s.trim().to_ascii_lowercase();
            lower == "true" || lower == "false"
        }
        _ => false,
    }
}

/// Whether a cell reads as an ISO date: a native date or text matching
/// `YYYY-MM-DD`.
pub(crate) fn is_date_literal(cell: &Cell) -> bool {
    match cell {
        Cell::Date(_) => true,
        Cell::Str(s) => ISO_DATE.is_match(s.trim()),
        _ => false,
    }
}

/// Round to 3 decimal places (correlation coefficients).
pub(crate) fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Round to 4 decimal places (normalized values).
pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Exact-representation fingerprint of a cell.
///
/// Distinguishes `Str("1")` from `Number(1.0)` and encodes floats by bit
/// pattern so duplicate detection is deterministic. Text payloads are
/// length-prefixed: an embedded separator byte cannot shift a column
/// boundary when keys are joined in [`row_key`].
pub(crate) fn cell_key(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => format!("n:{:016x}", n.to_bits()),
        Cell::Bool(b) => format!("b:{b}"),
        Cell::Date(d) => format!("d:{d}"),
        Cell::Str(s) => format!("s:{}:{s}", s.len()),
        Cell::Missing => "_".to_string(),
    }
}

/// Fingerprint of a row over the schema's column order. Absent keys encode
/// the same as explicit missing cells.
pub(crate) fn row_key(row: &Row, columns: &[Column]) -> String {
    let parts: Vec<String> = columns
        .iter()
        .map(|col| cell_key(row.cell(&col.name)))
        .collect();
    parts.join("\u{1f}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::types::ColumnType;

    #[test]
    fn test_is_boolean_literal() {
        assert!(is_boolean_literal(&Cell::Bool(false)));
        assert!(is_boolean_literal(&Cell::Str("TRUE".to_string())));
        assert!(is_boolean_literal(&Cell::Str(" false ".to_string())));
        assert!(!is_boolean_literal(&Cell::Str("yes".to_string())));
        assert!(!is_boolean_literal(&Cell::Number(1.0)));
    }

    #[test]
    fn test_is_date_literal() {
        assert!(is_date_literal(&Cell::Str("2024-01-15".to_string())));
        assert!(!is_date_literal(&Cell::Str("15/01/2024".to_string())));
        assert!(!is_date_literal(&Cell::Str("2024-1-5".to_string())));
        assert!(!is_date_literal(&Cell::Number(20240115.0)));
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(0.99951), 1.0);
        assert_eq!(round3(-1.23456), -1.235);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(1.0), 1.0);
    }

    #[test]
    fn test_cell_key_distinguishes_representations() {
        assert_ne!(
            cell_key(&Cell::Str("1".to_string())),
            cell_key(&Cell::Number(1.0))
        );
        assert_ne!(cell_key(&Cell::Str(String::new())), cell_key(&Cell::Missing));
        assert_eq!(cell_key(&Cell::Number(2.0)), cell_key(&Cell::Number(2.0)));
    }

    #[test]
    fn test_row_key_embedded_separator_cannot_collide() {
        let columns = vec![
            Column::new("c1", ColumnType::Text),
            Column::new("c2", ColumnType::Text),
        ];
        // Cell content carrying the join byte must not shift the column
        // boundary and collide with a different row.
        let r1 = row! { "c1" => "a\u{1f}s:b", "c2" => "x" };
        let r2 = row! { "c1" => "a", "c2" => "b\u{1f}s:x" };
        assert_ne!(row_key(&r1, &columns), row_key(&r2, &columns));
    }

    #[test]
    fn test_row_key_absent_matches_explicit_missing() {
        let columns = vec![
            Column::new("a", ColumnType::Number),
            Column::new("b", ColumnType::Text),
        ];
        let r1 = row! { "a" => 1 };
        let r2 = row! { "a" => 1, "b" => Cell::Missing };
        assert_eq!(row_key(&r1, &columns), row_key(&r2, &columns));
    }
}
