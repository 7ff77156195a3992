//! Column type inference from sampled values.

use crate::types::{Cell, Column, ColumnType, Row};
use crate::utils::{is_boolean_literal, is_date_literal};

/// Inference reads at most this many non-missing values per column.
const TYPE_SAMPLE_SIZE: usize = 100;

/// Classify a column's values as number, boolean, date or string.
///
/// The sample is the first [`TYPE_SAMPLE_SIZE`] non-missing values. A value
/// counts as numeric when it parses as a number, as boolean when it is a
/// native boolean or a `true`/`false` literal, and as a date when it is a
/// native date or matches `YYYY-MM-DD`. Thresholds: >80% numeric wins,
/// then >80% boolean, then >60% date; everything else is string.
///
/// Total over any input: an empty sample classifies as string.
pub fn infer_type<'a>(values: impl IntoIterator<Item = &'a Cell>) -> ColumnType {
    let sample: Vec<&Cell> = values
        .into_iter()
        .filter(|cell| !is_blank(cell))
        .take(TYPE_SAMPLE_SIZE)
        .collect();

    if sample.is_empty() {
        return ColumnType::Text;
    }
    let total = sample.len() as f64;

    let numeric = sample.iter().filter(|c| c.as_number().is_some()).count();
    if numeric as f64 / total > 0.8 {
        return ColumnType::Number;
    }

    let boolean = sample.iter().filter(|c| is_boolean_literal(c)).count();
    if boolean as f64 / total > 0.8 {
        return ColumnType::Boolean;
    }

    let date = sample.iter().filter(|c| is_date_literal(c)).count();
    if date as f64 / total > 0.6 {
        return ColumnType::Date;
    }

    ColumnType::Text
}

/// Infer the full schema from a row set.
///
/// Column names and order come from the first row; each column's type is
/// inferred over that column's values across all rows (capped internally
/// by the sampling rule). An empty row set yields an empty schema.
pub fn infer_columns(rows: &[Row]) -> Vec<Column> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    first
        .names()
        .map(|name| {
            let ty = infer_type(rows.iter().map(|row| row.cell(name)));
            Column::new(name, ty)
        })
        .collect()
}

/// Inference skips missing cells and whitespace-only text.
fn is_blank(cell: &Cell) -> bool {
    match cell {
        Cell::Missing => true,
        Cell::Str(s) => s.trim().is_empty(),
        _ => false,
    }
}
