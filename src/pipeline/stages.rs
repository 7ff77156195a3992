//! Individual cleaning stages. Each stage checks its own option flag,
//! mutates the row set in place and records what it did in the report.

use std::collections::HashSet;

use crate::analysis::OutlierDetector;
use crate::config::{CleaningOptions, FillMethod};
use crate::profiler::{mean, median};
use crate::types::{Cell, CleaningReport, Column, ColumnType, Row};
use crate::utils::{round4, row_key};

pub(super) type StageFn = fn(&mut Vec<Row>, &[Column], &CleaningOptions, &mut CleaningReport);

/// The pipeline's stages in execution order.
pub(super) const STAGES: &[(&str, StageFn)] = &[
    ("remove_duplicates", remove_duplicates),
    ("trim_strings", trim_strings),
    ("fill_missing", fill_missing),
    ("remove_empty_rows", remove_empty_rows),
    ("remove_outliers", remove_outliers),
    ("normalize_numbers", normalize_numbers),
];

/// Drop rows that are structural duplicates of an earlier row, keeping the
/// first occurrence.
fn remove_duplicates(
    rows: &mut Vec<Row>,
    columns: &[Column],
    options: &CleaningOptions,
    report: &mut CleaningReport,
) {
    if !options.remove_duplicates {
        return;
    }

    let mut seen = HashSet::new();
    let before = rows.len();
    rows.retain(|row| seen.insert(row_key(row, columns)));

    let removed = before - rows.len();
    report.duplicates_removed = removed;
    if removed > 0 {
        report.changes.push(format!("Removed {removed} duplicate rows"));
    }
}

/// Strip leading and trailing whitespace from text cells in string-typed
/// columns. Cells in other columns keep their whitespace.
fn trim_strings(
    rows: &mut Vec<Row>,
    columns: &[Column],
    options: &CleaningOptions,
    report: &mut CleaningReport,
) {
    if !options.trim_strings {
        return;
    }

    let mut touched = 0usize;
    for row in rows.iter_mut() {
        for col in columns.iter().filter(|c| c.ty == ColumnType::Text) {
            if let Some(Cell::Str(s)) = row.get_mut(&col.name) {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                    touched += 1;
                }
            }
        }
    }

    if touched > 0 {
        report
            .changes
            .push("Trimmed whitespace from string columns".to_string());
    }
}

/// Replace missing cells per column with a value derived from the column's
/// present values. Numeric columns fill with mean, median or zero; text
/// columns fill with the mode when that method is selected. Boolean and
/// date columns are never filled, and `remove` performs no fill at all.
fn fill_missing(
    rows: &mut Vec<Row>,
    columns: &[Column],
    options: &CleaningOptions,
    report: &mut CleaningReport,
) {
    if !options.fill_missing_values || options.fill_method == FillMethod::Remove {
        return;
    }

    let mut filled = 0usize;
    for col in columns {
        let Some(fill) = fill_value(rows, col, options.fill_method) else {
            continue;
        };
        for row in rows.iter_mut() {
            if row.cell(&col.name).is_missing() {
                row.insert(&col.name, fill.clone());
                filled += 1;
            }
        }
    }

    report.missing_values_filled = filled;
    if filled > 0 {
        report.changes.push(format!(
            "Filled {filled} missing values using {} method",
            options.fill_method
        ));
    }
}

/// Fill value for one column, or `None` when the column has nothing to
/// derive it from or the method does not apply to the column's type.
fn fill_value(rows: &[Row], col: &Column, method: FillMethod) -> Option<Cell> {
    let values: Vec<&Cell> = rows
        .iter()
        .map(|row| row.cell(&col.name))
        .filter(|cell| !cell.is_missing())
        .collect();
    if values.is_empty() {
        return None;
    }

    if col.ty.is_numeric() {
        let numbers: Vec<f64> = values.iter().filter_map(|cell| cell.as_number()).collect();
        if numbers.is_empty() {
            return None;
        }
        let v = match method {
            FillMethod::Mean => mean(&numbers),
            FillMethod::Median => {
                let mut sorted = numbers.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                median(&sorted)
            }
            FillMethod::Zero => 0.0,
            _ => return None,
        };
        Some(Cell::Number(v))
    } else if col.ty == ColumnType::Text && method == FillMethod::Mode {
        Some(most_frequent(&values))
    } else {
        None
    }
}

/// Most frequent value; ties resolve to the first one encountered.
fn most_frequent(values: &[&Cell]) -> Cell {
    let mut counts: Vec<(&Cell, usize)> = Vec::new();
    for &cell in values {
        match counts.iter_mut().find(|(c, _)| *c == cell) {
            Some((_, n)) => *n += 1,
            None => counts.push((cell, 1)),
        }
    }

    let mut best = counts[0];
    for entry in &counts[1..] {
        if entry.1 > best.1 {
            best = *entry;
        }
    }
    best.0.clone()
}

/// Drop rows in which every schema column is missing.
fn remove_empty_rows(
    rows: &mut Vec<Row>,
    columns: &[Column],
    options: &CleaningOptions,
    report: &mut CleaningReport,
) {
    if !options.remove_empty_rows {
        return;
    }

    let before = rows.len();
    rows.retain(|row| columns.iter().any(|col| !row.cell(&col.name).is_missing()));

    let removed = before - rows.len();
    if removed > 0 {
        report.changes.push(format!("Removed {removed} empty rows"));
    }
}

/// Drop rows holding an out-of-bounds value in any numeric column.
///
/// Columns are processed in schema order and bounds are recomputed from the
/// rows remaining at that point, so a row removed for one column no longer
/// influences the next column's bounds. Rows whose cell does not parse as a
/// number are kept.
fn remove_outliers(
    rows: &mut Vec<Row>,
    columns: &[Column],
    options: &CleaningOptions,
    report: &mut CleaningReport,
) {
    if !options.remove_outliers {
        return;
    }

    let mut removed = 0usize;
    for col in columns.iter().filter(|c| c.ty.is_numeric()) {
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.cell(&col.name).as_number())
            .collect();
        let Some(bounds) = OutlierDetector::bounds(&values, options.outlier_method) else {
            continue;
        };

        let before = rows.len();
        rows.retain(|row| match row.cell(&col.name).as_number() {
            Some(v) => !bounds.is_outlier(v),
            None => true,
        });
        removed += before - rows.len();
    }

    report.outliers_removed = removed;
    if removed > 0 {
        report.changes.push(format!(
            "Removed {removed} outlier rows using {} method",
            options.outlier_method
        ));
    }
}

/// Min-max scale each numeric column to [0, 1], rounding to 4 decimal
/// places. Constant columns (zero range) are left untouched.
fn normalize_numbers(
    rows: &mut Vec<Row>,
    columns: &[Column],
    options: &CleaningOptions,
    report: &mut CleaningReport,
) {
    if !options.normalize_numbers {
        return;
    }

    let mut touched = false;
    for col in columns.iter().filter(|c| c.ty.is_numeric()) {
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.cell(&col.name).as_number())
            .collect();
        if values.is_empty() {
            continue;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range == 0.0 {
            continue;
        }

        for row in rows.iter_mut() {
            if let Some(v) = row.cell(&col.name).as_number() {
                row.insert(&col.name, Cell::Number(round4((v - min) / range)));
                touched = true;
            }
        }
    }

    if touched {
        report
            .changes
            .push("Normalized numeric columns to 0-1 range".to_string());
    }
}
