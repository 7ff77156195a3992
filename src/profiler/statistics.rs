//! Descriptive statistics for datasets and individual columns.

use std::collections::{HashMap, HashSet};

use crate::types::{Cell, Column, ColumnStats, DatasetStats, Row, ValueCount};
use crate::utils::{cell_key, row_key};

/// How many distribution entries a column keeps, most frequent first.
const DISTRIBUTION_LIMIT: usize = 10;

/// Compute dataset-level summary statistics.
pub(crate) fn dataset_stats(rows: &[Row], columns: &[Column]) -> DatasetStats {
    let numeric_columns = columns.iter().filter(|c| c.ty.is_numeric()).count();
    let text_columns = columns
        .iter()
        .filter(|c| c.ty == crate::types::ColumnType::Text)
        .count();

    let missing_values = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .filter(|col| row.cell(&col.name).is_missing())
                .count()
        })
        .sum();

    let mut seen = HashSet::new();
    let duplicate_rows = rows
        .iter()
        .filter(|row| !seen.insert(row_key(row, columns)))
        .count();

    DatasetStats {
        total_rows: rows.len(),
        total_columns: columns.len(),
        numeric_columns,
        text_columns,
        missing_values,
        duplicate_rows,
    }
}

/// Compute descriptive statistics for a single column.
pub(crate) fn column_stats(rows: &[Row], column: &Column) -> ColumnStats {
    let values: Vec<&Cell> = rows
        .iter()
        .map(|row| row.cell(&column.name))
        .filter(|cell| !cell.is_missing())
        .collect();

    let (distribution, unique) = value_distribution(&values);
    let mode = distribution.first().map(|entry| entry.value.clone());

    let mut stats = ColumnStats {
        name: column.name.clone(),
        ty: column.ty,
        count: values.len(),
        missing: rows.len() - values.len(),
        unique,
        mean: None,
        median: None,
        std: None,
        min: None,
        max: None,
        mode,
        distribution,
    };

    if column.ty.is_numeric() {
        let numbers: Vec<f64> = values.iter().filter_map(|cell| cell.as_number()).collect();
        if !numbers.is_empty() {
            let mut sorted = numbers.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            stats.mean = Some(mean(&numbers));
            stats.median = Some(median(&sorted));
            stats.std = Some(population_std(&numbers));
            stats.min = sorted.first().copied();
            stats.max = sorted.last().copied();
        }
    }

    stats
}

/// Arithmetic mean.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a pre-sorted slice: middle value when odd, average of the two
/// middle values when even.
pub(crate) fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Population standard deviation (dividing by N, not N-1).
pub(crate) fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Frequency distribution of distinct non-missing values, sorted descending
/// by count with ties in first-encountered order, truncated to the top 10.
/// Also returns the total distinct-value count.
fn value_distribution(values: &[&Cell]) -> (Vec<ValueCount>, usize) {
    let mut order: Vec<ValueCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for cell in values {
        let key = cell_key(cell);
        match index.get(&key) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(key, order.len());
                order.push(ValueCount {
                    value: (*cell).clone(),
                    count: 1,
                });
            }
        }
    }

    let unique = order.len();
    // Stable sort keeps first-encountered order among equal counts.
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(DISTRIBUTION_LIMIT);
    (order, unique)
}
