//! Dataset profiling: schema inference and descriptive statistics.
//!
//! Profiling tolerates dirty data by design: unparseable numeric cells are
//! excluded from aggregates and fully missing columns report zero counts
//! instead of failing.

mod statistics;
mod type_inference;

pub use type_inference::{infer_columns, infer_type};

pub(crate) use statistics::{mean, median, population_std};

use tracing::debug;

use crate::types::{Column, ColumnStats, DatasetStats, Row};

/// Profiler over an in-memory dataset. All operations are read-only.
pub struct DataProfiler;

impl DataProfiler {
    /// Infer the column schema from the rows' own key order and values.
    pub fn infer_columns(rows: &[Row]) -> Vec<Column> {
        infer_columns(rows)
    }

    /// Dataset-level summary: shape, type mix, missing cells, duplicates.
    pub fn dataset_stats(rows: &[Row], columns: &[Column]) -> DatasetStats {
        let stats = statistics::dataset_stats(rows, columns);
        debug!(
            rows = stats.total_rows,
            missing = stats.missing_values,
            duplicates = stats.duplicate_rows,
            "dataset profiled"
        );
        stats
    }

    /// Per-column descriptive statistics, one entry per schema column.
    pub fn column_stats(rows: &[Row], columns: &[Column]) -> Vec<ColumnStats> {
        columns
            .iter()
            .map(|col| statistics::column_stats(rows, col))
            .collect()
    }
}
