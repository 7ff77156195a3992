//! Outlier detection on numeric columns.
//!
//! Two bound methods are supported: positional quartiles with 1.5 * IQR
//! fences, and population mean plus/minus three standard deviations. The
//! same bounds feed both the read-only reports here and the removal stage
//! of the cleaning pipeline, so the two always agree on what an outlier is.

use tracing::debug;

use crate::config::OutlierMethod;
use crate::profiler::{mean, population_std};
use crate::types::{Column, OutlierReport, Row};

/// Columns with fewer than this many numeric values are never scored.
const MIN_VALUES: usize = 4;

/// Inclusive range of acceptable values; anything strictly outside is an
/// outlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Whether a value falls strictly outside the bounds.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Read-only outlier detector over an in-memory dataset.
pub struct OutlierDetector;

impl OutlierDetector {
    /// Acceptable-value bounds for a column's numeric values, or `None`
    /// when there are too few values to score.
    pub fn bounds(values: &[f64], method: OutlierMethod) -> Option<OutlierBounds> {
        if values.len() < MIN_VALUES {
            return None;
        }

        let bounds = match method {
            OutlierMethod::Iqr => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

                let q1 = sorted[(sorted.len() as f64 * 0.25).floor() as usize];
                let q3 = sorted[(sorted.len() as f64 * 0.75).floor() as usize];
                let iqr = q3 - q1;
                OutlierBounds {
                    lower: q1 - 1.5 * iqr,
                    upper: q3 + 1.5 * iqr,
                }
            }
            OutlierMethod::Zscore => {
                let m = mean(values);
                let spread = 3.0 * population_std(values);
                OutlierBounds {
                    lower: m - spread,
                    upper: m + spread,
                }
            }
        };
        Some(bounds)
    }

    /// One report per numeric column that has at least one outlier.
    ///
    /// Reports follow schema column order; each lists the offending values
    /// in ascending order. Columns with fewer than four numeric values are
    /// skipped entirely.
    pub fn detect(rows: &[Row], columns: &[Column], method: OutlierMethod) -> Vec<OutlierReport> {
        let mut reports = Vec::new();

        for col in columns.iter().filter(|c| c.ty.is_numeric()) {
            let mut values: Vec<f64> = rows
                .iter()
                .filter_map(|row| row.cell(&col.name).as_number())
                .collect();

            let Some(bounds) = Self::bounds(&values, method) else {
                continue;
            };

            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let outliers: Vec<f64> = values
                .iter()
                .copied()
                .filter(|v| bounds.is_outlier(*v))
                .collect();

            if !outliers.is_empty() {
                debug!(
                    column = %col.name,
                    count = outliers.len(),
                    %method,
                    "outliers detected"
                );
                reports.push(OutlierReport {
                    count: outliers.len(),
                    column: col.name.clone(),
                    outliers,
                });
            }
        }

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::types::ColumnType;
    use pretty_assertions::assert_eq;

    // ==================== bounds tests ====================

    #[test]
    fn test_bounds_require_four_values() {
        assert!(OutlierDetector::bounds(&[1.0, 2.0, 3.0], OutlierMethod::Iqr).is_none());
        assert!(OutlierDetector::bounds(&[1.0, 2.0, 3.0, 4.0], OutlierMethod::Iqr).is_some());
    }

    #[test]
    fn test_iqr_bounds_use_positional_quartiles() {
        // n=8: q1 = sorted[2] = 3, q3 = sorted[6] = 7, iqr = 4
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bounds = OutlierDetector::bounds(&values, OutlierMethod::Iqr).unwrap();
        assert_eq!(bounds.lower, -3.0);
        assert_eq!(bounds.upper, 13.0);
    }

    #[test]
    fn test_zscore_bounds_use_population_std() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // mean = 5, population std = 2
        let bounds = OutlierDetector::bounds(&values, OutlierMethod::Zscore).unwrap();
        assert!((bounds.lower - -1.0).abs() < 1e-12);
        assert!((bounds.upper - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bounds = OutlierDetector::bounds(&values, OutlierMethod::Iqr).unwrap();
        assert!(!bounds.is_outlier(bounds.lower));
        assert!(!bounds.is_outlier(bounds.upper));
        assert!(bounds.is_outlier(bounds.upper + 0.001));
    }

    // ==================== detect tests ====================

    fn score_rows(values: &[f64]) -> Vec<Row> {
        values.iter().map(|v| row! { "score" => *v }).collect()
    }

    #[test]
    fn test_detect_flags_extreme_value() {
        let rows = score_rows(&[10.0, 11.0, 12.0, 11.5, 10.5, 100.0]);
        let columns = vec![Column::new("score", ColumnType::Number)];
        let reports = OutlierDetector::detect(&rows, &columns, OutlierMethod::Iqr);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].column, "score");
        assert_eq!(reports[0].outliers, vec![100.0]);
        assert_eq!(reports[0].count, 1);
    }

    #[test]
    fn test_detect_reports_outliers_ascending() {
        // Row order puts the high outlier first; the report sorts values
        let rows = score_rows(&[200.0, 10.0, 11.0, 12.0, 11.5, 10.5, -100.0]);
        let columns = vec![Column::new("score", ColumnType::Number)];
        let reports = OutlierDetector::detect(&rows, &columns, OutlierMethod::Iqr);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outliers, vec![-100.0, 200.0]);
        assert_eq!(reports[0].count, 2);
    }

    #[test]
    fn test_detect_clean_column_yields_no_report() {
        let rows = score_rows(&[10.0, 11.0, 12.0, 11.5, 10.5]);
        let columns = vec![Column::new("score", ColumnType::Number)];
        assert!(OutlierDetector::detect(&rows, &columns, OutlierMethod::Iqr).is_empty());
    }

    #[test]
    fn test_detect_skips_small_columns() {
        // An obvious outlier, but only three values
        let rows = score_rows(&[1.0, 2.0, 1000.0]);
        let columns = vec![Column::new("score", ColumnType::Number)];
        assert!(OutlierDetector::detect(&rows, &columns, OutlierMethod::Iqr).is_empty());
    }

    #[test]
    fn test_detect_skips_non_numeric_columns() {
        let rows = vec![
            row! { "label" => "a" },
            row! { "label" => "b" },
            row! { "label" => "c" },
            row! { "label" => "zzzz" },
        ];
        let columns = vec![Column::new("label", ColumnType::Text)];
        assert!(OutlierDetector::detect(&rows, &columns, OutlierMethod::Iqr).is_empty());
    }

    #[test]
    fn test_detect_reports_follow_column_order() {
        let rows = vec![
            row! { "a" => 1.0, "b" => 5.0 },
            row! { "a" => 2.0, "b" => 5.1 },
            row! { "a" => 1.5, "b" => 4.9 },
            row! { "a" => 1.8, "b" => 5.0 },
            row! { "a" => 50.0, "b" => 90.0 },
        ];
        let columns = vec![
            Column::new("a", ColumnType::Number),
            Column::new("b", ColumnType::Number),
        ];
        let reports = OutlierDetector::detect(&rows, &columns, OutlierMethod::Iqr);
        let names: Vec<&str> = reports.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_detect_zscore_wider_than_iqr_here() {
        let rows = score_rows(&[10.0, 11.0, 12.0, 11.5, 10.5, 16.0]);
        let iqr = OutlierDetector::detect(&rows, &score_columns(), OutlierMethod::Iqr);
        let zscore = OutlierDetector::detect(&rows, &score_columns(), OutlierMethod::Zscore);
        // 16.0 breaches the IQR fences but stays inside three standard
        // deviations of this sample
        assert_eq!(iqr.len(), 1);
        assert!(zscore.is_empty());
    }

    fn score_columns() -> Vec<Column> {
        vec![Column::new("score", ColumnType::Number)]
    }
}
