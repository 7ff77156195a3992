//! Integration tests for the cleaning pipeline.
//!
//! These tests verify end-to-end cleaning behavior and the report contract
//! over small inline datasets.

use pretty_assertions::assert_eq;
use tabular_insight::{
    Cell, CleaningOptions, CleaningPipeline, Column, ColumnType, DataProfiler, FillMethod,
    OutlierMethod, Row, row,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn ab_schema() -> Vec<Column> {
    vec![
        Column::new("a", ColumnType::Text),
        Column::new("b", ColumnType::Number),
    ]
}

fn numeric_rows(name: &str, values: &[f64]) -> (Vec<Row>, Vec<Column>) {
    let rows = values.iter().map(|v| row! { name => *v }).collect();
    let columns = vec![Column::new(name, ColumnType::Number)];
    (rows, columns)
}

// ============================================================================
// Duplicate Removal
// ============================================================================

#[test]
fn test_duplicate_removal_end_to_end() {
    let rows = vec![
        row! { "a" => "x", "b" => 1 },
        row! { "a" => "x", "b" => 1 },
        row! { "a" => "y", "b" => 2 },
    ];
    let options = CleaningOptions::builder().remove_duplicates(true).build();
    let result = CleaningPipeline::clean(&rows, &ab_schema(), &options);

    assert_eq!(result.cleaned_data.len(), 2);
    assert_eq!(result.report.duplicates_removed, 1);
    assert!(
        result
            .report
            .changes
            .iter()
            .any(|c| c.contains("1 duplicate")),
        "changes should mention the duplicate: {:?}",
        result.report.changes
    );
}

#[test]
fn test_duplicate_removal_keeps_rows_with_control_bytes() {
    // Cell text containing the fingerprint join byte must not make two
    // different rows collide.
    let rows = vec![
        row! { "c1" => "a\u{1f}s:b", "c2" => "x" },
        row! { "c1" => "a", "c2" => "b\u{1f}s:x" },
    ];
    let columns = vec![
        Column::new("c1", ColumnType::Text),
        Column::new("c2", ColumnType::Text),
    ];
    let options = CleaningOptions::builder()
        .trim_strings(false)
        .fill_missing_values(false)
        .remove_empty_rows(false)
        .build();
    let result = CleaningPipeline::clean(&rows, &columns, &options);

    assert_eq!(result.cleaned_data.len(), 2);
    assert_eq!(result.report.duplicates_removed, 0);
}

// ============================================================================
// Missing Value Filling
// ============================================================================

#[test]
fn test_fill_zero_end_to_end() {
    let rows = vec![
        row! { "c" => Cell::Missing },
        row! { "c" => Cell::Missing },
        row! { "c" => "5" },
    ];
    let columns = vec![Column::new("c", ColumnType::Number)];
    let options = CleaningOptions::builder()
        .fill_missing_values(true)
        .fill_method(FillMethod::Zero)
        .build();
    let result = CleaningPipeline::clean(&rows, &columns, &options);

    assert_eq!(result.report.missing_values_filled, 2);
    assert_eq!(result.cleaned_data[0].cell("c"), &Cell::Number(0.0));
    assert_eq!(result.cleaned_data[1].cell("c"), &Cell::Number(0.0));
    // The present cell keeps its original representation
    assert_eq!(result.cleaned_data[2].cell("c"), &Cell::from("5"));
}

#[test]
fn test_fill_remove_method_leaves_missing_cells() {
    let rows = vec![row! { "a" => "x", "b" => Cell::Missing }, row! { "a" => "y", "b" => 2 }];
    let options = CleaningOptions::builder()
        .fill_method(FillMethod::Remove)
        .build();
    let result = CleaningPipeline::clean(&rows, &ab_schema(), &options);

    // No fill happens, and the row is not empty so it survives the sweep
    assert_eq!(result.cleaned_data.len(), 2);
    assert!(result.cleaned_data[0].cell("b").is_missing());
    assert_eq!(result.report.missing_values_filled, 0);
}

// ============================================================================
// Empty Dataset
// ============================================================================

#[test]
fn test_empty_dataset_cleans_without_error() {
    let columns = ab_schema();
    let result = CleaningPipeline::clean(&[], &columns, &CleaningOptions::default());

    assert!(result.cleaned_data.is_empty());
    assert_eq!(result.report.original_rows, 0);
    assert_eq!(result.report.cleaned_rows, 0);
    assert_eq!(result.report.removed_rows, 0);
    assert_eq!(result.report.duplicates_removed, 0);
    assert_eq!(result.report.missing_values_filled, 0);
    assert_eq!(result.report.outliers_removed, 0);
    assert!(result.report.changes.is_empty());
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_normalization_bounds_and_zero_range() {
    let rows = vec![
        row! { "v" => 3.0, "k" => 7.0 },
        row! { "v" => 9.0, "k" => 7.0 },
        row! { "v" => 6.0, "k" => 7.0 },
    ];
    let columns = vec![
        Column::new("v", ColumnType::Number),
        Column::new("k", ColumnType::Number),
    ];
    let options = CleaningOptions::builder().normalize_numbers(true).build();
    let result = CleaningPipeline::clean(&rows, &columns, &options);

    for row in &result.cleaned_data {
        let v = row.cell("v").as_number().unwrap();
        assert!((0.0..=1.0).contains(&v), "normalized value out of range: {v}");
        // Zero-range column stays untouched
        assert_eq!(row.cell("k"), &Cell::Number(7.0));
    }
}

// ============================================================================
// Outlier Removal
// ============================================================================

#[test]
fn test_outlier_removal_end_to_end() {
    let (rows, columns) = numeric_rows("b", &[1.0, 2.0, 3.0, 4.0, 100.0]);
    let options = CleaningOptions::builder()
        .remove_outliers(true)
        .outlier_method(OutlierMethod::Iqr)
        .build();
    let result = CleaningPipeline::clean(&rows, &columns, &options);

    assert_eq!(result.cleaned_data.len(), 4);
    assert_eq!(result.report.outliers_removed, 1);
    assert!(
        result
            .report
            .changes
            .iter()
            .any(|c| c.contains("outlier rows using iqr")),
        "changes: {:?}",
        result.report.changes
    );
}

// ============================================================================
// Pipeline Properties
// ============================================================================

#[test]
fn test_cleaning_is_idempotent() {
    let rows = vec![
        row! { "a" => "  x ", "b" => 1 },
        row! { "a" => "  x ", "b" => 1 },
        row! { "a" => "y", "b" => Cell::Missing },
        row! { "a" => "z", "b" => 4 },
    ];
    let columns = ab_schema();
    let options = CleaningOptions::builder()
        .fill_method(FillMethod::Median)
        .remove_outliers(true)
        .build();

    let first = CleaningPipeline::clean(&rows, &columns, &options);
    let second = CleaningPipeline::clean(&first.cleaned_data, &columns, &options);

    assert_eq!(second.cleaned_data, first.cleaned_data);
    assert_eq!(second.report.removed_rows, 0);
    assert_eq!(second.report.missing_values_filled, 0);
}

#[test]
fn test_row_conservation() {
    let rows = vec![
        row! { "a" => "x", "b" => 1 },
        row! { "a" => "x", "b" => 1 },
        row! { "a" => Cell::Missing, "b" => Cell::Missing },
        row! { "a" => "y", "b" => 2 },
        row! { "a" => "z", "b" => 500 },
    ];
    let options = CleaningOptions::builder()
        .remove_outliers(true)
        .fill_missing_values(false)
        .build();
    let result = CleaningPipeline::clean(&rows, &ab_schema(), &options);
    let report = &result.report;

    assert_eq!(report.original_rows, rows.len());
    assert_eq!(report.cleaned_rows, result.cleaned_data.len());
    assert_eq!(
        report.original_rows,
        report.cleaned_rows + report.removed_rows
    );
}

#[test]
fn test_stage_order_dedup_before_trim() {
    // The rows differ only by padding, so they are not structural
    // duplicates when dedup runs, and both survive trimmed.
    let rows = vec![row! { "a" => "x", "b" => 1 }, row! { "a" => " x ", "b" => 1 }];
    let result = CleaningPipeline::clean(&rows, &ab_schema(), &CleaningOptions::default());

    assert_eq!(result.report.duplicates_removed, 0);
    assert_eq!(result.cleaned_data.len(), 2);
    assert_eq!(result.cleaned_data[0].cell("a"), &Cell::from("x"));
    assert_eq!(result.cleaned_data[1].cell("a"), &Cell::from("x"));
}

// ============================================================================
// Profiling After Cleaning
// ============================================================================

#[test]
fn test_cleaned_data_reprofiles_clean() {
    let rows = vec![
        row! { "a" => "x", "b" => 1 },
        row! { "a" => "x", "b" => 1 },
        row! { "a" => "y", "b" => 2 },
        row! { "a" => "z", "b" => 3 },
    ];
    let columns = ab_schema();
    let result = CleaningPipeline::clean(&rows, &columns, &CleaningOptions::default());

    let stats = DataProfiler::dataset_stats(&result.cleaned_data, &columns);
    assert_eq!(stats.duplicate_rows, 0);
    assert_eq!(stats.missing_values, 0);
    assert_eq!(stats.total_rows, 3);
}
