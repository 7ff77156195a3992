//! Tabular Dataset Profiling and Cleaning Library
//!
//! An in-memory analysis core for small-to-medium tabular datasets.
//!
//! # Overview
//!
//! This library provides the analysis layer a data-preview application sits
//! on top of:
//!
//! - **Type Inference**: Classify columns as number, string, boolean or date
//!   from a sample of their values
//! - **Data Profiling**: Dataset and per-column descriptive statistics,
//!   value distributions and duplicate detection
//! - **Correlation Analysis**: Pairwise Pearson coefficients over numeric
//!   columns
//! - **Outlier Detection**: IQR-fence and z-score bounds shared between
//!   read-only reports and the cleaning pipeline
//! - **Data Cleaning**: A fixed-order, fully togglable pipeline that
//!   deduplicates, trims, fills, sweeps and normalizes rows, reporting
//!   every change it made
//!
//! All analysis functions are total over well-formed rows: dirty cells are
//! excluded from aggregates rather than failing the call. Errors are
//! reserved for invalid configuration and malformed row input.
//!
//! # Quick Start
//!
//! ```rust
//! use tabular_insight::{
//!     CleaningOptions, CleaningPipeline, DataProfiler, FillMethod, row,
//! };
//!
//! let rows = vec![
//!     row! { "name" => "  Alice ", "score" => "92" },
//!     row! { "name" => "Bob", "score" => "85" },
//!     row! { "name" => "Bob", "score" => "85" },
//! ];
//!
//! // Infer the schema, then profile
//! let columns = DataProfiler::infer_columns(&rows);
//! let stats = DataProfiler::dataset_stats(&rows, &columns);
//! assert_eq!(stats.duplicate_rows, 1);
//!
//! // Clean with explicit options
//! let options = CleaningOptions::builder()
//!     .fill_method(FillMethod::Median)
//!     .build();
//! let result = CleaningPipeline::clean(&rows, &columns, &options);
//! assert_eq!(result.report.duplicates_removed, 1);
//! assert_eq!(result.cleaned_data.len(), 2);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod insights;
pub mod pipeline;
pub mod profiler;
pub mod types;

mod utils;

// Re-exports for convenient access
pub use analysis::{OutlierBounds, OutlierDetector, correlations};
pub use config::{CleaningOptions, CleaningOptionsBuilder, FillMethod, OutlierMethod};
pub use error::{InsightError, Result};
pub use insights::{Insight, Severity, quick_insights};
pub use pipeline::CleaningPipeline;
pub use profiler::{DataProfiler, infer_columns, infer_type};
pub use types::{
    Cell, CleaningReport, CleaningResult, Column, ColumnStats, ColumnType, CorrelationPair,
    DatasetStats, OutlierReport, Row, ValueCount, rows_from_json,
};
