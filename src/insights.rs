//! Headline quality insights derived from dataset statistics.
//!
//! A small, fixed set of cards a frontend can render directly. Pure
//! derivation from [`DatasetStats`]; no row access.

use serde::{Deserialize, Serialize};

use crate::types::DatasetStats;

/// How urgently an insight deserves attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Critical,
}

/// One headline finding about a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub severity: Severity,
}

impl Insight {
    fn new(id: &str, title: &str, snippet: String, severity: Severity) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            snippet,
            severity,
        }
    }
}

/// Derive the four headline insights for a dataset.
///
/// Quality is the share of non-missing cells; an empty dataset counts as
/// fully clean. Severity escalates to `Warn` below 95% quality or when
/// duplicates exist, and to `Critical` below 70%.
pub fn quick_insights(stats: &DatasetStats) -> Vec<Insight> {
    let cells = stats.total_rows * stats.total_columns;
    let quality = if cells == 0 {
        100.0
    } else {
        (1.0 - stats.missing_values as f64 / cells as f64) * 100.0
    };

    let quality_severity = if quality < 70.0 {
        Severity::Critical
    } else if quality < 95.0 {
        Severity::Warn
    } else {
        Severity::Info
    };

    let issues = stats.missing_values + stats.duplicate_rows;

    vec![
        Insight::new(
            "data-quality",
            "Data Quality",
            format!("{quality:.1}%"),
            quality_severity,
        ),
        Insight::new(
            "complete-rows",
            "Complete Rows",
            format!("{}", stats.total_rows - stats.duplicate_rows),
            if stats.duplicate_rows > 0 {
                Severity::Warn
            } else {
                Severity::Info
            },
        ),
        Insight::new(
            "numeric-columns",
            "Numeric Columns",
            format!("{}/{}", stats.numeric_columns, stats.total_columns),
            Severity::Info,
        ),
        Insight::new(
            "issues-found",
            "Issues Found",
            format!("{issues}"),
            if issues > 0 {
                Severity::Warn
            } else {
                Severity::Info
            },
        ),
    ]
}
