//! Runs the cleaning stages in their fixed order and assembles the report.

use tracing::{debug, info};

use crate::config::CleaningOptions;
use crate::types::{CleaningReport, CleaningResult, Column, Row};

use super::stages::STAGES;

/// The cleaning pipeline. Stateless; [`clean`](CleaningPipeline::clean) is
/// a pure function of its inputs.
pub struct CleaningPipeline;

impl CleaningPipeline {
    /// Run every enabled stage over a copy of `rows` and return the cleaned
    /// copy with a report of what changed. The input rows are untouched.
    pub fn clean(rows: &[Row], columns: &[Column], options: &CleaningOptions) -> CleaningResult {
        let mut cleaned = rows.to_vec();
        let mut report = CleaningReport {
            original_rows: rows.len(),
            ..CleaningReport::default()
        };

        for (name, stage) in STAGES {
            stage(&mut cleaned, columns, options, &mut report);
            debug!(stage = name, rows = cleaned.len(), "stage complete");
        }

        report.cleaned_rows = cleaned.len();
        report.removed_rows = report.original_rows - report.cleaned_rows;

        info!(
            original = report.original_rows,
            cleaned = report.cleaned_rows,
            removed = report.removed_rows,
            "cleaning pass finished"
        );

        CleaningResult {
            cleaned_data: cleaned,
            report,
        }
    }
}
