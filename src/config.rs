//! Configuration for the cleaning pipeline.
//!
//! [`CleaningOptions`] is read-only input to a cleaning pass; every option
//! is independently togglable and the struct deserializes from partial
//! JSON with the documented defaults filled in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InsightError;

/// Strategy for filling missing cells.
///
/// Numeric columns support `Mean`, `Median` and `Zero`; text columns use
/// `Mode`. `Remove` is accepted for compatibility but performs no fill:
/// rows left fully missing are still swept by the empty-row stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillMethod {
    #[default]
    Mean,
    Median,
    Mode,
    Zero,
    Remove,
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FillMethod::Mean => "mean",
            FillMethod::Median => "median",
            FillMethod::Mode => "mode",
            FillMethod::Zero => "zero",
            FillMethod::Remove => "remove",
        };
        f.write_str(label)
    }
}

impl FromStr for FillMethod {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(FillMethod::Mean),
            "median" => Ok(FillMethod::Median),
            "mode" => Ok(FillMethod::Mode),
            "zero" => Ok(FillMethod::Zero),
            "remove" => Ok(FillMethod::Remove),
            other => Err(InsightError::InvalidConfig(format!(
                "unknown fill method '{other}'"
            ))),
        }
    }
}

/// Method used to compute outlier bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Positional quartiles with 1.5 * IQR fences.
    #[default]
    Iqr,
    /// Population mean plus/minus 3 standard deviations.
    Zscore,
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutlierMethod::Iqr => "iqr",
            OutlierMethod::Zscore => "zscore",
        };
        f.write_str(label)
    }
}

impl FromStr for OutlierMethod {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iqr" => Ok(OutlierMethod::Iqr),
            "zscore" => Ok(OutlierMethod::Zscore),
            other => Err(InsightError::InvalidConfig(format!(
                "unknown outlier method '{other}'"
            ))),
        }
    }
}

/// Configuration for a cleaning pass.
///
/// # Example
///
/// ```
/// use tabular_insight::{CleaningOptions, FillMethod, OutlierMethod};
///
/// let options = CleaningOptions::builder()
///     .fill_method(FillMethod::Median)
///     .remove_outliers(true)
///     .outlier_method(OutlierMethod::Zscore)
///     .build();
/// assert!(options.remove_duplicates);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Drop rows that are exact structural duplicates of an earlier row.
    pub remove_duplicates: bool,
    /// Strip leading/trailing whitespace from string-typed cells.
    pub trim_strings: bool,
    /// Replace missing cells per column using `fill_method`.
    pub fill_missing_values: bool,
    pub fill_method: FillMethod,
    /// Drop rows still fully missing after the fill stage.
    pub remove_empty_rows: bool,
    /// Drop rows containing an outlier value in any numeric column.
    pub remove_outliers: bool,
    pub outlier_method: OutlierMethod,
    /// Min-max scale numeric columns to [0, 1].
    pub normalize_numbers: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            trim_strings: true,
            fill_missing_values: true,
            fill_method: FillMethod::default(),
            remove_empty_rows: true,
            remove_outliers: false,
            outlier_method: OutlierMethod::default(),
            normalize_numbers: false,
        }
    }
}

impl CleaningOptions {
    /// Create a new options builder.
    pub fn builder() -> CleaningOptionsBuilder {
        CleaningOptionsBuilder::default()
    }
}

/// Builder for [`CleaningOptions`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningOptionsBuilder {
    remove_duplicates: Option<bool>,
    trim_strings: Option<bool>,
    fill_missing_values: Option<bool>,
    fill_method: Option<FillMethod>,
    remove_empty_rows: Option<bool>,
    remove_outliers: Option<bool>,
    outlier_method: Option<OutlierMethod>,
    normalize_numbers: Option<bool>,
}

impl CleaningOptionsBuilder {
    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, on: bool) -> Self {
        self.remove_duplicates = Some(on);
        self
    }

    /// Enable or disable whitespace trimming on string columns.
    pub fn trim_strings(mut self, on: bool) -> Self {
        self.trim_strings = Some(on);
        self
    }

    /// Enable or disable missing-value filling.
    pub fn fill_missing_values(mut self, on: bool) -> Self {
        self.fill_missing_values = Some(on);
        self
    }

    /// Set the fill strategy for missing cells.
    pub fn fill_method(mut self, method: FillMethod) -> Self {
        self.fill_method = Some(method);
        self
    }

    /// Enable or disable removal of fully missing rows.
    pub fn remove_empty_rows(mut self, on: bool) -> Self {
        self.remove_empty_rows = Some(on);
        self
    }

    /// Enable or disable outlier row removal.
    pub fn remove_outliers(mut self, on: bool) -> Self {
        self.remove_outliers = Some(on);
        self
    }

    /// Set the bound computation used for outlier removal.
    pub fn outlier_method(mut self, method: OutlierMethod) -> Self {
        self.outlier_method = Some(method);
        self
    }

    /// Enable or disable min-max normalization of numeric columns.
    pub fn normalize_numbers(mut self, on: bool) -> Self {
        self.normalize_numbers = Some(on);
        self
    }

    /// Build the options, falling back to defaults for unset fields.
    pub fn build(self) -> CleaningOptions {
        let defaults = CleaningOptions::default();
        CleaningOptions {
            remove_duplicates: self.remove_duplicates.unwrap_or(defaults.remove_duplicates),
            trim_strings: self.trim_strings.unwrap_or(defaults.trim_strings),
            fill_missing_values: self
                .fill_missing_values
                .unwrap_or(defaults.fill_missing_values),
            fill_method: self.fill_method.unwrap_or(defaults.fill_method),
            remove_empty_rows: self.remove_empty_rows.unwrap_or(defaults.remove_empty_rows),
            remove_outliers: self.remove_outliers.unwrap_or(defaults.remove_outliers),
            outlier_method: self.outlier_method.unwrap_or(defaults.outlier_method),
            normalize_numbers: self.normalize_numbers.unwrap_or(defaults.normalize_numbers),
        }
    }
}
