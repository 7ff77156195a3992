//! Core data model: cells, rows, columns and the derived result types.
//!
//! A dataset is an ordered sequence of [`Row`]s plus a [`Column`] schema.
//! Cells are an explicit tagged union so that "missing" stays distinct from
//! zero or the empty string at the type level, instead of relying on runtime
//! coercion.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{InsightError, Result};

// =============================================================================
// Cell
// =============================================================================

/// A single value within a row.
///
/// Equality is exact-representation equality: `Str("1")` and `Number(1.0)`
/// are different values even though both parse to the same number.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A calendar date.
    Date(NaiveDate),
    /// A text value. The empty string counts as missing.
    Str(String),
    /// An explicitly absent value.
    Missing,
}

impl Cell {
    /// A cell is missing when it is `Missing` or an empty string.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Extract the numeric value of this cell, if it has one.
    ///
    /// Numbers are returned directly; text cells are trimmed and parsed.
    /// Booleans and dates never contribute to numeric aggregates.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// Borrow the text content of this cell, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Str(s) => write!(f, "{s}"),
            Cell::Missing => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Str(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Str(v)
    }
}

impl From<NaiveDate> for Cell {
    fn from(v: NaiveDate) -> Self {
        Cell::Date(v)
    }
}

/// Cells serialize to their natural JSON shape: numbers, booleans, strings,
/// ISO dates as strings, and `null` for missing.
impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            Cell::Str(s) => serializer.serialize_str(s),
            Cell::Missing => serializer.serialize_unit(),
        }
    }
}

/// Cells deserialize from the same natural shapes. Strings stay strings:
/// date recognition is a type-inference concern, not a parsing concern.
impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CellVisitor;

        impl<'de> Visitor<'de> for CellVisitor {
            type Value = Cell;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number, boolean, string or null")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<Cell, E> {
                Ok(Cell::Number(v as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<Cell, E> {
                Ok(Cell::Number(v as f64))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<Cell, E> {
                Ok(Cell::Number(v))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> std::result::Result<Cell, E> {
                Ok(Cell::Bool(v))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<Cell, E> {
                Ok(Cell::Str(v.to_string()))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> std::result::Result<Cell, E> {
                Ok(Cell::Str(v))
            }

            fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Cell, E> {
                Ok(Cell::Missing)
            }

            fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Cell, E> {
                Ok(Cell::Missing)
            }

            fn visit_some<D2>(self, d: D2) -> std::result::Result<Cell, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                Cell::deserialize(d)
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

// =============================================================================
// Row
// =============================================================================

static MISSING: Cell = Cell::Missing;

/// An ordered association of column name to [`Cell`].
///
/// Insertion order is preserved because column order is significant for
/// schema inference and correlation pair ordering. Structural equality is
/// order-independent and exact-representation: a key absent from one row
/// compares equal only to an explicit `Missing` in the other, and the
/// empty string is a value distinct from `Missing`, matching duplicate
/// detection.
#[derive(Debug, Clone, Default)]
pub struct Row {
    entries: Vec<(String, Cell)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell, replacing in place if the column already exists.
    pub fn insert(&mut self, name: impl Into<String>, cell: Cell) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = cell;
        } else {
            self.entries.push((name, cell));
        }
    }

    /// Look up a cell by column name.
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Mutable lookup by column name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cell> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Look up a cell, treating an absent column as missing.
    pub fn cell(&self, name: &str) -> &Cell {
        self.get(name).unwrap_or(&MISSING)
    }

    /// Column names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of columns present in this row.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row carries no columns at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        for (name, cell) in &self.entries {
            if other.cell(name) != cell {
                return false;
            }
        }
        for (name, cell) in &other.entries {
            if self.get(name).is_none() && *cell != Cell::Missing {
                return false;
            }
        }
        true
    }
}

impl FromIterator<(String, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Cell)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, cell) in iter {
            row.insert(name, cell);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, cell) in &self.entries {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column name to cell value")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut row = Row::new();
                while let Some((name, cell)) = map.next_entry::<String, Cell>()? {
                    row.insert(name, cell);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Construct a [`Row`] from `name => value` pairs.
///
/// Values are converted through `Cell::from`, so plain literals work:
///
/// ```
/// use tabular_insight::{row, Cell};
///
/// let r = row! { "name" => "Alice", "score" => 10.5, "active" => true };
/// assert_eq!(r.cell("score"), &Cell::Number(10.5));
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut row = $crate::Row::new();
        $(row.insert($name, $crate::Cell::from($value));)+
        row
    }};
}

/// Parse a JSON array of objects into rows, preserving key order.
///
/// This is the ingestion boundary for hosts that hand over decoded file
/// contents as JSON. A non-array payload or non-object element is reported
/// as [`InsightError::MalformedRow`].
pub fn rows_from_json(json: &str) -> Result<Vec<Row>> {
    serde_json::from_str::<Vec<Row>>(json)
        .map_err(|e| InsightError::MalformedRow(e.to_string()))
}

// =============================================================================
// Column schema
// =============================================================================

/// The type classification of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    Text,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "date")]
    Date,
}

impl ColumnType {
    /// Whether values of this column participate in numeric aggregates.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnType::Number => "number",
            ColumnType::Text => "string",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        };
        f.write_str(label)
    }
}

/// A named, typed schema entry. Immutable once inferred for a dataset
/// snapshot; re-inference happens only when the dataset is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

// =============================================================================
// Derived statistics types
// =============================================================================

/// Dataset-level summary statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DatasetStats {
    pub total_rows: usize,
    pub total_columns: usize,
    pub numeric_columns: usize,
    pub text_columns: usize,
    /// Cells that are null or empty across all (row, column) pairs.
    pub missing_values: usize,
    /// Rows that are structural duplicates of an earlier row.
    pub duplicate_rows: usize,
}

/// One distinct value and how often it occurs in a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: Cell,
    pub count: usize,
}

/// Per-column descriptive statistics.
///
/// Numeric fields are present only for number-typed columns that contain
/// at least one parseable value; a fully missing column reports zero
/// counts, which is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
    /// Non-missing values.
    pub count: usize,
    pub missing: usize,
    pub unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Most frequent value, if the column has any non-missing values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Cell>,
    /// Top 10 values by frequency, ties in first-encountered order.
    pub distribution: Vec<ValueCount>,
}

/// Pearson correlation for one unordered pair of numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub col1: String,
    pub col2: String,
    /// Rounded to 3 decimal places.
    pub correlation: f64,
}

/// Outliers detected in a single numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub column: String,
    pub outliers: Vec<f64>,
    pub count: usize,
}

// =============================================================================
// Cleaning result types
// =============================================================================

/// Audit report describing what a cleaning pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CleaningReport {
    pub original_rows: usize,
    pub cleaned_rows: usize,
    /// Always `original_rows - cleaned_rows`, regardless of which stages
    /// caused the reduction.
    pub removed_rows: usize,
    pub duplicates_removed: usize,
    pub missing_values_filled: usize,
    pub outliers_removed: usize,
    /// Human-readable log, one entry per stage that made a modification,
    /// in pipeline execution order.
    pub changes: Vec<String>,
}

/// Cleaned dataset plus its audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningResult {
    pub cleaned_data: Vec<Row>,
    pub report: CleaningReport,
}

// =============================================================================
// Tests
// =============================================================================
