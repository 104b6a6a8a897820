//! Common types used throughout exportkit
//!
//! This module contains the tabular data model (cells, rows, batches)
//! and the small enums shared across modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A raw row as returned by a data source, keyed by source column name
pub type SourceRow = JsonObject;

// ============================================================================
// Cell
// ============================================================================

/// A single table cell.
///
/// Cells are a tagged union so that the expander and the writers can match
/// exhaustively instead of probing an untyped value: a scalar stays a scalar,
/// a parsed JSON array becomes `List`, a parsed JSON object becomes `Object`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Empty cell (NULL, blank, or blanked by expansion)
    Null,
    /// Plain scalar value (string, number, bool)
    Scalar(JsonValue),
    /// Parsed JSON array from a structured column
    List(Vec<JsonValue>),
    /// Parsed JSON object from a structured column
    Object(JsonObject),
}

impl Cell {
    /// Build a cell for a list item placed during vertical expansion
    pub fn from_list_item(item: JsonValue) -> Self {
        match item {
            JsonValue::Null => Cell::Null,
            JsonValue::Object(map) => Cell::Object(map),
            other => Cell::Scalar(other),
        }
    }

    /// True for cells that count as blank when packing expanded rows
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Scalar(JsonValue::Null) => true,
            Cell::Scalar(JsonValue::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    /// Interpret the cell as a row identifier, if possible
    pub fn as_identifier(&self) -> Option<i64> {
        match self {
            Cell::Scalar(JsonValue::Number(n)) => n.as_i64(),
            Cell::Scalar(JsonValue::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Render the cell to output text.
    ///
    /// Structured cells serialize back to JSON text; scalars render their
    /// natural form; blanks render as the empty string.
    pub fn render(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Scalar(JsonValue::Null) => String::new(),
            Cell::Scalar(JsonValue::String(s)) => s.clone(),
            Cell::Scalar(v) => v.to_string(),
            Cell::List(items) => JsonValue::Array(items.clone()).to_string(),
            Cell::Object(map) => JsonValue::Object(map.clone()).to_string(),
        }
    }
}

// ============================================================================
// Row / Batch
// ============================================================================

/// One output row: a cell per mapped column, in mapping order.
///
/// Rows are immutable snapshots. Transformations produce new rows rather
/// than mutating fetched data in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cells in column-mapping order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Create a row of `width` blank cells
    pub fn blank(width: usize) -> Self {
        Self {
            cells: vec![Cell::Null; width],
        }
    }

    /// Number of cells
    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

/// One fetch step's result set: a header plus zero or more data rows.
///
/// An empty batch (header only) signals exhaustion of the data source
/// under the current filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Output column names, in mapping order
    pub header: Vec<String>,
    /// Data rows
    pub rows: Vec<Row>,
}

impl Batch {
    /// Create a batch
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// Create an empty batch (header only)
    pub fn empty(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// True when the batch holds no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Identifier of the last row, read from the given column index
    pub fn last_identifier(&self, column: usize) -> Option<i64> {
        self.rows
            .last()
            .and_then(|row| row.cells.get(column))
            .and_then(Cell::as_identifier)
    }
}

// ============================================================================
// File Format
// ============================================================================

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Comma-separated values, UTF-8, always with header
    #[default]
    Csv,
    /// Excel workbook, always with header
    Xlsx,
}

impl FileFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            other => Err(Error::unknown_format(other)),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// JSON Mode
// ============================================================================

/// Whether structured values stay as single serialized cells or get
/// row-expanded by the vertical expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonMode {
    /// Keep structured values as JSON text in a single cell
    Allow,
    /// Flatten list values into additional rows
    #[default]
    Deny,
}

impl JsonMode {
    /// True when structured cells are kept as serialized text
    pub fn is_allowed(&self) -> bool {
        matches!(self, JsonMode::Allow)
    }
}

impl FromStr for JsonMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "allow" => Ok(JsonMode::Allow),
            "false" | "deny" => Ok(JsonMode::Deny),
            other => Err(Error::invalid_value(
                "allow_json",
                format!("expected true/allow or false/deny, got '{other}'"),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for JsonMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(true) => Ok(JsonMode::Allow),
            Repr::Flag(false) => Ok(JsonMode::Deny),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for JsonMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(match self {
            JsonMode::Allow => "allow",
            JsonMode::Deny => "deny",
        })
    }
}
