//! Batch builder
//!
//! Turns raw source rows into a uniform tabular batch: columns renamed per
//! the mapping, JSON columns parsed into structured cells.

use super::source::{FetchRequest, RowSource};
use crate::error::Result;
use crate::mapping::ColumnMapping;
use crate::types::{Batch, Cell, JsonValue, Row, SourceRow};

/// Executes one bounded fetch and shapes the result.
pub struct Fetcher<'a> {
    mapping: &'a ColumnMapping,
    identifier_column: &'a str,
    eligible_states: &'a [String],
    source_columns: Vec<String>,
}

impl<'a> Fetcher<'a> {
    /// Create a fetcher over a validated mapping
    pub fn new(
        mapping: &'a ColumnMapping,
        identifier_column: &'a str,
        eligible_states: &'a [String],
    ) -> Self {
        Self {
            mapping,
            identifier_column,
            eligible_states,
            source_columns: mapping.source_columns(),
        }
    }

    /// Fetch up to `take` rows with identifiers above `previous_id`.
    ///
    /// An empty batch signals exhaustion of the data source under the
    /// current filters.
    pub fn fetch(
        &self,
        source: &mut dyn RowSource,
        previous_id: i64,
        take: u64,
    ) -> Result<Batch> {
        let request = FetchRequest {
            columns: &self.source_columns,
            identifier_column: self.identifier_column,
            previous_id,
            take,
            eligible_states: self.eligible_states,
        };

        let raw = source.fetch_rows(&request)?;
        tracing::debug!(
            previous_id,
            take,
            rows = raw.len(),
            "fetched batch from source"
        );

        let rows = raw.into_iter().map(|row| self.shape_row(&row)).collect();
        Ok(Batch::new(self.mapping.output_header(), rows))
    }

    /// Map one source row into mapping order, parsing structured columns.
    fn shape_row(&self, raw: &SourceRow) -> Row {
        let cells = self
            .mapping
            .columns()
            .iter()
            .map(|col| {
                let value = raw.get(&col.source).cloned().unwrap_or(JsonValue::Null);
                if col.structured {
                    parse_structured(&col.source, value)
                } else {
                    scalar_cell(value)
                }
            })
            .collect();
        Row::new(cells)
    }
}

fn scalar_cell(value: JsonValue) -> Cell {
    match value {
        JsonValue::Null => Cell::Null,
        // A source handing back pre-parsed containers for a scalar column
        // still round-trips through the cell model.
        JsonValue::Array(items) => Cell::List(items),
        JsonValue::Object(map) => Cell::Object(map),
        other => Cell::Scalar(other),
    }
}

/// Parse a structured column value.
///
/// The stored form is JSON text; sources that already return parsed arrays
/// or objects are accepted as-is. A malformed value is a per-field error:
/// the cell becomes blank and the row survives.
fn parse_structured(column: &str, value: JsonValue) -> Cell {
    match value {
        JsonValue::Null => Cell::Null,
        JsonValue::Array(items) => Cell::List(items),
        JsonValue::Object(map) => Cell::Object(map),
        JsonValue::String(text) => {
            if text.trim().is_empty() {
                return Cell::Null;
            }
            match serde_json::from_str::<JsonValue>(&text) {
                Ok(JsonValue::Array(items)) => Cell::List(items),
                Ok(JsonValue::Object(map)) => Cell::Object(map),
                Ok(JsonValue::Null) => Cell::Null,
                Ok(scalar) => Cell::Scalar(scalar),
                Err(e) => {
                    tracing::warn!(column, error = %e, "malformed JSON value, blanking cell");
                    Cell::Null
                }
            }
        }
        _ => {
            tracing::warn!(column, "non-text value in JSON column, blanking cell");
            Cell::Null
        }
    }
}
