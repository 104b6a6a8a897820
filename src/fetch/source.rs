//! Row source trait and helpers

use crate::error::Result;
use crate::types::{JsonValue, SourceRow};

/// Bind parameters for one bounded fetch.
///
/// The query contract: select all `columns` for rows whose identifier
/// exceeds `previous_id` and whose status matches one of `eligible_states`
/// (no predicate when empty), ordered by identifier ascending, capped at
/// `take` rows.
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    /// Source columns to select, in mapping order
    pub columns: &'a [String],
    /// Identifier column bounding the fetch
    pub identifier_column: &'a str,
    /// Exclusive lower bound on the identifier
    pub previous_id: i64,
    /// Maximum rows to return
    pub take: u64,
    /// Status values considered eligible (empty = no filter)
    pub eligible_states: &'a [String],
}

/// A data source that can execute one bounded query per call.
///
/// Implementations own connection handling and query execution; the core
/// only sees rows keyed by source column name. Returning zero rows signals
/// exhaustion under the current filters.
pub trait RowSource {
    /// Execute one bounded query
    fn fetch_rows(&mut self, request: &FetchRequest<'_>) -> Result<Vec<SourceRow>>;
}

/// In-memory row source.
///
/// Serves a fixed set of rows, honoring the identifier bound, the status
/// filter, and the row cap of each request. Used by the engine tests and
/// handy for dry-running a job without a database.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<SourceRow>,
    status_column: Option<String>,
}

impl StaticSource {
    /// Create a source over the given rows
    pub fn new(rows: Vec<SourceRow>) -> Self {
        Self {
            rows,
            status_column: None,
        }
    }

    /// Enable status filtering against the given column
    #[must_use]
    pub fn with_status_column(mut self, column: impl Into<String>) -> Self {
        self.status_column = Some(column.into());
        self
    }

    fn identifier_of(row: &SourceRow, column: &str) -> Option<i64> {
        match row.get(column) {
            Some(JsonValue::Number(n)) => n.as_i64(),
            Some(JsonValue::String(s)) => s.parse().ok(),
            _ => None,
        }
    }

    fn status_matches(&self, row: &SourceRow, eligible: &[String]) -> bool {
        if eligible.is_empty() {
            return true;
        }
        let Some(column) = &self.status_column else {
            return true;
        };
        match row.get(column) {
            Some(JsonValue::String(s)) => eligible.iter().any(|e| e == s),
            _ => false,
        }
    }
}

impl RowSource for StaticSource {
    fn fetch_rows(&mut self, request: &FetchRequest<'_>) -> Result<Vec<SourceRow>> {
        let mut matched: Vec<&SourceRow> = self
            .rows
            .iter()
            .filter(|row| {
                Self::identifier_of(row, request.identifier_column)
                    .map_or(true, |id| id > request.previous_id)
                    && self.status_matches(row, request.eligible_states)
            })
            .collect();

        matched.sort_by_key(|row| Self::identifier_of(row, request.identifier_column));
        matched.truncate(request.take as usize);

        Ok(matched.into_iter().cloned().collect())
    }
}
