//! Engine types
//!
//! Export configuration, per-file statistics, and the accumulation buffer.

use crate::error::{Error, Result};
use crate::types::{Batch, FileFormat, JsonMode, Row};
use std::path::PathBuf;

/// Default number of sub-fetches per output file
pub const DEFAULT_FETCHING_TIMES: u64 = 100;

/// Default rows per output file
pub const DEFAULT_ITEMS_PER_FILE: u64 = 100_000;

/// Configuration for an export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output filename prefix
    pub filename: String,
    /// Directory the files are written into
    pub output_dir: PathBuf,
    /// Overall record cap (0 = export the entire eligible result set)
    pub max_records_count: u64,
    /// Rows per output file (0 = one file at end of run)
    pub items_per_file: u64,
    /// Sub-fetches intended per output file
    pub fetching_times: u64,
    /// Output format
    pub file_type: FileFormat,
    /// Keep structured values as JSON cells, or row-expand them
    pub allow_json: JsonMode,
    /// Blank vs duplicated parent fields on expanded rows
    pub is_new_row_empty: bool,
    /// Status values eligible for export (empty = no filter)
    pub eligible_states: Vec<String>,
    /// Source column holding the pagination identifier
    pub identifier_column: String,
    /// Starting cursor (rows with identifiers above it are exported)
    pub start_cursor: i64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "exported".to_string(),
            output_dir: PathBuf::from("."),
            max_records_count: 0,
            items_per_file: DEFAULT_ITEMS_PER_FILE,
            fetching_times: DEFAULT_FETCHING_TIMES,
            file_type: FileFormat::default(),
            allow_json: JsonMode::default(),
            is_new_row_empty: true,
            eligible_states: Vec::new(),
            identifier_column: "id".to_string(),
            start_cursor: 0,
        }
    }
}

impl ExportConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filename prefix
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the overall record cap
    #[must_use]
    pub fn with_max_records(mut self, max: u64) -> Self {
        self.max_records_count = max;
        self
    }

    /// Set the rows-per-file threshold
    #[must_use]
    pub fn with_items_per_file(mut self, items: u64) -> Self {
        self.items_per_file = items;
        self
    }

    /// Set the sub-fetch count per file
    #[must_use]
    pub fn with_fetching_times(mut self, times: u64) -> Self {
        self.fetching_times = times;
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_file_type(mut self, format: FileFormat) -> Self {
        self.file_type = format;
        self
    }

    /// Set the JSON cell mode
    #[must_use]
    pub fn with_allow_json(mut self, mode: JsonMode) -> Self {
        self.allow_json = mode;
        self
    }

    /// Set the expanded-row fill option
    #[must_use]
    pub fn with_is_new_row_empty(mut self, empty: bool) -> Self {
        self.is_new_row_empty = empty;
        self
    }

    /// Set the eligible status values
    #[must_use]
    pub fn with_eligible_states(mut self, states: Vec<String>) -> Self {
        self.eligible_states = states;
        self
    }

    /// Set the identifier column
    #[must_use]
    pub fn with_identifier_column(mut self, column: impl Into<String>) -> Self {
        self.identifier_column = column.into();
        self
    }

    /// Validate the configuration, failing fast before any I/O.
    pub fn validate(&self) -> Result<()> {
        if self.filename.is_empty() {
            return Err(Error::missing_field("filename"));
        }
        if self.fetching_times == 0 {
            return Err(Error::invalid_value("fetching_times", "must be at least 1"));
        }
        if self.identifier_column.is_empty() {
            return Err(Error::missing_field("identifier_column"));
        }
        Ok(())
    }

    /// Output filename for the file closed at `fetched_total` rows
    pub fn file_path(&self, fetched_total: u64) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}.{}",
            self.filename,
            fetched_total,
            self.file_type.extension()
        ))
    }
}

// ============================================================================
// File stats
// ============================================================================

/// Per-output-file bookkeeping, reported in the final summary only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    /// Written filename
    pub filename: String,
    /// Source rows fetched into this file
    pub fetched_rows: u64,
    /// Rows present after expansion and transforms
    pub modified_rows: u64,
}

/// End-of-run summary
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// One entry per produced file, in production order
    pub files: Vec<FileStats>,
    /// Grand total of fetched source rows
    pub total_fetched: u64,
}

impl ExportSummary {
    /// Number of files produced
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Emit one summary line per file plus the grand total.
    pub fn log(&self) {
        for file in &self.files {
            tracing::info!(
                file = %file.filename,
                fetched_rows = file.fetched_rows,
                modified_rows = file.modified_rows,
                "export file"
            );
        }
        tracing::info!(total_fetched = self.total_fetched, "export done");
    }
}

// ============================================================================
// Output buffer
// ============================================================================

/// Rows accumulated toward the current output file.
///
/// Owned exclusively by the engine between flushes; `take()` hands the
/// content to the write pipeline and resets the buffer.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    header: Vec<String>,
    rows: Vec<Row>,
    fetched_rows: u64,
}

impl OutputBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb a fetched batch, copying the header on first use.
    ///
    /// `fetched` is the source-row count of the batch before any
    /// transforms, which is what the per-file stats report.
    pub fn absorb(&mut self, batch: Batch, fetched: u64) {
        if self.header.is_empty() {
            self.header = batch.header;
        }
        self.rows.extend(batch.rows);
        self.fetched_rows += fetched;
    }

    /// True when no rows are pending
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pending row count
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Drain the buffer into a batch plus its fetched-row count.
    pub fn take(&mut self) -> (Batch, u64) {
        let fetched = self.fetched_rows;
        self.fetched_rows = 0;
        let batch = Batch::new(self.header.clone(), std::mem::take(&mut self.rows));
        (batch, fetched)
    }
}
