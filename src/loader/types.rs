//! Job definition types

use crate::database::{DbConnection, QuerySpec};
use crate::engine::{ExportConfig, DEFAULT_FETCHING_TIMES, DEFAULT_ITEMS_PER_FILE};
use crate::error::Result;
use crate::mapping::ColumnMapping;
use crate::types::{FileFormat, JsonMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete export job loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJob {
    /// Kind of definition (always "export-job")
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Definition version
    #[serde(default = "default_version")]
    pub version: String,

    /// Source database connection
    #[serde(default)]
    pub connection: DbConnection,

    /// What to export
    pub source: JobSource,

    /// Ordered column mapping (source name to output name)
    pub columns: Vec<ColumnEntry>,

    /// Source columns holding serialized JSON
    #[serde(default)]
    pub json_columns: Vec<String>,

    /// Source columns dropped from the written files
    #[serde(default)]
    pub skip_columns: Vec<String>,

    /// Export options
    #[serde(default)]
    pub options: JobOptions,
}

fn default_kind() -> String {
    "export-job".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Table and filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSource {
    /// Table to export from
    pub table: String,

    /// Column holding the status predicate
    #[serde(default = "default_status_column")]
    pub status_column: String,

    /// Status values eligible for export (empty = no filter)
    #[serde(default)]
    pub eligible_states: Vec<String>,

    /// Column holding the pagination identifier
    #[serde(default = "default_identifier_column")]
    pub identifier_column: String,
}

fn default_status_column() -> String {
    "status".to_string()
}

fn default_identifier_column() -> String {
    "id".to_string()
}

/// One column mapping entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnEntry {
    /// Column name in the source table
    pub source: String,
    /// Column name in the output file (defaults to the source name)
    #[serde(default)]
    pub output: Option<String>,
}

/// Export options, mirroring the engine configuration surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOptions {
    /// Output filename prefix
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Directory the files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Overall record cap (0 = unbounded)
    #[serde(default)]
    pub max_records_count: u64,

    /// Rows per output file (0 = single file)
    #[serde(default = "default_items_per_file")]
    pub items_per_file: u64,

    /// Sub-fetches per output file
    #[serde(default = "default_fetching_times")]
    pub fetching_times: u64,

    /// Output format
    #[serde(default)]
    pub file_type: FileFormat,

    /// Keep structured values as JSON cells, or row-expand them
    #[serde(default)]
    pub allow_json: JsonMode,

    /// Blank vs duplicated parent fields on expanded rows
    #[serde(default = "default_true")]
    pub is_new_row_empty: bool,
}

fn default_filename() -> String {
    "exported".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_items_per_file() -> u64 {
    DEFAULT_ITEMS_PER_FILE
}

fn default_fetching_times() -> u64 {
    DEFAULT_FETCHING_TIMES
}

fn default_true() -> bool {
    true
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            output_dir: default_output_dir(),
            max_records_count: 0,
            items_per_file: default_items_per_file(),
            fetching_times: default_fetching_times(),
            file_type: FileFormat::default(),
            allow_json: JsonMode::default(),
            is_new_row_empty: true,
        }
    }
}

impl ExportJob {
    /// Validate the definition, failing fast before any I/O.
    pub fn validate(&self) -> Result<()> {
        self.column_mapping()?;
        self.export_config().validate()
    }

    /// Build the validated column mapping
    pub fn column_mapping(&self) -> Result<ColumnMapping> {
        let pairs = self
            .columns
            .iter()
            .map(|entry| {
                (
                    entry.source.clone(),
                    entry.output.clone().unwrap_or_else(|| entry.source.clone()),
                )
            })
            .collect();
        ColumnMapping::new(pairs, &self.json_columns, &self.skip_columns)
    }

    /// Build the engine configuration
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            filename: self.options.filename.clone(),
            output_dir: self.options.output_dir.clone(),
            max_records_count: self.options.max_records_count,
            items_per_file: self.options.items_per_file,
            fetching_times: self.options.fetching_times,
            file_type: self.options.file_type,
            allow_json: self.options.allow_json,
            is_new_row_empty: self.options.is_new_row_empty,
            eligible_states: self.source.eligible_states.clone(),
            identifier_column: self.source.identifier_column.clone(),
            start_cursor: 0,
        }
    }

    /// Build the query spec for the database source
    pub fn query_spec(&self) -> QuerySpec {
        QuerySpec {
            table: self.source.table.clone(),
            status_column: self.source.status_column.clone(),
        }
    }
}
