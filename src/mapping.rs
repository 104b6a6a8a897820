//! Column mapping table
//!
//! Declares which source columns become which output columns, which columns
//! hold serialized JSON needing parse/encode treatment, and which columns are
//! dropped from the written files. Constructed once at initialization and
//! immutable afterwards; validation fails fast with a configuration error.

use crate::error::{Error, Result};
use std::collections::HashSet;

/// One column of the mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name in the data source
    pub source: String,
    /// Column name in the output file
    pub output: String,
    /// Whether the stored value is serialized JSON (array or object)
    pub structured: bool,
    /// Whether the column is dropped at write time
    pub skip: bool,
}

/// Ordered source-to-output column mapping.
///
/// Order defines the output column order. Source names must be unique, and
/// every structured column must be one of the mapped source columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: Vec<ColumnDef>,
}

impl ColumnMapping {
    /// Build a mapping from ordered `(source, output)` pairs, the set of
    /// JSON-valued source columns, and the skip-list of source columns.
    ///
    /// Skip entries naming unmapped columns are ignored, matching the
    /// tolerant behavior callers expect from audit-column skip lists.
    pub fn new<S: Into<String>>(
        pairs: Vec<(S, S)>,
        json_columns: &[String],
        skip_columns: &[String],
    ) -> Result<Self> {
        if pairs.is_empty() {
            return Err(Error::missing_field("columns"));
        }

        let json_set: HashSet<&str> = json_columns.iter().map(String::as_str).collect();
        let skip_set: HashSet<&str> = skip_columns.iter().map(String::as_str).collect();

        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(pairs.len());
        for (source, output) in pairs {
            let source = source.into();
            let output = output.into();
            if !seen.insert(source.clone()) {
                return Err(Error::config(format!(
                    "duplicate source column '{source}' in column mapping"
                )));
            }
            columns.push(ColumnDef {
                structured: json_set.contains(source.as_str()),
                skip: skip_set.contains(source.as_str()),
                source,
                output,
            });
        }

        // Every structured column must be a mapped source column.
        for json_col in json_columns {
            if !columns.iter().any(|c| c.source == *json_col) {
                return Err(Error::config(format!(
                    "json column '{json_col}' is not a mapped source column"
                )));
            }
        }

        Ok(Self { columns })
    }

    /// All columns, in output order
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Number of mapped columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when no columns are mapped
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Source column names, in order (the query's select list)
    pub fn source_columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.source.clone()).collect()
    }

    /// Full output header, in order (skip columns included)
    pub fn output_header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.output.clone()).collect()
    }

    /// Index of a source column, if mapped
    pub fn source_index(&self, source: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.source == source)
    }

    /// Indices of structured (JSON-valued) columns, in order
    pub fn structured_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.structured)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of columns kept in the written file, in order
    pub fn kept_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.skip)
            .map(|(i, _)| i)
            .collect()
    }
}
