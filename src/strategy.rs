//! Export strategy interface
//!
//! The capability interface a caller supplies to the engine: the column
//! mapping plus two optional transform hooks. There is no silent default
//! strategy; constructing an engine requires one explicitly.

use crate::error::Result;
use crate::mapping::ColumnMapping;
use crate::types::Batch;

/// Caller-supplied export behavior.
///
/// `post_fetch_transform` runs on every fetched batch before it is
/// accumulated; `pre_write_transform` runs on every output buffer right
/// before encoding. Both default to pass-through.
pub trait ExportStrategy {
    /// The column mapping driving the export
    fn column_mapping(&self) -> &ColumnMapping;

    /// Transform a freshly fetched batch (pass-through by default)
    fn post_fetch_transform(&self, batch: Batch) -> Result<Batch> {
        Ok(batch)
    }

    /// Transform a buffer right before it is written (pass-through by default)
    fn pre_write_transform(&self, batch: Batch) -> Result<Batch> {
        Ok(batch)
    }
}

/// Minimal strategy carrying only a column mapping.
///
/// Useful when no custom transforms are needed, e.g. exports driven
/// entirely by a job definition file.
#[derive(Debug, Clone)]
pub struct MappingStrategy {
    mapping: ColumnMapping,
}

impl MappingStrategy {
    /// Create a strategy from a validated mapping
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }
}

impl ExportStrategy for MappingStrategy {
    fn column_mapping(&self) -> &ColumnMapping {
        &self.mapping
    }
}
