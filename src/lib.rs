// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # exportkit
//!
//! Batch export of database result sets into size-bounded CSV or XLSX files.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Walk a table by monotone identifier, never by offset
//! - **Column Mapping**: Rename and reorder columns, drop audit columns
//! - **JSON Columns**: Parse serialized JSON cells, or expand lists into rows
//! - **Bounded Files**: Split output into files of at most `items_per_file` rows
//! - **DuckDB Transport**: Attach MySQL, PostgreSQL, SQLite, or DuckDB sources
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use exportkit::{load_job, DuckDbSource, ExportEngine, MappingStrategy, Result};
//!
//! fn main() -> Result<()> {
//!     // Load the job from YAML
//!     let job = load_job("jobs/members.yaml")?;
//!
//!     // Open the source and run
//!     let source = DuckDbSource::new(&job.connection, job.query_spec())?;
//!     let strategy = MappingStrategy::new(job.column_mapping()?);
//!     let mut engine = ExportEngine::new(job.export_config(), source, Box::new(strategy))?;
//!     let summary = engine.run()?;
//!
//!     println!("exported {} records", summary.total_fetched);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ExportEngine                         │
//! │  plan() → fetch() → transform() → buffer → expand → write   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────┬────────────┬────┴──────┬────────────┬────────────┐
//! │ Paginate │   Fetch    │  Expand   │   Output   │  Database  │
//! ├──────────┼────────────┼───────────┼────────────┼────────────┤
//! │ Governor │ RowSource  │ Vertical  │ CSV        │ DuckDB     │
//! │ Cursor   │ JSON parse │ Fill mode │ XLSX       │ Attach     │
//! └──────────┴────────────┴───────────┴────────────┴────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Source-to-output column mapping
pub mod mapping;

/// Export strategy trait and the default mapping strategy
pub mod strategy;

/// Row fetching and JSON column parsing
pub mod fetch;

/// Cursor state and fetch sizing
pub mod paginate;

/// Vertical expansion of list-valued cells
pub mod expand;

/// CSV and XLSX writers
pub mod output;

/// Main execution engine
pub mod engine;

/// Database row source via DuckDB
pub mod database;

/// YAML loader for export job definitions
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use database::DuckDbSource;
pub use engine::{ExportConfig, ExportEngine, ExportSummary};
pub use loader::{load_job, load_job_from_str, ExportJob};
pub use mapping::ColumnMapping;
pub use strategy::MappingStrategy;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
