//! Execution engine module
//!
//! The end-to-end run loop: pagination, accumulation, expansion, writing.
//!
//! # Overview
//!
//! - `ExportEngine` - wires fetcher, governor, expander, and writers
//! - `ExportConfig` - configuration for one export run
//! - `ExportSummary` / `FileStats` - per-file and run totals
//!
//! The engine has a two-phase lifecycle: `new()` validates configuration
//! and mapping (failing fast before any I/O), `run()` executes the loop.
//! Control flow is single-threaded and synchronous; a cooperative
//! cancellation flag is checked once per pagination step and the pending
//! buffer is still flushed on early stop.

mod types;

pub use types::{
    ExportConfig, ExportSummary, FileStats, OutputBuffer, DEFAULT_FETCHING_TIMES,
    DEFAULT_ITEMS_PER_FILE,
};

use crate::error::Result;
use crate::expand::{FillMode, VerticalExpander};
use crate::fetch::{Fetcher, RowSource};
use crate::output;
use crate::paginate::{FetchGovernor, PaginationState};
use crate::strategy::ExportStrategy;
use crate::types::Batch;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates one export run.
pub struct ExportEngine<S: RowSource> {
    source: S,
    strategy: Box<dyn ExportStrategy>,
    config: ExportConfig,
    cancel: Arc<AtomicBool>,
}

impl<S: RowSource> ExportEngine<S> {
    /// Create an engine, validating configuration before any I/O.
    pub fn new(
        config: ExportConfig,
        source: S,
        strategy: Box<dyn ExportStrategy>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            strategy,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Cancellation flag for cooperative early termination.
    ///
    /// Setting it stops the run at the next pagination step; the pending
    /// buffer is flushed before the run ends cleanly.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Execute the export and return the per-file summary.
    pub fn run(&mut self) -> Result<ExportSummary> {
        let start = Instant::now();
        let mapping = self.strategy.column_mapping().clone();
        let identifier_index = mapping.source_index(&self.config.identifier_column);
        if identifier_index.is_none() {
            tracing::warn!(
                column = %self.config.identifier_column,
                "identifier column not in mapping; cursor will not advance"
            );
        }

        let fetcher = Fetcher::new(
            &mapping,
            &self.config.identifier_column,
            &self.config.eligible_states,
        );
        let governor = FetchGovernor::new(
            self.config.items_per_file,
            self.config.fetching_times,
            self.config.max_records_count,
        );
        let bounded = self.config.max_records_count > 0;
        let expander = VerticalExpander::new(
            &mapping,
            FillMode::from_is_new_row_empty(self.config.is_new_row_empty),
        );

        let mut state = PaginationState::with_cursor(self.config.start_cursor);
        let mut buffer = OutputBuffer::new();
        let mut summary = ExportSummary::default();

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                tracing::info!("stop requested, ending export early");
                break;
            }

            let Some(take) = governor.plan(state.fetched_total) else {
                tracing::debug!(
                    fetched = state.fetched_total,
                    "record cap reached, stopping"
                );
                break;
            };

            let batch = fetcher.fetch(&mut self.source, state.cursor, take)?;
            if batch.is_empty() {
                break;
            }

            let fetched = batch.len() as u64;
            let last_id = identifier_index.and_then(|i| batch.last_identifier(i));
            let batch = self.strategy.post_fetch_transform(batch)?;

            let previous_total = state.fetched_total;
            buffer.absorb(batch, fetched);
            state.add_fetched(fetched);
            state.advance(last_id, bounded)?;

            if governor.crossed_file_boundary(previous_total, state.fetched_total) {
                self.flush(&mut buffer, &mapping, &expander, state.fetched_total, &mut summary)?;
            }
        }

        // Final, possibly short, file.
        if !buffer.is_empty() {
            self.flush(&mut buffer, &mapping, &expander, state.fetched_total, &mut summary)?;
        }

        summary.total_fetched = state.fetched_total;
        summary.log();
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "run finished");
        Ok(summary)
    }

    /// Expand, transform, and write the pending buffer as one file.
    fn flush(
        &self,
        buffer: &mut OutputBuffer,
        mapping: &crate::mapping::ColumnMapping,
        expander: &VerticalExpander,
        fetched_total: u64,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let (batch, fetched_rows) = buffer.take();

        let batch: Batch = if self.config.allow_json.is_allowed() {
            batch
        } else {
            expander.expand(batch)
        };
        let batch = self.strategy.pre_write_transform(batch)?;

        let path = self.config.file_path(fetched_total);
        let modified_rows =
            output::write_file(&batch, mapping, self.config.file_type, &path)? as u64;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::info!(file = %filename, fetched_rows, modified_rows, "wrote export file");

        summary.files.push(FileStats {
            filename,
            fetched_rows,
            modified_rows,
        });
        Ok(())
    }
}
