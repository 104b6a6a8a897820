//! Flat-file writers
//!
//! Serializes a buffer of rows to CSV or XLSX. The buffer arrives with the
//! full mapped header; the skip-listed columns are projected out here, so
//! identifier and audit columns never reach the file. Row and column order
//! are preserved exactly, so re-encoding the same buffer reproduces the
//! same bytes.

use crate::error::Result;
use crate::mapping::ColumnMapping;
use crate::types::{Batch, FileFormat};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Hard row capacity of an XLSX worksheet (header included).
pub const XLSX_ROW_CEILING: usize = 1_048_576;

/// True when `total_rows` (header plus data) meets or exceeds the XLSX
/// sheet ceiling.
pub fn sheet_capacity_exceeded(total_rows: usize) -> bool {
    total_rows >= XLSX_ROW_CEILING
}

/// Project the kept columns of a row into rendered cells.
fn render_projected(batch: &Batch, kept: &[usize]) -> (Vec<String>, Vec<Vec<String>>) {
    let header = kept.iter().map(|&i| batch.header[i].clone()).collect();
    let rows = batch
        .rows
        .iter()
        .map(|row| kept.iter().map(|&i| row.cells[i].render()).collect())
        .collect();
    (header, rows)
}

/// Write a buffer in the requested format. Returns the data-row count of
/// the written file.
pub fn write_file(
    batch: &Batch,
    mapping: &ColumnMapping,
    format: FileFormat,
    path: &Path,
) -> Result<usize> {
    match format {
        FileFormat::Csv => write_csv(batch, mapping, path),
        FileFormat::Xlsx => write_xlsx(batch, mapping, path),
    }
}

/// Write a buffer as UTF-8 CSV, header always included.
pub fn write_csv(batch: &Batch, mapping: &ColumnMapping, path: &Path) -> Result<usize> {
    let kept = mapping.kept_indices();
    let (header, rows) = render_projected(batch, &kept);

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&header)?;
    let count = rows.len();
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(count)
}

/// Write a buffer as an XLSX workbook, header always included.
///
/// A buffer at or past the sheet's row ceiling logs a critical warning;
/// the file is still written, but rows past the ceiling cannot be encoded
/// (the format rejects them outright) and are left out. Reconfiguring
/// `items_per_file` is the caller's responsibility. Returns the data-row
/// count actually written.
pub fn write_xlsx(batch: &Batch, mapping: &ColumnMapping, path: &Path) -> Result<usize> {
    write_xlsx_with_ceiling(batch, mapping, path, XLSX_ROW_CEILING)
}

pub(crate) fn write_xlsx_with_ceiling(
    batch: &Batch,
    mapping: &ColumnMapping,
    path: &Path,
    ceiling: usize,
) -> Result<usize> {
    let kept = mapping.kept_indices();
    let (header, rows) = render_projected(batch, &kept);

    let total_rows = rows.len() + 1;
    if total_rows >= ceiling {
        tracing::error!(
            rows = total_rows,
            ceiling,
            path = %path.display(),
            "buffer reaches the XLSX row ceiling; rows past it are dropped, lower items_per_file"
        );
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }
    // One sheet row is spent on the header.
    let capacity = ceiling.saturating_sub(1);
    let count = rows.len().min(capacity);
    for (r, row) in rows.into_iter().take(capacity).enumerate() {
        for (col, value) in row.into_iter().enumerate() {
            worksheet.write_string((r + 1) as u32, col as u16, &value)?;
        }
    }

    workbook.save(path)?;
    Ok(count)
}
