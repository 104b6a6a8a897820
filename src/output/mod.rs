//! Output module
//!
//! Encodes an output buffer to one of the flat file formats.
//!
//! # Overview
//!
//! - projection of the skip-listed columns out of the buffer
//! - CSV encoding (UTF-8, always with header)
//! - XLSX encoding, with a capacity warning at the sheet row ceiling
//! - `write_file` - format dispatch, returns the written data-row count

mod writer;

pub use writer::{
    sheet_capacity_exceeded, write_csv, write_file, write_xlsx, XLSX_ROW_CEILING,
};
#[cfg(test)]
pub(crate) use writer::write_xlsx_with_ceiling;

#[cfg(test)]
mod tests;
