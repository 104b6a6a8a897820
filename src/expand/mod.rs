//! Expansion module
//!
//! Flattens structured values when JSON cells are not allowed in the output.
//!
//! # Overview
//!
//! - `VerticalExpander` - rewrites each source row into a base row plus one
//!   synthetic row per list item, packing independent list columns into the
//!   same synthetic rows
//! - `FillMode` - blank vs duplicated parent fields on synthetic rows
//! - `HorizontalExpander` - extension point for flattening object columns
//!   into additional columns; the default passes data through unchanged

mod vertical;

pub use vertical::{FillMode, VerticalExpander};

use crate::error::Result;
use crate::types::Batch;

/// Extension point for horizontal expansion (object fields to columns).
pub trait HorizontalExpander {
    /// Expand object-valued columns into additional columns
    fn expand(&self, batch: Batch) -> Result<Batch>;
}

/// Default horizontal stage: pass-through.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughHorizontal;

impl HorizontalExpander for PassthroughHorizontal {
    fn expand(&self, batch: Batch) -> Result<Batch> {
        Ok(batch)
    }
}

#[cfg(test)]
mod tests;
