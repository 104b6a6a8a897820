//! Vertical expansion
//!
//! Flattens list-valued cells into additional rows. For every source row
//! the output is a base row carrying the scalar fields with all list cells
//! blanked, followed by synthetic rows holding the list items. Independent
//! list columns pack into the same synthetic rows, so the number of rows a
//! source row produces is one plus its longest list (just the base row when
//! every list is empty). No list item is ever dropped.

use crate::mapping::ColumnMapping;
use crate::types::{Batch, Cell, Row};

/// How the parent's scalar fields appear on synthetic rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Synthetic rows are blank except for the placed item
    #[default]
    Blank,
    /// Synthetic rows duplicate the base row's non-list fields
    Duplicate,
}

impl FillMode {
    /// Map the `is_new_row_empty` option to a fill mode
    pub fn from_is_new_row_empty(is_new_row_empty: bool) -> Self {
        if is_new_row_empty {
            FillMode::Blank
        } else {
            FillMode::Duplicate
        }
    }
}

/// Row-expands list-valued structured columns.
pub struct VerticalExpander {
    structured: Vec<usize>,
    fill: FillMode,
}

impl VerticalExpander {
    /// Create an expander for the mapping's structured columns
    pub fn new(mapping: &ColumnMapping, fill: FillMode) -> Self {
        Self {
            structured: mapping.structured_indices(),
            fill,
        }
    }

    /// Expand every row of the batch, preserving source-row order.
    pub fn expand(&self, batch: Batch) -> Batch {
        let mut rows = Vec::with_capacity(batch.rows.len());
        for row in &batch.rows {
            self.expand_row(row, &mut rows);
        }
        Batch::new(batch.header, rows)
    }

    /// Expand one source row into its group of output rows.
    fn expand_row(&self, source: &Row, out: &mut Vec<Row>) {
        // Base row: scalar fields kept, every list cell blanked.
        let mut base = source.clone();
        for &idx in &self.structured {
            if matches!(base.cells[idx], Cell::List(_)) {
                base.cells[idx] = Cell::Null;
            }
        }

        let mut group = vec![base];

        // Pack items column-wise: each item lands in the first synthetic
        // row (after the base) whose cell in this column is still blank.
        for &idx in &self.structured {
            let Cell::List(items) = &source.cells[idx] else {
                continue;
            };
            for item in items {
                let slot = group[1..]
                    .iter()
                    .position(|row| row.cells[idx].is_blank())
                    .map(|p| p + 1);
                let target = match slot {
                    Some(found) => found,
                    None => {
                        group.push(self.filler_row(&group[0]));
                        group.len() - 1
                    }
                };
                group[target].cells[idx] = Cell::from_list_item(item.clone());
            }
        }

        out.append(&mut group);
    }

    fn filler_row(&self, base: &Row) -> Row {
        match self.fill {
            FillMode::Blank => Row::blank(base.width()),
            // base already has its list cells blanked
            FillMode::Duplicate => base.clone(),
        }
    }
}
