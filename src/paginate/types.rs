//! Pagination state

use crate::error::{Error, Result};

/// Tracks cursor and counters across fetch steps.
///
/// The state is an explicit value threaded through the run loop, so a
/// single fetch step can be exercised without a full engine. The cursor is
/// monotonically non-decreasing for the whole run.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Last-seen row identifier (exclusive lower bound of the next fetch)
    pub cursor: i64,
    /// Total rows fetched so far
    pub fetched_total: u64,
    /// Consecutive fetches that failed to advance the cursor
    stalled_fetches: u32,
}

impl PaginationState {
    /// Create a state starting at cursor 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state with a configured starting cursor
    pub fn with_cursor(cursor: i64) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Add to the fetched-row total
    pub fn add_fetched(&mut self, count: u64) {
        self.fetched_total += count;
    }

    /// Advance the cursor after a non-empty batch.
    ///
    /// `last_id` is the identifier of the batch's last row, or `None` when
    /// the identifier column is missing. A missing identifier keeps the
    /// previous cursor and logs a warning; when no record cap bounds the
    /// run (`bounded` false), a second consecutive stall fails the run
    /// instead of refetching the same rows forever.
    pub fn advance(&mut self, last_id: Option<i64>, bounded: bool) -> Result<()> {
        match last_id {
            Some(id) => {
                // The query orders by identifier ascending, so ids never
                // move backwards; max() keeps the invariant regardless.
                self.cursor = self.cursor.max(id);
                self.stalled_fetches = 0;
                Ok(())
            }
            None => {
                self.stalled_fetches += 1;
                tracing::warn!(
                    cursor = self.cursor,
                    "identifier column missing from batch, cursor not advanced"
                );
                if !bounded && self.stalled_fetches >= 2 {
                    return Err(Error::CursorStalled {
                        cursor: self.cursor,
                    });
                }
                Ok(())
            }
        }
    }
}
