//! Fetch-size governor

/// Per-fetch row budget when no per-file target bounds the run
/// (`items_per_file` = 0 means a single file at end of run).
pub const DEFAULT_SINGLE_FILE_CHUNK: u64 = 1000;

/// Computes the row budget of each fetch step.
///
/// The budget is `ceil(items_per_file / fetching_times)`, at least 1, so
/// each output file is accumulated over roughly `fetching_times` fetches.
/// An overall record cap clamps the budget; a budget clamped to zero stops
/// the run without issuing the fetch.
#[derive(Debug, Clone)]
pub struct FetchGovernor {
    items_per_file: u64,
    fetching_times: u64,
    max_records: u64,
}

impl FetchGovernor {
    /// Create a governor. `fetching_times` must be validated ≥ 1 upstream.
    pub fn new(items_per_file: u64, fetching_times: u64, max_records: u64) -> Self {
        Self {
            items_per_file,
            fetching_times: fetching_times.max(1),
            max_records,
        }
    }

    /// Row budget for the next fetch, given the rows fetched so far.
    /// `None` means the record cap is reached and the run must stop.
    pub fn plan(&self, fetched_total: u64) -> Option<u64> {
        let base = if self.items_per_file == 0 {
            DEFAULT_SINGLE_FILE_CHUNK
        } else {
            self.items_per_file.div_ceil(self.fetching_times).max(1)
        };

        if self.max_records == 0 {
            return Some(base);
        }
        let remaining = self.max_records.saturating_sub(fetched_total);
        if remaining == 0 {
            None
        } else {
            Some(base.min(remaining))
        }
    }

    /// True when `fetched_total` just crossed a multiple of `items_per_file`
    /// (the flush boundary). Never true for a single-file run.
    pub fn crossed_file_boundary(&self, previous_total: u64, fetched_total: u64) -> bool {
        if self.items_per_file == 0 {
            return false;
        }
        fetched_total / self.items_per_file > previous_total / self.items_per_file
    }
}
