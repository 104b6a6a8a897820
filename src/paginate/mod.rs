//! Pagination module
//!
//! The fetch-size governor and the cursor state threaded through the run.
//!
//! # Overview
//!
//! - `PaginationState` - cursor, fetched-row counter, stall tracking
//! - `FetchGovernor` - computes the per-fetch row budget from the per-file
//!   target and the overall record cap, and decides when the run must stop
//!   without issuing another fetch

mod governor;
mod types;

pub use governor::{FetchGovernor, DEFAULT_SINGLE_FILE_CHUNK};
pub use types::PaginationState;
