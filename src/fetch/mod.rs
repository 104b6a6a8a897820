//! Fetch module
//!
//! The data-source boundary and the batch builder.
//!
//! # Overview
//!
//! - `RowSource` - trait for anything that can execute one bounded query
//! - `FetchRequest` - the bind parameters of a single fetch step
//! - `StaticSource` - in-memory source for tests and dry runs
//! - `Fetcher` - renames columns per the mapping, parses JSON columns,
//!   and returns a uniform [`Batch`](crate::types::Batch)

mod fetcher;
mod source;

pub use fetcher::Fetcher;
pub use source::{FetchRequest, RowSource, StaticSource};

#[cfg(test)]
mod tests;
