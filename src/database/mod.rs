//! Database module
//!
//! A concrete [`RowSource`](crate::fetch::RowSource) backed by DuckDB,
//! which attaches MySQL, PostgreSQL, SQLite, or native DuckDB files
//! through its extensions. The engine core never sees SQL; it only sees
//! rows keyed by source column name.

mod source;

pub use source::{DbKind, DbConnection, DuckDbSource, QuerySpec};
