//! CLI module
//!
//! Command-line interface for running export jobs.
//!
//! # Commands
//!
//! - `run` - Execute the export job
//! - `validate` - Validate the job definition without connecting
//! - `columns` - Show the resolved column mapping
//! - `check` - Test the database connection

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
