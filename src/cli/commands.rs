//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Batch database export tool
#[derive(Parser, Debug)]
#[command(name = "exportkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Export job definition file (YAML)
    #[arg(short, long, global = true)]
    pub job: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Base log level implied by the verbosity flag
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the export job
    Run {
        /// Directory the output files are written into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output filename prefix
        #[arg(long)]
        filename: Option<String>,

        /// Overall record cap (0 = unbounded)
        #[arg(long)]
        max_records: Option<u64>,

        /// Identifier value to resume fetching after
        #[arg(long)]
        after_id: Option<i64>,
    },

    /// Validate the job definition without connecting
    Validate,

    /// Show the resolved column mapping
    Columns,

    /// Test the database connection
    Check,
}
