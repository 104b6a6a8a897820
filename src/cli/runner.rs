//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::database::DuckDbSource;
use crate::engine::ExportEngine;
use crate::error::{Error, Result};
use crate::loader::{load_job, ExportJob};
use crate::strategy::MappingStrategy;
use std::path::PathBuf;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                output_dir,
                filename,
                max_records,
                after_id,
            } => self.export(
                output_dir.clone(),
                filename.clone(),
                *max_records,
                *after_id,
            ),
            Commands::Validate => self.validate(),
            Commands::Columns => self.columns(),
            Commands::Check => self.check(),
        }
    }

    /// Load the job definition
    fn load_job(&self) -> Result<ExportJob> {
        let path = self
            .cli
            .job
            .as_ref()
            .ok_or_else(|| Error::config("Job file not specified (use -j flag)"))?;
        load_job(path)
    }

    /// Execute the export job
    fn export(
        &self,
        output_dir: Option<PathBuf>,
        filename: Option<String>,
        max_records: Option<u64>,
        after_id: Option<i64>,
    ) -> Result<()> {
        let job = self.load_job()?;

        let mut config = job.export_config();
        if let Some(dir) = output_dir {
            config.output_dir = dir;
        }
        if let Some(name) = filename {
            config.filename = name;
        }
        if let Some(cap) = max_records {
            config.max_records_count = cap;
        }
        if let Some(cursor) = after_id {
            config.start_cursor = cursor;
        }

        let source = DuckDbSource::new(&job.connection, job.query_spec())?;
        tracing::info!(
            database = %source.connection_info(),
            table = %job.source.table,
            "starting export"
        );

        let strategy = MappingStrategy::new(job.column_mapping()?);
        let mut engine = ExportEngine::new(config, source, Box::new(strategy))?;
        let summary = engine.run()?;

        println!("Exported {} records:", summary.total_fetched);
        for file in &summary.files {
            println!(
                "  {} ({} fetched, {} written)",
                file.filename, file.fetched_rows, file.modified_rows
            );
        }
        Ok(())
    }

    /// Validate the job definition without connecting
    fn validate(&self) -> Result<()> {
        let job = self.load_job()?;
        println!(
            "Job definition is valid: table '{}', {} columns",
            job.source.table,
            job.columns.len()
        );
        Ok(())
    }

    /// Print the resolved column mapping
    fn columns(&self) -> Result<()> {
        let job = self.load_job()?;
        let mapping = job.column_mapping()?;
        for column in mapping.columns() {
            let mut notes = Vec::new();
            if column.structured {
                notes.push("json");
            }
            if column.skip {
                notes.push("skipped");
            }
            if notes.is_empty() {
                println!("{} -> {}", column.source, column.output);
            } else {
                println!("{} -> {} [{}]", column.source, column.output, notes.join(", "));
            }
        }
        Ok(())
    }

    /// Test the database connection
    fn check(&self) -> Result<()> {
        let job = self.load_job()?;
        let source = DuckDbSource::new(&job.connection, job.query_spec())?;
        source.check_connection()?;
        println!("Connection OK: {}", source.connection_info());
        Ok(())
    }
}
