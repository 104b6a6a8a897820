//! Export job loader
//!
//! Deserializes a YAML job definition into the validated pieces the engine
//! needs: connection settings, query spec, column mapping, and export
//! configuration.

mod types;

pub use types::{ColumnEntry, ExportJob, JobOptions, JobSource};

use crate::error::{Error, Result};
use std::path::Path;

/// Load a job definition from a YAML file
pub fn load_job(path: impl AsRef<Path>) -> Result<ExportJob> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    load_job_from_str(&content)
}

/// Load a job definition from a YAML string
pub fn load_job_from_str(content: &str) -> Result<ExportJob> {
    let job: ExportJob = serde_yaml::from_str(content)?;
    job.validate()?;
    Ok(job)
}
