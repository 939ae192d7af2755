//! Error types for the export driver.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the export pipeline.
///
/// Per-file conversion problems never surface as `ExportError` past the batch
/// loop; they are folded into the run summary instead.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The exporter executable could not be resolved.
    #[error("exporter `{program}` not found on PATH")]
    ExporterNotFound { program: String },

    /// A subprocess could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The run report could not be written.
    #[error("failed to write report to {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
