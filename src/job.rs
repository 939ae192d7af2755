//! Conversion job model and state management.

use crate::config::ExportFormat;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension an argument must carry to be converted.
pub const DIAGRAM_EXTENSION: &str = ".drawio";

/// One diagram file queued for export.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub status: JobStatus,
    pub staged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Converting,
    Converted,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Converting => write!(f, "converting"),
            JobStatus::Converted => write!(f, "converted"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Appends `.<format>` to the full input path.
///
/// `diagram.drawio` becomes `diagram.drawio.png`; the original suffix is kept.
pub fn output_path_for(input: &Path, format: &ExportFormat) -> PathBuf {
    let mut raw = input.as_os_str().to_os_string();
    raw.push(".");
    raw.push(format.as_str());
    PathBuf::from(raw)
}

/// Case-sensitive suffix match on the path as given.
pub fn has_diagram_extension(path: &Path) -> bool {
    path.to_string_lossy().ends_with(DIAGRAM_EXTENSION)
}

impl ConversionJob {
    pub fn new(input_path: PathBuf, format: &ExportFormat) -> Self {
        let now = Utc::now();
        Self {
            output_path: output_path_for(&input_path, format),
            input_path,
            status: JobStatus::Pending,
            staged: false,
            created_at: now,
            updated_at: now,
            error: None,
        }
    }

    pub fn start_converting(&mut self) {
        self.status = JobStatus::Converting;
        self.updated_at = Utc::now();
    }

    pub fn mark_converted(&mut self) {
        self.status = JobStatus::Converted;
        self.updated_at = Utc::now();
        self.error = None;
    }

    pub fn mark_failed(&mut self, error: String) {
        self.status = JobStatus::Failed;
        self.updated_at = Utc::now();
        self.error = Some(error);
    }

    pub fn mark_staged(&mut self) {
        self.staged = true;
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, JobStatus::Converted | JobStatus::Failed)
    }

    pub fn duration_ms(&self) -> Option<i64> {
        if self.is_finished() {
            Some(self.updated_at.signed_duration_since(self.created_at).num_milliseconds())
        } else {
            None
        }
    }
}
