//! Run counters, per-file outcomes and the JSON run report.

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::job::ConversionJob;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// What happened to one command-line argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum FileOutcome {
    Converted {
        input: PathBuf,
        output: PathBuf,
        staged: bool,
        duration_ms: Option<i64>,
    },
    Failed {
        input: PathBuf,
        reason: String,
    },
    Skipped {
        input: PathBuf,
        reason: String,
    },
}

#[cfg(test)]
impl FileOutcome {
    fn input(&self) -> &Path {
        match self {
            FileOutcome::Converted { input, .. }
            | FileOutcome::Failed { input, .. }
            | FileOutcome::Skipped { input, .. } => input,
        }
    }
}

/// Aggregate result of a batch run.
///
/// Skipped files are tracked for the report only; they never count as a
/// success or a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn record_converted(&mut self, job: &ConversionJob) {
        self.converted += 1;
        self.outcomes.push(FileOutcome::Converted {
            input: job.input_path.clone(),
            output: job.output_path.clone(),
            staged: job.staged,
            duration_ms: job.duration_ms(),
        });
    }

    pub fn record_failed(&mut self, input: &Path, reason: impl Into<String>) {
        self.failed += 1;
        self.outcomes.push(FileOutcome::Failed {
            input: input.to_path_buf(),
            reason: reason.into(),
        });
    }

    pub fn record_skipped(&mut self, input: &Path, reason: impl Into<String>) {
        self.skipped += 1;
        self.outcomes.push(FileOutcome::Skipped {
            input: input.to_path_buf(),
            reason: reason.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.has_failures() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Serialized form written by `--report`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config: &'a ExportConfig,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

impl<'a> RunReport<'a> {
    pub fn new(
        config: &'a ExportConfig,
        summary: &'a RunSummary,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            started_at,
            finished_at: Utc::now(),
            config,
            summary,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ExportError::Report {
            path: path.to_path_buf(),
            source,
        })
    }
}
