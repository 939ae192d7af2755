//! Sequential batch conversion over command-line arguments.

use crate::config::ExportConfig;
use crate::console::Console;
use crate::converter::DrawioConverter;
use crate::job::{has_diagram_extension, ConversionJob};
use crate::runner::CommandRunner;
use crate::summary::RunSummary;
use crate::telemetry;
use crate::vcs::{GitStager, StageOutcome};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Classification of one argument before any conversion work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Missing,
    WrongExtension,
    Diagram,
}

/// Existence is checked before the extension, so a missing `notes.txt`
/// counts as a failure rather than a skip.
pub fn classify(path: &Path) -> Candidate {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        Candidate::Missing
    } else if !has_diagram_extension(path) {
        Candidate::WrongExtension
    } else {
        Candidate::Diagram
    }
}

/// Converts files one at a time, in argument order.
///
/// Per-file problems are reported and counted; nothing here aborts the run.
pub struct BatchExporter<'a, R: CommandRunner> {
    config: &'a ExportConfig,
    converter: DrawioConverter<'a, R>,
    stager: GitStager<'a, R>,
}

impl<'a, R: CommandRunner> BatchExporter<'a, R> {
    pub fn new(runner: &'a R, config: &'a ExportConfig) -> Self {
        Self {
            config,
            converter: DrawioConverter::new(runner, config),
            stager: GitStager::new(runner),
        }
    }

    pub fn run<O: Write, E: Write>(
        &self,
        inputs: &[PathBuf],
        console: &mut Console<O, E>,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        for input in inputs {
            match classify(input) {
                Candidate::Missing => {
                    console.file_not_found(input);
                    summary.record_failed(input, "file not found");
                }
                Candidate::WrongExtension => {
                    console.not_a_diagram(input);
                    summary.record_skipped(input, "not a .drawio file");
                }
                Candidate::Diagram => {
                    let job = ConversionJob::new(input.clone(), &self.config.format);
                    self.process_job(job, &mut summary, console);
                }
            }
        }

        console.summary(&summary);
        telemetry::record_run_telemetry(&summary);
        summary
    }

    fn process_job<O: Write, E: Write>(
        &self,
        mut job: ConversionJob,
        summary: &mut RunSummary,
        console: &mut Console<O, E>,
    ) {
        console.converting(&job.input_path);
        job.start_converting();

        match self.converter.convert(&job) {
            Ok(true) => {
                job.mark_converted();
                console.converted(&job.output_path);

                match self.stager.stage(&job.output_path) {
                    StageOutcome::Staged => {
                        job.mark_staged();
                        console.staged(&job.output_path);
                    }
                    StageOutcome::NotInRepository => {
                        debug!("Not inside a git work tree, output left unstaged");
                    }
                    StageOutcome::Failed => console.stage_failed(&job.output_path),
                }

                summary.record_converted(&job);
            }
            Ok(false) => {
                job.mark_failed("exporter returned a failure status".to_string());
                console.conversion_failed(&job.input_path);
                summary.record_failed(&job.input_path, "exporter returned a failure status");
            }
            Err(e) => {
                warn!(input = %job.input_path.display(), error = %e, "Exporter could not run");
                job.mark_failed(e.to_string());
                console.conversion_failed(&job.input_path);
                summary.record_failed(&job.input_path, e.to_string());
            }
        }

        telemetry::record_job_telemetry(&job);
    }
}
