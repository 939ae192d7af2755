//! Top-level run: precondition checks, batch conversion and exit status.

use crate::batch::BatchExporter;
use crate::config::ExportConfig;
use crate::console::Console;
use crate::converter::DrawioConverter;
use crate::runner::CommandRunner;
use crate::summary::{RunReport, RunSummary};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Terminal state of a run.
#[derive(Debug)]
pub enum RunOutcome {
    /// No files were given.
    Usage,
    /// The exporter could not be resolved; nothing was processed.
    MissingExporter,
    /// Every argument was processed.
    Completed(RunSummary),
    /// Files were processed but the report could not be written.
    ReportFailed(RunSummary),
}

impl RunOutcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RunOutcome::Completed(summary) => summary.exit_code(),
            RunOutcome::Usage | RunOutcome::MissingExporter | RunOutcome::ReportFailed(_) => {
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
impl RunOutcome {
    fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed(summary) if !summary.has_failures())
    }
}

/// Request for one run of the driver.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub files: &'a [PathBuf],
    pub report: Option<&'a Path>,
    pub usage: &'a str,
}

pub fn run<R, O, E>(
    request: &RunRequest<'_>,
    config: &ExportConfig,
    runner: &R,
    console: &mut Console<O, E>,
) -> RunOutcome
where
    R: CommandRunner,
    O: Write,
    E: Write,
{
    if request.files.is_empty() {
        console.usage(request.usage);
        return RunOutcome::Usage;
    }

    // Any failure to locate the exporter stops the run before a file is touched
    if let Err(e) = DrawioConverter::new(runner, config).ensure_available() {
        debug!(error = %e, "Exporter unavailable");
        console.exporter_missing(&config.exporter);
        return RunOutcome::MissingExporter;
    }

    info!(
        files = request.files.len(),
        format = %config.format,
        scale = %config.scale,
        transparent = config.transparent,
        "Starting export run"
    );

    let started_at = Utc::now();
    let summary = BatchExporter::new(runner, config).run(request.files, console);

    if let Some(path) = request.report {
        if let Err(e) = RunReport::new(config, &summary, started_at).write_to(path) {
            console.error(e);
            return RunOutcome::ReportFailed(summary);
        }
    }

    RunOutcome::Completed(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{CapturedOutput, CommandOutcome, MockCommandRunner};
    use std::fs;
    use tempfile::tempdir;

    fn run_with(
        runner: &MockCommandRunner,
        files: &[PathBuf],
        report: Option<&Path>,
    ) -> (RunOutcome, String, String) {
        colored::control::set_override(false);
        let mut console = Console::new(Vec::new(), Vec::new());
        let request = RunRequest {
            files,
            report,
            usage: "Usage: drawio-export [OPTIONS] [FILE]...",
        };
        let outcome = run(&request, &ExportConfig::default(), runner, &mut console);
        let (out, err) = console.into_inner();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_no_files_prints_usage_before_dependency_check() {
        let mut runner = MockCommandRunner::new();
        runner.expect_resolve().never();
        runner.expect_run().never();

        let (outcome, _, err) = run_with(&runner, &[], None);

        assert!(matches!(outcome, RunOutcome::Usage));
        assert!(!outcome.is_success());
        assert!(err.contains("Usage:"));
    }

    #[test]
    fn test_missing_exporter_processes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("a.drawio");
        fs::write(&input, "<mxfile/>").unwrap();

        let mut runner = MockCommandRunner::new();
        runner.expect_resolve().returning(|_| None);
        runner.expect_run().never();

        let (outcome, out, err) = run_with(&runner, &[input], None);

        assert!(matches!(outcome, RunOutcome::MissingExporter));
        assert!(err.contains("brew install --cask drawio"));
        assert!(!out.contains("Converted"));
    }

    #[test]
    fn test_only_skipped_files_succeeds() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, "hello").unwrap();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_resolve()
            .returning(|_| Some(PathBuf::from("/usr/bin/drawio")));
        runner.expect_run().never();

        let (outcome, out, _) = run_with(&runner, &[input], None);

        assert!(outcome.is_success());
        assert!(out.contains("Converted: 0"));
    }

    #[test]
    fn test_writes_report() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("a.drawio");
        fs::write(&input, "<mxfile/>").unwrap();
        let report = dir.path().join("report.json");

        let mut runner = MockCommandRunner::new();
        runner
            .expect_resolve()
            .returning(|_| Some(PathBuf::from("/usr/bin/drawio")));
        runner
            .expect_run()
            .withf(|spec| spec.program == "drawio")
            .returning(|_| Ok(CommandOutcome::success()));
        runner
            .expect_capture()
            .withf(|spec| spec.program == "git")
            .returning(|_| Ok(CapturedOutput::new(CommandOutcome::failure(Some(128)), "")));

        let (outcome, _, _) = run_with(&runner, &[input], Some(&report));

        assert!(outcome.is_success());
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json["converted"], 1);
        assert_eq!(json["outcomes"][0]["staged"], false);
    }

    #[test]
    fn test_report_failure_fails_run() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, "hello").unwrap();
        let report = dir.path().join("no-such-dir").join("report.json");

        let mut runner = MockCommandRunner::new();
        runner
            .expect_resolve()
            .returning(|_| Some(PathBuf::from("/usr/bin/drawio")));

        let (outcome, _, err) = run_with(&runner, &[input], Some(&report));

        assert!(matches!(outcome, RunOutcome::ReportFailed(_)));
        assert!(err.contains("failed to write report"));
    }
}
