//! draw.io Batch Export CLI
//!
//! Converts each `*.drawio` argument with `drawio -x` and writes the result
//! next to the input as `<input>.<format>`.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DRAWIO_SCALE`: Scale factor (default: 2)
//! - `DRAWIO_FORMAT`: png, jpg, svg or pdf (default: png)
//! - `DRAWIO_TRANSPARENT`: "1" for a transparent png background (default: 1)
//! - `DRAWIO_BIN`: Exporter executable (default: drawio)
//! - `RUST_LOG`: Log level (default: warn)
//! - `DRAWIO_EXPORT_LOG_FORMAT`: `json` for JSON logs
//!
//! ## Exit Status
//!
//! 1 when no files are given, drawio is missing, any file fails or the
//! report cannot be written; 0 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use drawio_export::app::{self, RunRequest};
use drawio_export::cli::Cli;
use drawio_export::config::ExportConfig;
use drawio_export::console::Console;
use drawio_export::runner::SystemRunner;
use drawio_export::telemetry;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("Failed to initialize logging")?;

    let config = ExportConfig::from_env();
    let usage = Cli::usage();
    let request = RunRequest {
        files: &cli.files,
        report: cli.report.as_deref(),
        usage: &usage,
    };

    let mut console = Console::stdio();
    Ok(app::run(&request, &config, &SystemRunner, &mut console).exit_code())
}
