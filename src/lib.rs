//! draw.io Batch Export Library
//!
//! This library drives the drawio desktop application's command-line export
//! mode over a list of diagram files. Rendering is entirely delegated to the
//! external tool; this crate builds invocations, reports results and stages
//! outputs with git.
//!
//! ## Module Overview
//!
//! - `app`: Run state machine (usage, dependency check, batch, exit code)
//! - `batch`: Sequential per-file validation and conversion
//! - `config`: Environment-derived export configuration
//! - `converter`: drawio CLI invocation
//! - `runner`: Subprocess abstraction used by the converter and git staging
//! - `vcs`: Best-effort git staging
//! - `summary`: Run counters and the JSON run report
//! - `telemetry`: tracing setup and structured job logging
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use drawio_export::{
//!     batch::BatchExporter,
//!     config::ExportConfig,
//!     console::Console,
//!     runner::SystemRunner,
//! };
//! use std::path::PathBuf;
//!
//! let config = ExportConfig::from_env();
//! let runner = SystemRunner;
//! let mut console = Console::stdio();
//!
//! let files = vec![PathBuf::from("architecture.drawio")];
//! let summary = BatchExporter::new(&runner, &config).run(&files, &mut console);
//! assert_eq!(summary.failed, 0);
//! ```

pub mod app;
pub mod batch;
pub mod cli;
pub mod config;
pub mod console;
pub mod converter;
pub mod error;
pub mod job;
pub mod runner;
pub mod summary;
pub mod telemetry;
pub mod vcs;

pub use error::{ExportError, Result};
