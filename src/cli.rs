//! Command-line arguments.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Convert draw.io diagrams to images with the drawio desktop CLI.
///
/// Successful outputs are written next to each input as `<input>.<format>`
/// and staged with git when run inside a work tree.
#[derive(Debug, Parser)]
#[command(name = "drawio-export", version, about)]
pub struct Cli {
    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Diagram files to convert (*.drawio)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Short usage text shown when no files are given.
    pub fn usage() -> String {
        let mut command = Cli::command();
        command.render_usage().to_string()
    }
}
