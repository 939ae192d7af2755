//! Colored status lines for the user.
//!
//! Progress and results go to `out`; errors, warnings and usage go to `err`.
//! Write errors on either stream are ignored, a closed pipe must not abort a
//! conversion run.

use crate::converter::INSTALL_GUIDANCE;
use crate::summary::RunSummary;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

pub struct Console<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Console<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn converting(&mut self, input: &Path) {
        let _ = writeln!(self.out, "{} {}", "Converting:".cyan(), input.display());
    }

    pub fn converted(&mut self, output: &Path) {
        let _ = writeln!(self.out, "  {} {}", "✓ Created:".green(), output.display());
    }

    pub fn staged(&mut self, output: &Path) {
        let _ = writeln!(self.out, "  {} {}", "✓ Staged:".green(), output.display());
    }

    pub fn stage_failed(&mut self, output: &Path) {
        let _ = writeln!(
            self.err,
            "  {} could not stage {}",
            "Warning:".yellow(),
            output.display()
        );
    }

    pub fn conversion_failed(&mut self, input: &Path) {
        let _ = writeln!(self.err, "  {} {}", "✗ Failed to convert:".red(), input.display());
    }

    pub fn file_not_found(&mut self, input: &Path) {
        let _ = writeln!(self.err, "{} file not found: {}", "Error:".red(), input.display());
    }

    pub fn not_a_diagram(&mut self, input: &Path) {
        let _ = writeln!(
            self.err,
            "{} skipping {} (not a .drawio file)",
            "Warning:".yellow(),
            input.display()
        );
    }

    pub fn usage(&mut self, usage: &str) {
        let _ = writeln!(self.err, "{}", usage);
        let _ = writeln!(
            self.err,
            "\nEnvironment: DRAWIO_SCALE (default 2), \
             DRAWIO_FORMAT (png|jpg|svg|pdf, default png), \
             DRAWIO_TRANSPARENT (1 = transparent png, default 1)"
        );
    }

    pub fn exporter_missing(&mut self, program: &str) {
        let _ = writeln!(
            self.err,
            "{} `{}` command not found. Install draw.io desktop:",
            "Error:".red(),
            program
        );
        for (platform, command) in INSTALL_GUIDANCE {
            let _ = writeln!(self.err, "  {platform}: {command}");
        }
    }

    pub fn error(&mut self, message: impl std::fmt::Display) {
        let _ = writeln!(self.err, "{} {}", "Error:".red(), message);
    }

    pub fn summary(&mut self, summary: &RunSummary) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "{} {}", "Converted:".green(), summary.converted);
        if summary.failed > 0 {
            let _ = writeln!(self.out, "{} {}", "Failed:".red(), summary.failed);
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
