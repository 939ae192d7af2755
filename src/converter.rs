//! Diagram export through the drawio desktop CLI.

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::job::ConversionJob;
use crate::runner::{CommandRunner, CommandSpec};
use std::path::PathBuf;
use tracing::{debug, info};

/// Installation hints printed when the exporter is missing.
pub const INSTALL_GUIDANCE: &[(&str, &str)] = &[
    ("macOS", "brew install --cask drawio"),
    ("Linux", "sudo snap install drawio"),
];

/// Drives the drawio CLI in export mode.
///
/// All rendering happens inside the external application; this type only
/// builds the command line and interprets the exit status.
pub struct DrawioConverter<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a ExportConfig,
}

impl<'a, R: CommandRunner> DrawioConverter<'a, R> {
    pub fn new(runner: &'a R, config: &'a ExportConfig) -> Self {
        Self { runner, config }
    }

    /// Checks that the configured exporter can be launched.
    ///
    /// A bare name is looked up on `PATH`; a value containing a path
    /// separator is checked directly.
    ///
    /// # Returns
    ///
    /// The resolved path of the exporter executable.
    ///
    /// # Errors
    ///
    /// - [`ExportError::ExporterNotFound`] when the exporter does not resolve
    pub fn ensure_available(&self) -> Result<PathBuf> {
        let resolved = self.runner.resolve(&self.config.exporter).ok_or_else(|| {
            ExportError::ExporterNotFound {
                program: self.config.exporter.clone(),
            }
        })?;

        debug!(exporter = %resolved.display(), "Exporter resolved");
        Ok(resolved)
    }

    /// Builds the export invocation for `job`.
    ///
    /// `-t` is only added for png with transparency enabled; other formats
    /// ignore the setting.
    pub fn command_for(&self, job: &ConversionJob) -> CommandSpec {
        let mut spec = CommandSpec::new(self.config.exporter.as_str())
            .arg("-x")
            .arg("-f")
            .arg(self.config.format.as_str())
            .arg("-s")
            .arg(&self.config.scale);

        if self.config.wants_transparency() {
            spec = spec.arg("-t");
        }

        spec.arg("-o")
            .arg(&job.output_path)
            .arg(&job.input_path)
            .quiet()
    }

    /// Exports one diagram next to its source.
    ///
    /// # Arguments
    ///
    /// * `job` - Job carrying the input path and the derived output path
    ///
    /// # Returns
    ///
    /// `Ok(true)` when the exporter exits 0, `Ok(false)` on any other exit
    /// status. The exit status is the only success signal; the output file
    /// is not inspected.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Spawn`] when the exporter process cannot be started
    pub fn convert(&self, job: &ConversionJob) -> Result<bool> {
        info!(
            input = %job.input_path.display(),
            output = %job.output_path.display(),
            format = %self.config.format,
            "Exporting diagram"
        );

        // Build export command line
        let command = self.command_for(job);

        // Run exporter and wait for it to exit
        let outcome = self.runner.run(&command).map_err(|source| ExportError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        if !outcome.success {
            debug!(code = ?outcome.code, "Exporter returned failure");
        }
        Ok(outcome.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportFormat;
    use crate::runner::{CommandOutcome, MockCommandRunner};
    use pretty_assertions::assert_eq;
    use std::io;

    fn job(config: &ExportConfig) -> ConversionJob {
        ConversionJob::new(PathBuf::from("diagram.drawio"), &config.format)
    }

    #[test]
    fn test_png_with_transparency() {
        let runner = MockCommandRunner::new();
        let config = ExportConfig::default();
        let converter = DrawioConverter::new(&runner, &config);

        let spec = converter.command_for(&job(&config));
        assert_eq!(spec.program, "drawio");
        assert_eq!(
            spec.args_lossy(),
            vec![
                "-x",
                "-f",
                "png",
                "-s",
                "2",
                "-t",
                "-o",
                "diagram.drawio.png",
                "diagram.drawio"
            ]
        );
        assert!(spec.quiet);
    }

    #[test]
    fn test_png_without_transparency() {
        let runner = MockCommandRunner::new();
        let config = ExportConfig {
            transparent: false,
            ..ExportConfig::default()
        };
        let converter = DrawioConverter::new(&runner, &config);

        let args = converter.command_for(&job(&config)).args_lossy();
        assert!(!args.contains(&"-t".to_string()));
    }

    #[test]
    fn test_other_formats_ignore_transparency() {
        let runner = MockCommandRunner::new();
        for format in [ExportFormat::Jpg, ExportFormat::Svg, ExportFormat::Pdf] {
            let config = ExportConfig {
                format: format.clone(),
                scale: "1.5".to_string(),
                ..ExportConfig::default()
            };
            let converter = DrawioConverter::new(&runner, &config);

            let args = converter.command_for(&job(&config)).args_lossy();
            assert!(!args.contains(&"-t".to_string()), "{format} got -t");
            assert_eq!(args[2], format.as_str());
            assert_eq!(args[4], "1.5");
            assert_eq!(args[6], format!("diagram.drawio.{format}"));
        }
    }

    #[test]
    fn test_ensure_available_missing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_resolve().returning(|_| None);
        let config = ExportConfig::default();
        let converter = DrawioConverter::new(&runner, &config);

        let err = converter.ensure_available().unwrap_err();
        assert!(
            matches!(err, ExportError::ExporterNotFound { ref program } if program == "drawio")
        );
    }

    #[test]
    fn test_ensure_available_uses_configured_exporter() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_resolve()
            .withf(|program| program == "/opt/drawio/drawio")
            .returning(|p| Some(PathBuf::from(p)));
        let config = ExportConfig {
            exporter: "/opt/drawio/drawio".to_string(),
            ..ExportConfig::default()
        };
        let converter = DrawioConverter::new(&runner, &config);

        assert_eq!(
            converter.ensure_available().unwrap(),
            PathBuf::from("/opt/drawio/drawio")
        );
    }

    #[test]
    fn test_convert_follows_exit_status() {
        let mut runner = MockCommandRunner::new();
        let mut calls = 0;
        runner.expect_run().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(CommandOutcome::success())
            } else {
                Ok(CommandOutcome::failure(Some(1)))
            }
        });
        let config = ExportConfig::default();
        let converter = DrawioConverter::new(&runner, &config);

        assert!(converter.convert(&job(&config)).unwrap());
        assert!(!converter.convert(&job(&config)).unwrap());
    }

    #[test]
    fn test_convert_spawn_error() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "gone")));
        let config = ExportConfig::default();
        let converter = DrawioConverter::new(&runner, &config);

        let err = converter.convert(&job(&config)).unwrap_err();
        assert!(matches!(err, ExportError::Spawn { .. }));
    }
}
