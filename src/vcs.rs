//! Best-effort staging of exported files into the surrounding git index.

use crate::runner::{CommandRunner, CommandSpec};
use std::path::Path;
use tracing::debug;

const GIT: &str = "git";

/// Result of trying to stage one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Staged,
    /// Working directory is not inside a git work tree (or git is absent).
    NotInRepository,
    /// Inside a work tree, but `git add` failed.
    Failed,
}

/// Stages files with the git CLI.
pub struct GitStager<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> GitStager<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Inside a bare repository or a `.git` directory `rev-parse` exits 0 but
    /// prints `false`, so stdout decides.
    pub fn in_work_tree(&self) -> bool {
        let check = CommandSpec::new(GIT)
            .arg("rev-parse")
            .arg("--is-inside-work-tree");

        match self.runner.capture(&check) {
            Ok(captured) => captured.outcome.success && captured.stdout.trim() == "true",
            Err(e) => {
                debug!(error = %e, "git unavailable, skipping staging");
                false
            }
        }
    }

    pub fn stage(&self, path: &Path) -> StageOutcome {
        if !self.in_work_tree() {
            return StageOutcome::NotInRepository;
        }

        let add = CommandSpec::new(GIT).arg("add").arg("--").arg(path).quiet();
        match self.runner.run(&add) {
            Ok(outcome) if outcome.success => StageOutcome::Staged,
            Ok(outcome) => {
                debug!(path = %path.display(), code = ?outcome.code, "git add failed");
                StageOutcome::Failed
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "git add could not start");
                StageOutcome::Failed
            }
        }
    }
}
