//! Annotated-line history suppliers
//!
//! The contribution scorer only consumes pre-formatted annotated text; this
//! module supplies it, by default from a `git blame` subprocess run once per
//! file. The trait seam keeps the walker testable without a repository.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Supplier of per-line authorship annotations for a file
pub trait BlameSource {
    /// Full annotated text for the file, one annotated line per source line
    fn annotate(&self, path: &Path) -> Result<String>;
}

/// `git blame` subprocess supplier
#[derive(Debug, Clone)]
pub struct GitBlame {
    workdir: PathBuf,
}

impl GitBlame {
    /// Blame files of the repository rooted at (or above) `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl BlameSource for GitBlame {
    fn annotate(&self, path: &Path) -> Result<String> {
        tracing::debug!("running git blame for {}", path.display());

        let output = Command::new("git")
            .arg("blame")
            .arg("--date=iso")
            .arg(path)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("failed to spawn git blame for '{}'", path.display()))?;

        if !output.status.success() {
            bail!(
                "git blame failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_blame_surfaces_failure_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("file.txt"), "content\n").unwrap();

        let blame = GitBlame::new(dir.path());
        let result = blame.annotate(Path::new("file.txt"));

        // Not a git repository: the error must surface, not be swallowed
        assert!(result.is_err());
    }
}
