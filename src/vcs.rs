//! Version control: the three git operations an install needs.
//!
//! Every invocation runs with an explicit working directory. Nothing here
//! changes the process's current directory.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::Command,
};

use tracing::debug;

/// Errors from running the version-control client.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// A version-control client.
pub trait Vcs {
    /// Clones `origin` into `dest`. `dest` is absent or an empty directory.
    fn clone_repo(&self, origin: &str, dest: &Path) -> Result<(), VcsError>;

    /// Returns the recorded upstream origin of the checkout at `checkout`.
    fn remote_origin(&self, checkout: &Path) -> Result<String, VcsError>;

    /// Pulls the latest upstream changes into `checkout`.
    fn pull(&self, checkout: &Path) -> Result<(), VcsError>;
}

/// The `git` command-line client.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Git {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run git in `cwd` and return its stdout on success.
    fn run<S: AsRef<OsStr>>(&self, cwd: &Path, args: &[S]) -> Result<String, VcsError> {
        let args: Vec<OsString> = args.iter().map(|a| a.as_ref().to_os_string()).collect();
        let command = self.describe(&args);
        debug!(%command, cwd = %cwd.display(), "running git");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(cwd)
            .output()
            .map_err(|source| VcsError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(VcsError::Failed { command, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut command = self.program.display().to_string();
        for arg in args {
            command.push(' ');
            command.push_str(&arg.to_string_lossy());
        }
        command
    }
}

impl Vcs for Git {
    fn clone_repo(&self, origin: &str, dest: &Path) -> Result<(), VcsError> {
        let cwd = clone_workdir(dest);
        self.run(cwd, &[OsStr::new("clone"), OsStr::new(origin), dest.as_os_str()])?;
        Ok(())
    }

    fn remote_origin(&self, checkout: &Path) -> Result<String, VcsError> {
        self.run(checkout, &["config", "remote.origin.url"])
    }

    fn pull(&self, checkout: &Path) -> Result<(), VcsError> {
        self.run(checkout, &["pull"])?;
        Ok(())
    }
}

/// The nearest existing ancestor of a clone destination.
///
/// `git clone` creates missing leading directories itself.
fn clone_workdir(dest: &Path) -> &Path {
    dest.ancestors()
        .skip(1)
        .find(|p| p.is_dir())
        .unwrap_or_else(|| Path::new("/"))
}
