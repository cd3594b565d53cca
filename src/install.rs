//! Install orchestration.
//!
//! One strictly sequential pass:
//!
//! ```text
//! validate path → synchronize checkout → validate command → generate script
//! ```
//!
//! The first failure aborts the run. A clone or pull that already happened is
//! left in place; re-running with the same arguments is safe, so nothing is
//! rolled back.

use std::{io, path::Path};

use jiff::Timestamp;
use tracing::info;

use crate::{
    checkout, command,
    model::{InstallReport, InstallRequest},
    safety, script,
    vcs::{Vcs, VcsError},
};

/// Errors that abort an install.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// The service name or an existing script is not ours to use.
    #[error("unsafe name: {0}")]
    UnsafeName(String),

    /// The install path holds untracked content or a foreign checkout.
    #[error("unsafe install directory: {0}")]
    UnsafeInstallDirectory(String),

    /// The launch command is missing or not executable.
    #[error("unsafe command: {0}")]
    UnsafeCmd(String),

    #[error(transparent)]
    Vcs(#[from] VcsError),

    #[error("failed to enable {name} at boot: {detail}")]
    Enable { name: String, detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, InstallError>;

/// Runs the full install for `request`, placing the script in `script_dir`.
pub fn install(request: &InstallRequest, script_dir: &Path, vcs: &impl Vcs) -> Result<InstallReport> {
    let script_path = script::script_path(script_dir, &request.name);
    let daemon = request.command.invocation();
    info!(
        name = %request.name,
        origin = %request.origin,
        path = %request.install_path.display(),
        script = %script_path.display(),
        %daemon,
        "installing service"
    );

    safety::check(&request.name, &script_path)?;

    let outcome = checkout::synchronize(&request.install_path, &request.origin, vcs)?;

    let program = command::validate_command(&request.install_path, &request.command)?;
    info!(program = %program.display(), "launch command present");

    let contents = script::render(&request.name, &request.install_path, &daemon);
    let script_sha256 = script::install_script(&script_path, &contents)?;

    Ok(InstallReport {
        name: request.name.clone(),
        origin: request.origin.clone(),
        install_path: request.install_path.clone(),
        script_path,
        daemon,
        checkout: outcome,
        script_sha256,
        installed_at: Timestamp::now(),
    })
}
