//! Checkout synchronization: make an install path hold a current checkout
//! of the requested origin, or refuse.
//!
//! A path is cloned into only when absent or empty, and pulled only when it
//! already tracks the same origin. Anything else is left alone.

use std::{fs, io, path::Path};

use tracing::{info, warn};

use crate::{
    install::{InstallError, Result},
    model::{CheckoutState, SyncOutcome},
    vcs::Vcs,
};

/// Classifies what `path` currently holds relative to `origin`.
///
/// Read-only apart from querying the checkout's recorded origin.
pub fn inspect(path: &Path, origin: &str, vcs: &impl Vcs) -> Result<CheckoutState> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CheckoutState::Absent),
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_dir() {
        return Ok(CheckoutState::ForeignNonVcs);
    }

    if fs::read_dir(path)?.next().is_none() {
        return Ok(CheckoutState::Empty);
    }

    if !path.join(".git").exists() {
        return Ok(CheckoutState::ForeignNonVcs);
    }

    // Exact comparison: no scheme, slash, or `.git` normalization.
    let recorded = vcs.remote_origin(path)?;
    let recorded = recorded.trim();
    if recorded == origin.trim() {
        Ok(CheckoutState::OwnedVcs)
    } else {
        Ok(CheckoutState::ForeignVcs {
            origin: recorded.to_string(),
        })
    }
}

/// Clones or pulls so that `path` holds an up-to-date checkout of `origin`.
///
/// Fails with [`InstallError::UnsafeInstallDirectory`] without writing when
/// the path holds anything else. No rollback on VCS failure.
pub fn synchronize(path: &Path, origin: &str, vcs: &impl Vcs) -> Result<SyncOutcome> {
    let state = inspect(path, origin, vcs)?;
    if !state.is_safe() {
        warn!(path = %path.display(), ?state, "refusing to use install directory");
    }

    match state {
        CheckoutState::Absent | CheckoutState::Empty => {
            info!(origin, path = %path.display(), "cloning");
            vcs.clone_repo(origin, path)?;
            Ok(SyncOutcome::Cloned)
        }
        CheckoutState::OwnedVcs => {
            info!(path = %path.display(), "updating existing checkout");
            vcs.pull(path)?;
            Ok(SyncOutcome::Updated)
        }
        CheckoutState::ForeignNonVcs => Err(InstallError::UnsafeInstallDirectory(format!(
            "install dir is not empty and not a checkout: {}",
            path.display()
        ))),
        CheckoutState::ForeignVcs { origin: other } => {
            Err(InstallError::UnsafeInstallDirectory(format!(
                "install dir {} contains a checkout from: {other}",
                path.display()
            )))
        }
    }
}
