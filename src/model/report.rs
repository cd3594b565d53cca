//! The structured result of a successful install.

use std::path::PathBuf;

use jiff::Timestamp;
use serde::Serialize;

/// How the checkout was brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Fresh clone into an absent or empty directory.
    Cloned,

    /// Pull into an existing checkout of the same origin.
    Updated,
}

/// Everything an install did, printed once the pipeline finishes.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub name: String,
    pub origin: String,
    pub install_path: PathBuf,
    pub script_path: PathBuf,

    /// Full daemon invocation wired into the script.
    pub daemon: String,

    pub checkout: SyncOutcome,

    /// Hex-encoded SHA-256 of the installed script.
    pub script_sha256: String,

    pub installed_at: Timestamp,
}
