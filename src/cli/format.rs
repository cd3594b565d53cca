//! Output formatting for CLI display.

use crate::model::{InstallReport, SyncOutcome};

/// Format a report as the aligned multi-line progress summary.
pub(super) fn format_report(report: &InstallReport) -> String {
    let checkout = match report.checkout {
        SyncOutcome::Cloned => "cloned",
        SyncOutcome::Updated => "updated",
    };

    format!(
        "Setting up:     {}\n\
         \x20 Cloning from:   {}\n\
         \x20 Into:           {}\n\
         \x20 Script:         {}\n\
         \x20 Daemon:         {}\n\
         \x20 Checkout:       {checkout}\n\
         \x20 SHA-256:        {}\n",
        report.name,
        report.origin,
        report.install_path.display(),
        report.script_path.display(),
        report.daemon,
        report.script_sha256,
    )
}
