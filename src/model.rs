//! Core data model: what an install asks for, what it finds on disk,
//! and what it reports when done.

mod checkout;
mod report;
mod request;

pub use checkout::CheckoutState;
pub use report::{InstallReport, SyncOutcome};
pub use request::{InstallRequest, LaunchCommand};
