mod checkout;
mod cli;
mod command;
mod config;
mod install;
mod marker;
mod model;
mod safety;
mod script;
mod vcs;

use std::{io, process};

use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
