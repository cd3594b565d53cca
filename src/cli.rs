//! CLI interface for service-wrapper.
//!
//! One non-interactive command: an origin and a launch command in, an
//! installed init.d script and a report out.

mod format;

use std::{env, path::PathBuf};

use clap::Parser;

use crate::config::Config;
use crate::model::{InstallRequest, LaunchCommand};
use crate::vcs::Git;
use crate::{install, script};

use format::format_report;

/// Install a git project as an init.d service.
#[derive(Debug, Parser)]
#[command(name = "service-wrapper", after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Service name. Defaults to the origin's last path segment without `.git`.
    #[arg(long)]
    name: Option<String>,

    /// Checkout directory. Defaults to `<install-root>/<name>`.
    #[arg(long)]
    path: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Register the script to start at boot (`update-rc.d <name> defaults`).
    #[arg(long)]
    enable: bool,

    /// Git origin to clone.
    origin: String,

    /// Executable inside the checkout, followed by its arguments.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

const EXAMPLES_HELP: &str = r"Examples:
  service-wrapper https://example.com/foo-service.git run.sh
    → checkout in /usr/local/foo-service, script at /etc/init.d/foo-service
  service-wrapper --name foo --path /srv/foo https://example.com/foo.git bin/serve --port 8080

Re-running with the same arguments pulls the checkout and rewrites the script.

Defaults come from ~/.service-wrapper/config.toml (or $SERVICE_WRAPPER_CONFIG):
  install-root = '/usr/local'
  script-dir = '/etc/init.d'
  git = 'git'";

impl Cli {
    /// Resolve the parsed arguments into an install request.
    fn to_request(&self, config: &Config) -> Result<InstallRequest, String> {
        let command = LaunchCommand::from_tokens(self.command.clone())
            .ok_or("a launch command is required")?;
        let cwd =
            env::current_dir().map_err(|e| format!("failed to read current directory: {e}"))?;

        Ok(InstallRequest::resolve(
            self.origin.clone(),
            command,
            self.name.clone(),
            self.path.clone(),
            &config.install_root,
            &cwd,
        ))
    }
}

/// Run the CLI, returning an error message on failure.
///
/// Arguments are parsed before the config is read, so `--help` works even
/// with a broken config file.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| format!("failed to load config: {e}"))?;
    let request = cli.to_request(&config)?;
    let git = Git::new(&config.git);

    let report =
        install::install(&request, &config.script_dir, &git).map_err(|e| e.to_string())?;

    if cli.enable {
        script::enable(&report.name).map_err(|e| e.to_string())?;
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize report: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}
