//! service-wrapper configuration.
//!
//! Loaded from `~/.service-wrapper/config.toml`, or from the file named by
//! `SERVICE_WRAPPER_CONFIG`. Every key is optional; a missing file means
//! defaults.

use std::{env, ffi::OsString, fs, io, path::Path, path::PathBuf};

use serde::Deserialize;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "SERVICE_WRAPPER_CONFIG";

/// service-wrapper configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Parent directory for checkouts when `--path` is not given.
    pub install_root: PathBuf,

    /// Where service scripts are installed.
    pub script_dir: PathBuf,

    /// The git executable.
    pub git: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("/usr/local"),
            script_dir: PathBuf::from("/etc/init.d"),
            git: PathBuf::from("git"),
        }
    }
}

impl Config {
    /// Load config from the configured location.
    /// Returns defaults when there is no file, an error if it is invalid.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `$SERVICE_WRAPPER_CONFIG`, else
    /// `~/.service-wrapper/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::resolve_path(env::var_os(CONFIG_ENV), dirs::home_dir())
    }

    /// Pick the config path from an override and a home directory.
    fn resolve_path(override_path: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = override_path
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }

        home.map(|h| h.join(".service-wrapper").join("config.toml"))
    }
}
