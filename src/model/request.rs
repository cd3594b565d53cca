//! Install requests: the immutable description of one invocation.

use std::path::{Component, Path, PathBuf};

/// The command a service runs, relative to its checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    program: String,
    args: Vec<String>,
}

impl LaunchCommand {
    /// Builds a command from its tokens. The first token is the executable.
    ///
    /// Returns `None` when there are no tokens.
    pub fn from_tokens(tokens: Vec<String>) -> Option<Self> {
        let mut tokens = tokens.into_iter();
        let program = tokens.next()?;
        Some(Self {
            program,
            args: tokens.collect(),
        })
    }

    /// The executable, relative to the checkout.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The full invocation as a single space-joined string.
    pub fn invocation(&self) -> String {
        let mut invocation = self.program.clone();
        for arg in &self.args {
            invocation.push(' ');
            invocation.push_str(arg);
        }
        invocation
    }
}

/// One install: which origin, under what name, where, running what.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub name: String,
    pub install_path: PathBuf,
    pub origin: String,
    pub command: LaunchCommand,
}

impl InstallRequest {
    /// Resolves a request from user input, filling in defaults.
    ///
    /// Without `name`, the name is derived from the origin.
    /// Without `path`, the install path is `install_root/<name>`.
    /// The install path is always made absolute against `cwd`.
    pub fn resolve(
        origin: String,
        command: LaunchCommand,
        name: Option<String>,
        path: Option<PathBuf>,
        install_root: &Path,
        cwd: &Path,
    ) -> Self {
        let name = name.unwrap_or_else(|| default_name(&origin));
        let path = path.unwrap_or_else(|| install_root.join(&name));

        Self {
            install_path: absolutize(&path, cwd),
            name,
            origin,
            command,
        }
    }
}

/// Derives a service name from an origin.
///
/// Example: `https://example.com/foo-service.git` → `foo-service`.
pub fn default_name(origin: &str) -> String {
    let trimmed = origin.trim().trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// Makes `path` absolute against `cwd` and resolves `.` and `..` lexically.
///
/// Symlinks are not followed; the path need not exist.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays at `/`.
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
