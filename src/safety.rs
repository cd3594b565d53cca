//! Path safety checks, run before anything touches the filesystem.

use std::{
    fs, io,
    path::{Component, Path},
};

use tracing::warn;

use crate::{
    install::{InstallError, Result},
    marker,
};

/// Checks that `name` is a plain file name and that installing a script at
/// `script_path` would not clobber a file we did not create.
///
/// Read-only.
pub fn check(name: &str, script_path: &Path) -> Result<()> {
    validate_name(name)?;
    validate_script(script_path)
}

/// A service name must be exactly one normal path segment, printable
/// on a single line.
fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let simple = match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) => segment == name,
        _ => false,
    } && !name.chars().any(char::is_control);

    if simple {
        Ok(())
    } else {
        warn!(name, "rejecting service name");
        Err(InstallError::UnsafeName(format!(
            "name should be simple: {name:?}"
        )))
    }
}

/// An existing script may only be replaced if it carries our marker.
fn validate_script(script_path: &Path) -> Result<()> {
    if script_path.is_dir() {
        return Err(InstallError::UnsafeName(format!(
            "{} is a directory",
            script_path.display()
        )));
    }

    let owned = match fs::read_to_string(script_path) {
        Ok(contents) => marker::is_owned(&contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        // Not text, so not one of ours.
        Err(e) if e.kind() == io::ErrorKind::InvalidData => false,
        Err(e) => return Err(e.into()),
    };

    if owned {
        Ok(())
    } else {
        warn!(path = %script_path.display(), "existing script lacks ownership marker");
        Err(InstallError::UnsafeName(format!(
            "would overwrite a file we did not create: {}",
            script_path.display()
        )))
    }
}
