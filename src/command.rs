//! Launch command checks against a synchronized checkout.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use nix::unistd::{AccessFlags, access};

use crate::{
    install::{InstallError, Result},
    model::LaunchCommand,
};

/// Verifies that the command's executable is a regular file inside the
/// checkout that the current user may execute. Returns its full path.
///
/// Must run after synchronization so the checkout is current.
pub fn validate_command(install_path: &Path, command: &LaunchCommand) -> Result<PathBuf> {
    let program = Path::new(command.program());
    let contained = program
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained || program.as_os_str().is_empty() {
        return Err(InstallError::UnsafeCmd(format!(
            "command must be a path inside the checkout: {:?}",
            command.program()
        )));
    }

    let full = install_path.join(program);
    let executable = fs::metadata(&full).is_ok_and(|m| m.is_file())
        && access(full.as_path(), AccessFlags::X_OK).is_ok();

    if executable {
        Ok(full)
    } else {
        Err(InstallError::UnsafeCmd(format!(
            "command not present in checkout: \"{}\"",
            full.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::os::unix::fs::PermissionsExt;

    use nix::unistd::geteuid;
    use tempfile::TempDir;

    fn command(program: &str) -> LaunchCommand {
        LaunchCommand::from_tokens(vec![program.to_string(), "--verbose".to_string()]).unwrap()
    }

    fn write_file(path: &Path, mode: u32) {
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn executable_file_passes() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("run.sh"), 0o755);

        let full = validate_command(dir.path(), &command("run.sh")).unwrap();
        assert_eq!(full, dir.path().join("run.sh"));
    }

    #[test]
    fn nested_executable_passes() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("bin")).unwrap();
        write_file(&dir.path().join("bin/serve"), 0o700);

        assert!(validate_command(dir.path(), &command("bin/serve")).is_ok());
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = TempDir::new().unwrap();

        let err = validate_command(dir.path(), &command("missing.sh")).unwrap_err();
        assert!(matches!(err, InstallError::UnsafeCmd(_)));
        assert!(err.to_string().contains("missing.sh"));
    }

    #[test]
    fn non_executable_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("run.sh"), 0o644);

        let err = validate_command(dir.path(), &command("run.sh")).unwrap_err();
        assert!(matches!(err, InstallError::UnsafeCmd(_)));
    }

    #[test]
    fn execute_bit_for_other_users_only_is_rejected() {
        // Root may execute anything with some execute bit set.
        if geteuid().is_root() {
            return;
        }
        let dir = TempDir::new().unwrap();
        // We own the file, so only the owner bits apply to us.
        write_file(&dir.path().join("run.sh"), 0o671);

        let err = validate_command(dir.path(), &command("run.sh")).unwrap_err();
        assert!(matches!(err, InstallError::UnsafeCmd(_)));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("bin")).unwrap();

        let err = validate_command(dir.path(), &command("bin")).unwrap_err();
        assert!(matches!(err, InstallError::UnsafeCmd(_)));
    }

    #[test]
    fn paths_escaping_the_checkout_are_rejected() {
        let dir = TempDir::new().unwrap();
        for program in ["/bin/sh", "../run.sh", "bin/../../run.sh"] {
            let err = validate_command(dir.path(), &command(program)).unwrap_err();
            assert!(matches!(err, InstallError::UnsafeCmd(_)), "{program}");
        }
    }
}
