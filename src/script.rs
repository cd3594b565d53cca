//! Service script generation: render the init.d template and install it.
//!
//! Validation happens elsewhere. Once called, [`install_script`] always
//! replaces whatever is at the script path.

use std::{
    fs, io,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    process::Command,
};

use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::install::{InstallError, Result};

const TEMPLATE: &str = include_str!("script/init.sh");

const SCRIPT_MODE: u32 = 0o755;

/// Where the script for service `name` lives.
pub fn script_path(script_dir: &Path, name: &str) -> PathBuf {
    script_dir.join(name)
}

/// Renders the control script for one service.
///
/// Placeholders are filled in one pass, so a value that itself looks like a
/// placeholder is kept literally. Values are escaped for a double-quoted
/// shell string.
pub fn render(name: &str, install_path: &Path, daemon: &str) -> String {
    let install_path = install_path.display().to_string();
    let values = [
        ("@NAME@", name),
        ("@INSTALL_PATH@", install_path.as_str()),
        ("@DAEMON@", daemon),
    ];

    let mut out = String::with_capacity(TEMPLATE.len());
    let mut rest = TEMPLATE;
    'scan: while let Some(at) = rest.find('@') {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];
        for (placeholder, value) in values {
            if let Some(after) = tail.strip_prefix(placeholder) {
                push_escaped(&mut out, value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('@');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

/// Escape the characters that stay special inside `"..."` in sh.
fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Atomically writes `contents` to `path` as an executable script.
///
/// Returns the hex SHA-256 of what was written.
pub fn install_script(path: &Path, contents: &str) -> Result<String> {
    write_atomic(path, contents.as_bytes(), SCRIPT_MODE)?;
    info!(path = %path.display(), "installed service script");
    Ok(hex::encode(Sha256::digest(contents.as_bytes())))
}

/// Registers the script to start at boot with `update-rc.d <name> defaults`.
pub fn enable(name: &str) -> Result<()> {
    let output = Command::new("update-rc.d")
        .args([name, "defaults"])
        .current_dir("/")
        .output()
        .map_err(|e| InstallError::Enable {
            name: name.to_string(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(InstallError::Enable {
            name: name.to_string(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    info!(name, "enabled at boot");
    Ok(())
}

/// Write to a sibling temp file, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("/"));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = dir.join(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));

    let result = fs::write(&tmp, contents)
        .and_then(|()| fs::set_permissions(&tmp, fs::Permissions::from_mode(mode)))
        .and_then(|()| fs::rename(&tmp, path));

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::marker;

    #[test]
    fn template_carries_marker() {
        assert!(marker::is_owned(TEMPLATE));
    }

    #[test]
    fn render_fills_every_placeholder() {
        let script = render(
            "foo-service",
            Path::new("/usr/local/foo-service"),
            "run.sh --port 8080",
        );

        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("NAME=\"foo-service\""));
        assert!(script.contains("DAEMON_PATH=\"/usr/local/foo-service\""));
        assert!(script.contains("DAEMON=\"run.sh --port 8080\""));
        assert!(script.contains("# Provides:          foo-service"));
        assert!(!script.contains('@'));
        assert!(marker::is_owned(&script));
    }

    #[test]
    fn render_escapes_shell_metacharacters() {
        let script = render(
            "foo",
            Path::new("/srv/$HOME/foo"),
            r#"run.sh --msg "hi" `id` \x"#,
        );

        assert!(script.contains(r#"DAEMON_PATH="/srv/\$HOME/foo""#));
        assert!(script.contains(r#"DAEMON="run.sh --msg \"hi\" \`id\` \\x""#));
    }

    #[test]
    fn placeholder_text_in_values_is_kept_literally() {
        let script = render("foo", Path::new("/srv/@DAEMON@"), "run.sh @NAME@");

        assert!(script.contains("DAEMON_PATH=\"/srv/@DAEMON@\""));
        assert!(script.contains("DAEMON=\"run.sh @NAME@\""));
        assert!(script.contains("NAME=\"foo\""));
    }

    #[test]
    fn script_path_joins_name() {
        assert_eq!(
            script_path(Path::new("/etc/init.d"), "foo-service"),
            PathBuf::from("/etc/init.d/foo-service")
        );
    }

    #[test]
    fn install_writes_executable_script() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo-service");

        let digest = install_script(&path, "#!/bin/sh\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\n");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            hex::encode(Sha256::digest(b"#!/bin/sh\n"))
        );
    }

    #[test]
    fn install_overwrites_unconditionally() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo-service");
        fs::write(&path, "anything at all").unwrap();

        install_script(&path, "new contents").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents");
    }

    #[test]
    fn install_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        install_script(&dir.path().join("foo-service"), "x").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["foo-service"]);
    }

    #[test]
    fn install_into_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/foo-service");

        let err = install_script(&path, "x").unwrap_err();
        assert!(matches!(err, InstallError::Io(_)));
        assert!(!path.exists());
    }
}
