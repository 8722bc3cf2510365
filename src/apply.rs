//! Checkout-for-edit and write-back.
//!
//! Files under version control systems that lock files (Perforce and
//! friends) must be opened for edit before they can be written. A
//! [`Checkout`] runs such a command with the file path appended and waits for
//! it with a timeout; [`write_back`] then replaces the file contents in place.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Default limit for one checkout command.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from checking out or writing a file.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("could not run `{command}`: {source}")]
    Spawn {
        path: PathBuf,
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}{stderr}")]
    Exited {
        path: PathBuf,
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` timed out after {}s", timeout.as_secs())]
    TimedOut {
        path: PathBuf,
        command: String,
        timeout: Duration,
    },

    #[error("{source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApplyError {
    /// The file the failed operation was for.
    pub fn path(&self) -> &Path {
        match self {
            ApplyError::Spawn { path, .. }
            | ApplyError::Exited { path, .. }
            | ApplyError::TimedOut { path, .. }
            | ApplyError::Write { path, .. } => path,
        }
    }
}

/// A checkout-for-edit command such as `p4 edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Checkout {
    /// Split `command` on whitespace. Returns `None` for a blank command.
    pub fn parse(command: &str, timeout: Duration) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Checkout {
            program,
            args: words.collect(),
            timeout,
        })
    }

    /// The command line, without the file path.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command for `path` and wait for it to succeed.
    pub fn run(&self, path: &Path) -> Result<(), ApplyError> {
        let command = format!("{} {}", self.command_line(), path.display());
        debug!(command = %command, "checking out");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ApplyError::Spawn {
                path: path.to_path_buf(),
                command: command.clone(),
                source,
            })?;

        // Drained while waiting, so a chatty command cannot fill the pipe
        // and stall.
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let waited = child.wait_timeout(self.timeout);
        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                warn!(command = %command, timeout = ?self.timeout, "checkout timed out");
                return Err(ApplyError::TimedOut {
                    path: path.to_path_buf(),
                    command,
                    timeout: self.timeout,
                });
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ApplyError::Spawn {
                    path: path.to_path_buf(),
                    command,
                    source,
                });
            }
        };

        if status.success() {
            return Ok(());
        }
        let stderr = stderr_reader
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();
        let stderr = match stderr.trim() {
            "" => String::new(),
            text => format!(": {}", text),
        };
        Err(ApplyError::Exited {
            path: path.to_path_buf(),
            command,
            status: status.to_string(),
            stderr,
        })
    }
}

/// Replace the contents of `path` with `text`.
///
/// The file is truncated and rewritten in place, so its permissions and
/// ownership stay as they are.
pub fn write_back(path: &Path, text: &str) -> Result<(), ApplyError> {
    fs::write(path, text).map_err(|source| ApplyError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_splits_words() {
        let checkout = Checkout::parse("  p4   edit -c 12 ", DEFAULT_CHECKOUT_TIMEOUT).unwrap();
        assert_eq!(checkout.command_line(), "p4 edit -c 12");
        assert!(Checkout::parse("   ", DEFAULT_CHECKOUT_TIMEOUT).is_none());
    }

    #[test]
    fn write_back_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "old contents that are longer\n").unwrap();
        write_back(&path, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn write_back_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("main.go");
        let err = write_back(&path, "x").unwrap_err();
        assert!(matches!(err, ApplyError::Write { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[cfg(unix)]
    #[test]
    fn write_back_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        write_back(&path, "new\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn successful_checkout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "package main\n").unwrap();
        let checkout = Checkout::parse("test -f", DEFAULT_CHECKOUT_TIMEOUT).unwrap();
        checkout.run(&path).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn failing_checkout_reports_status() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.go");
        let checkout = Checkout::parse("test -f", DEFAULT_CHECKOUT_TIMEOUT).unwrap();
        let err = checkout.run(&path).unwrap_err();
        assert!(matches!(err, ApplyError::Exited { .. }), "{:?}", err);
        assert!(err.to_string().starts_with("`test -f "), "{}", err);
    }

    #[cfg(unix)]
    #[test]
    fn slow_checkout_times_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "package main\n").unwrap();
        let checkout = Checkout::parse("tail -f", Duration::from_millis(100)).unwrap();
        let err = checkout.run(&path).unwrap_err();
        assert!(matches!(err, ApplyError::TimedOut { .. }), "{:?}", err);
    }

    #[cfg(unix)]
    #[test]
    fn noisy_failing_checkout_does_not_stall() {
        let dir = TempDir::new().unwrap();
        // The checked-out path doubles as the script `sh` runs.
        let path = dir.path().join("noisy.go");
        fs::write(&path, "head -c 200000 /dev/zero | tr '\\0' x >&2\nexit 3\n").unwrap();
        let checkout = Checkout::parse("sh", Duration::from_secs(30)).unwrap();
        let err = checkout.run(&path).unwrap_err();
        match err {
            ApplyError::Exited { stderr, .. } => assert_eq!(stderr.len(), 200_002),
            other => panic!("expected Exited, got {:?}", other),
        }
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        let checkout =
            Checkout::parse("argtail-no-such-checkout-tool edit", DEFAULT_CHECKOUT_TIMEOUT)
                .unwrap();
        let err = checkout.run(&path).unwrap_err();
        assert!(matches!(err, ApplyError::Spawn { .. }), "{:?}", err);
    }
}
