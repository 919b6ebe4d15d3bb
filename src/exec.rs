//! Shell execution of command definitions.
//!
//! Definitions are trusted user-authored text. They run unsandboxed with
//! the caller's standard streams and the parent waits for them to exit.

use std::process::{Command, ExitStatus, Stdio};

use crate::error::{FabrunError, Result};

/// Runs `text` as a script body via `<shell> -c`.
///
/// A non-zero exit is reported through the returned status, not as an
/// error.
///
/// # Errors
///
/// Returns [`FabrunError::Spawn`] if the shell cannot be started.
pub fn execute(shell: &str, text: &str) -> Result<ExitStatus> {
    tracing::debug!("Running via {} -c: {}", shell, text);

    let status = Command::new(shell)
        .arg("-c")
        .arg(text)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| FabrunError::Spawn {
            shell: shell.to_string(),
            source,
        })?;

    tracing::debug!("Command exited with {}", status);
    Ok(status)
}

/// Maps a child status to the exit code fabrun itself should use.
///
/// Success is 0. A failed child keeps its own code when it fits in a
/// process exit code; signals and out-of-range codes become 1.
pub fn exit_code(status: ExitStatus) -> u8 {
    if status.success() {
        return 0;
    }
    match status.code() {
        Some(code) => u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1),
        None => 1,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_execute_success() {
        let status = execute("sh", "true").unwrap();
        assert!(status.success());
        assert_eq!(exit_code(status), 0);
    }

    #[test]
    fn test_execute_reports_real_exit_status() {
        let status = execute("sh", "exit 3").unwrap();
        assert!(!status.success());
        assert_eq!(status.code(), Some(3));
        assert_eq!(exit_code(status), 3);
    }

    #[test]
    fn test_execute_multiline_script() {
        let status = execute("sh", "x=4\ntest \"$x\" = 4").unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_execute_missing_shell_is_spawn_error() {
        let err = execute("/nonexistent/fabrun-shell", "true").unwrap_err();
        assert!(matches!(err, FabrunError::Spawn { .. }));
    }

    #[test]
    fn test_exit_code_for_signal_is_one() {
        let status = execute("sh", "kill -9 $$").unwrap();
        assert_eq!(exit_code(status), 1);
    }
}
